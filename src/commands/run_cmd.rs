//! 工作流运行命令

use affbox_core::AppConfig;
use affbox_workflow::{Workflow, WorkflowOptions, WorkflowSummary};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// `run` 子命令的参数
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub product: Option<String>,
    pub niche: Option<String>,
    pub competitor: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// 运行完整工作流
pub async fn run_workflow(config: &AppConfig, args: RunArgs) -> Result<WorkflowSummary> {
    let mut workflow_config = config.workflow.clone();
    if let Some(dir) = args.data_dir {
        workflow_config.data_dir = dir;
    }
    let product = args
        .product
        .unwrap_or_else(|| workflow_config.default_product.clone());

    tracing::info!(
        "[RunCmd] 产品: {}，输出目录: {}",
        product,
        workflow_config.data_dir.display()
    );

    let workflow = Workflow::new(&workflow_config).context("初始化工作流失败")?;
    let options = WorkflowOptions {
        niche: args.niche,
        competitor: args.competitor,
    };
    workflow
        .run(&product, &options)
        .await
        .with_context(|| format!("工作流运行失败: {product}"))
}

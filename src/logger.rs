//! 日志初始化
//!
//! `RUST_LOG` 优先，未设置时使用配置或命令行给出的级别。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// 构造过滤器，无法解析的级别回退为 `info`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 安装全局订阅者，重复调用时忽略
pub fn init(level: &str) {
    let result = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!("[Logger] 日志已初始化，级别: {}", level);
    }
}

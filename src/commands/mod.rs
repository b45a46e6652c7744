//! 命令行子命令实现

pub mod run_cmd;
pub mod store_demo_cmd;

pub use run_cmd::{run_workflow, RunArgs};
pub use store_demo_cmd::store_demo;

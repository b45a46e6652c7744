//! 模拟数据层
//!
//! 仪表盘的唯一数据源：四个内存集合（产品、内容、排期、引流资料）加一组 AI 服务开关。
//! 每次变更都经过模拟调用（固定延迟 + 按概率失败），成功后才写入集合，失败时集合保持不变。
//!
//! - `policy`: 延迟/故障策略，测试中可替换为确定性结果
//! - `collection`: 通用集合及其 CRUD 生命周期
//! - `status`: 每个集合一个可观察的调用状态
//! - `notifier`: 成功/失败通知的广播通道
//! - `seed`: 初始状态（空或示例数据）
//! - `store`: 对外暴露的 `MockStore`

pub mod collection;
pub mod notifier;
pub mod policy;
pub mod records;
pub mod seed;
pub mod status;
pub mod store;

pub use collection::{Collection, Record};
pub use notifier::{Notification, NotificationHub, NotificationVariant};
pub use policy::{
    simulate_call, FixedOutcome, LatencyFaultPolicy, RandomFaultPolicy, ScriptedOutcomes,
    SIMULATED_ERROR_MESSAGE,
};
pub use seed::StoreState;
pub use status::ApiStatus;
pub use store::MockStore;

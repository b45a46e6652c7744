//! 延迟/故障策略
//!
//! 模拟调用 = 固定延迟 + 伯努利失败。策略通过 trait 注入，
//! 测试用 `FixedOutcome` / `ScriptedOutcomes` 得到确定结果，不依赖真实随机数和计时器。

use affbox_core::{StoreConfig, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// 模拟失败时的错误信息
pub const SIMULATED_ERROR_MESSAGE: &str = "API Error: Something went wrong";

/// 模拟调用策略
#[async_trait]
pub trait LatencyFaultPolicy: Send + Sync {
    /// 等待并决定本次调用是否成功
    async fn outcome(&self) -> Result<(), StoreError>;
}

/// 经过策略“发送”载荷，成功时原样返回
pub async fn simulate_call<T: Send>(
    policy: &dyn LatencyFaultPolicy,
    payload: T,
) -> Result<T, StoreError> {
    policy.outcome().await?;
    Ok(payload)
}

/// 固定延迟 + 按概率失败
#[derive(Debug, Clone)]
pub struct RandomFaultPolicy {
    latency: Duration,
    failure_rate: f64,
}

impl RandomFaultPolicy {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// 使用配置中的延迟与失败率
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(Duration::from_millis(config.latency_ms), config.failure_rate)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for RandomFaultPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 0.1)
    }
}

#[async_trait]
impl LatencyFaultPolicy for RandomFaultPolicy {
    async fn outcome(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if rand::random::<f64>() < self.failure_rate {
            return Err(StoreError::SimulatedFailure(
                SIMULATED_ERROR_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }
}

/// 固定结果，无延迟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedOutcome {
    Succeed,
    Fail,
}

#[async_trait]
impl LatencyFaultPolicy for FixedOutcome {
    async fn outcome(&self) -> Result<(), StoreError> {
        match self {
            FixedOutcome::Succeed => Ok(()),
            FixedOutcome::Fail => Err(StoreError::SimulatedFailure(
                SIMULATED_ERROR_MESSAGE.to_string(),
            )),
        }
    }
}

/// 按顺序消费预设结果，用完后一律成功
#[derive(Debug, Default)]
pub struct ScriptedOutcomes {
    queue: Mutex<VecDeque<FixedOutcome>>,
}

impl ScriptedOutcomes {
    pub fn new(outcomes: impl IntoIterator<Item = FixedOutcome>) -> Self {
        Self {
            queue: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().len()
    }
}

#[async_trait]
impl LatencyFaultPolicy for ScriptedOutcomes {
    async fn outcome(&self) -> Result<(), StoreError> {
        let next = self.queue.lock().pop_front();
        next.unwrap_or(FixedOutcome::Succeed).outcome().await
    }
}

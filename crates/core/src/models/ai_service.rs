//! AI 服务连接开关
//!
//! 进程级的开关集合，没有校验也不持久化。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可连接的 AI 服务
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AiService {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "midjourney")]
    Midjourney,
    #[serde(rename = "elevenLabs")]
    ElevenLabs,
    #[serde(rename = "fluxApi")]
    FluxApi,
}

impl AiService {
    pub const ALL: [AiService; 4] = [
        AiService::OpenAi,
        AiService::Midjourney,
        AiService::ElevenLabs,
        AiService::FluxApi,
    ];

    /// 开关表里使用的键名
    pub fn key(&self) -> &'static str {
        match self {
            AiService::OpenAi => "openai",
            AiService::Midjourney => "midjourney",
            AiService::ElevenLabs => "elevenLabs",
            AiService::FluxApi => "fluxApi",
        }
    }
}

/// 通知里展示的名字：键名首字母大写
impl fmt::Display for AiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

impl FromStr for AiService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiService::ALL
            .into_iter()
            .find(|service| service.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("未知的 AI 服务: {s}"))
    }
}

/// AI 服务连接状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiServiceFlags {
    pub openai: bool,
    pub midjourney: bool,
    pub eleven_labs: bool,
    pub flux_api: bool,
}

impl AiServiceFlags {
    pub fn get(&self, service: AiService) -> bool {
        match service {
            AiService::OpenAi => self.openai,
            AiService::Midjourney => self.midjourney,
            AiService::ElevenLabs => self.eleven_labs,
            AiService::FluxApi => self.flux_api,
        }
    }

    /// 覆盖单个开关
    pub fn set(&mut self, service: AiService, connected: bool) {
        let slot = match service {
            AiService::OpenAi => &mut self.openai,
            AiService::Midjourney => &mut self.midjourney,
            AiService::ElevenLabs => &mut self.eleven_labs,
            AiService::FluxApi => &mut self.flux_api,
        };
        *slot = connected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_only_touches_one_flag() {
        let mut flags = AiServiceFlags::default();
        flags.set(AiService::ElevenLabs, true);
        assert!(flags.get(AiService::ElevenLabs));
        assert!(!flags.openai && !flags.midjourney && !flags.flux_api);

        flags.set(AiService::ElevenLabs, false);
        assert_eq!(flags, AiServiceFlags::default());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(AiService::OpenAi.to_string(), "Openai");
        assert_eq!(AiService::FluxApi.to_string(), "FluxApi");
        assert_eq!("elevenlabs".parse::<AiService>().unwrap(), AiService::ElevenLabs);
        assert!("dalle".parse::<AiService>().is_err());
    }

    #[test]
    fn test_flags_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(AiServiceFlags::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "openai": false,
                "midjourney": false,
                "elevenLabs": false,
                "fluxApi": false
            })
        );
    }
}

use std::env;

use thiserror::Error;

/// 缺失配置必须在发起任何网络调用之前暴露出来
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("缺少必要配置项: {0}")]
    Missing(&'static str),
    #[error("配置项 {key} 无效: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("未知的 LLM_PROVIDER: {0} (支持 gemini / openai)")]
    UnknownProvider(String),
}

/// 启动时二选一的 LLM 后端变体
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// Gemini 原生接口，使用固定的默认模型
    Gemini { api_key: String },
    /// OpenAI 兼容的 chat-completion 端点，三项缺一不可
    Compatible {
        api_key: String,
        base_url: String,
        model: String,
    },
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub sender: String,
    pub receiver: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub news_api_key: String,
    pub mail: MailSettings,
}

const DEFAULT_SMTP_PORT: u16 = 587;

impl Settings {
    /// 从环境变量读取全部配置（.env 已由 main 加载）
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(&|key| env::var(key).ok())
    }

    fn build(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match lookup("LLM_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .as_str()
        {
            "gemini" => ProviderConfig::Gemini {
                api_key: required(lookup, "GOOGLE_GEMINI_API_KEY")?,
            },
            "openai" => ProviderConfig::Compatible {
                api_key: required(lookup, "LLM_API_KEY")?,
                base_url: required(lookup, "LLM_BASE_URL")?,
                model: required(lookup, "LLM_MODEL_NAME")?,
            },
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let smtp_port = match lookup("SMTP_PORT") {
            None => DEFAULT_SMTP_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SMTP_PORT",
                value: raw.to_string(),
            })?,
        };

        Ok(Settings {
            provider,
            news_api_key: required(lookup, "NEWS_API_KEY")?,
            mail: MailSettings {
                sender: required(lookup, "MAIL_SENDER")?,
                receiver: required(lookup, "MAIL_RECEIVER")?,
                smtp_host: required(lookup, "SMTP_HOST")?,
                smtp_port,
                smtp_user: required(lookup, "SMTP_USER")?,
                smtp_password: required(lookup, "SMTP_PASSWORD")?,
            },
        })
    }
}

fn required(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

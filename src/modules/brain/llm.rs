use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::config::ProviderConfig;

/// 每次 complete 调用的尝试上限
const MAX_ATTEMPTS: usize = 2;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// native 变体固定使用的默认模型
const GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM 网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LLM 接口返回错误: {0}")]
    Api(String),
    #[error("LLM 响应缺少文本内容")]
    EmptyResponse,
}

/// 后端能力接口：一个 Prompt 进，一段文本出。
/// 新增后端只需要实现这个 trait，调用方不感知
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
    fn name(&self) -> &str;
}

/// Gemini 原生接口。安全阈值全部放宽为 BLOCK_NONE，
/// 避免模型对边缘新闻内容静默拒答
pub struct GeminiBackend {
    client: Client,
    api_key: String,
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, GEMINI_MODEL, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE" }
            ]
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let err = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(err));
        }

        let parsed: Value = resp.json().await?;
        parsed["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(LlmError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

/// 通用 chat-completion 端点（DeepSeek、火山引擎等 OpenAI 兼容接口）
pub struct CompatibleBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[async_trait]
impl ChatBackend for CompatibleBackend {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
        });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let err = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(err));
        }

        let parsed: Value = resp.json().await?;
        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(LlmError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "OpenAI-Compatible"
    }
}

/// 统一的 LLM 入口：上层只依赖 complete(prompt) -> text，
/// 后端在启动时按配置选定一次，之后不再变化
pub struct LlmGateway {
    backend: Box<dyn ChatBackend>,
    max_attempts: usize,
}

impl LlmGateway {
    /// 后端唯一的构建入口；配置校验已在 Settings::load 完成
    pub fn from_settings(provider: &ProviderConfig, client: Client) -> Self {
        let backend: Box<dyn ChatBackend> = match provider {
            ProviderConfig::Gemini { api_key } => Box::new(GeminiBackend {
                client,
                api_key: api_key.clone(),
            }),
            ProviderConfig::Compatible {
                api_key,
                base_url,
                model,
            } => Box::new(CompatibleBackend {
                client,
                api_key: api_key.clone(),
                base_url: base_url.clone(),
                model: model.clone(),
            }),
        };
        Self::with_backend(backend)
    }

    pub fn with_backend(backend: Box<dyn ChatBackend>) -> Self {
        Self {
            backend,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// 固定上限的小重试循环：逐次告警，耗尽后把最后一个错误抛给调用方。
    /// 不做退避
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut last_err = None;
        for attempt in 1..=self.max_attempts {
            match self.backend.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(
                        "⚠️ {} 调用失败 (尝试 {}/{}): {}",
                        self.backend.name(),
                        attempt,
                        self.max_attempts,
                        e
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or(LlmError::EmptyResponse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// 前 fail_first 次调用失败，之后返回固定文本
    struct FlakyBackend {
        calls: Arc<AtomicUsize>,
        fail_first: usize,
    }

    #[async_trait]
    impl ChatBackend for FlakyBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                Err(LlmError::Api(format!("boom {}", n)))
            } else {
                Ok("回复".to_string())
            }
        }

        fn name(&self) -> &str {
            "Flaky"
        }
    }

    #[tokio::test]
    async fn exhausted_retries_surface_last_error_after_exact_attempts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = LlmGateway::with_backend(Box::new(FlakyBackend {
            calls: calls.clone(),
            fail_first: usize::MAX,
        }));

        let err = gateway.complete("prompt").await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match err {
            LlmError::Api(msg) => assert_eq!(msg, "boom 2"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn second_attempt_can_recover() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = LlmGateway::with_backend(Box::new(FlakyBackend {
            calls: calls.clone(),
            fail_first: 1,
        }));

        let text = gateway.complete("prompt").await.unwrap();
        assert_eq!(text, "回复");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn success_uses_a_single_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = LlmGateway::with_backend(Box::new(FlakyBackend {
            calls: calls.clone(),
            fail_first: 0,
        }));

        gateway.complete("prompt").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

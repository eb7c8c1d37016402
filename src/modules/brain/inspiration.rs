use tracing::{error, info};

use super::llm::LlmGateway;
use super::prompts;

/// 灵感卡片彻底失败时的兜底文案
pub const FALLBACK_INSPIRATION: &str =
    "今日灵感卡片正在多元宇宙中穿梭，暂时无法连接。但请记住，知识的边界，就是探索的起点。";

/// 每日概念卡片。非关键路径：任何失败都退回固定文案，
/// 从不向上层抛错，也从不返回空串
pub struct InspirationWriter<'a> {
    gateway: &'a LlmGateway,
}

impl<'a> InspirationWriter<'a> {
    pub fn new(gateway: &'a LlmGateway) -> Self {
        Self { gateway }
    }

    pub async fn generate(&self) -> String {
        info!("正在生成灵感卡片...");
        match self.gateway.complete(prompts::INSPIRATION_PROMPT).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("灵感卡片生成成功！");
                text
            }
            Ok(_) => {
                error!("灵感卡片返回为空，使用兜底文案。");
                FALLBACK_INSPIRATION.to_string()
            }
            Err(e) => {
                error!("最终生成灵感失败: {}", e);
                FALLBACK_INSPIRATION.to_string()
            }
        }
    }
}

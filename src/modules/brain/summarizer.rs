use tracing::{error, info};

use super::llm::LlmGateway;
use super::prompts;
use crate::modules::perception::{Headline, Summary};

/// 逐条把头条喂给网关。单条失败只丢弃该条，不中断整批，
/// 输出顺序跟随输入顺序
pub struct Summarizer<'a> {
    gateway: &'a LlmGateway,
}

impl<'a> Summarizer<'a> {
    pub fn new(gateway: &'a LlmGateway) -> Self {
        Self { gateway }
    }

    pub async fn summarize(&self, headlines: &[Headline]) -> Vec<Summary> {
        info!("正在使用 LLM 总结新闻...");
        let mut summaries = Vec::with_capacity(headlines.len());

        for headline in headlines {
            let prompt = prompts::summary_prompt(&headline.title, headline.content_for_summary());
            match self.gateway.complete(&prompt).await {
                Ok(text) => {
                    info!("已总结新闻: {}", headline.title);
                    summaries.push(Summary {
                        title: headline.title.clone(),
                        summary: text,
                        url: headline.url.clone(),
                    });
                }
                Err(e) => {
                    error!("总结新闻 '{}' 时出错: {}", headline.title, e);
                    continue;
                }
            }
        }

        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::brain::llm::{ChatBackend, LlmError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Prompt 中含有 poison 子串的调用失败，其余回显固定要点
    struct SelectiveBackend {
        calls: Arc<AtomicUsize>,
        poison: Option<&'static str>,
    }

    #[async_trait]
    impl ChatBackend for SelectiveBackend {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(poison) = self.poison {
                if prompt.contains(poison) {
                    return Err(LlmError::Api("refused".to_string()));
                }
            }
            Ok("• 要点".to_string())
        }

        fn name(&self) -> &str {
            "Selective"
        }
    }

    fn headline(n: u32) -> Headline {
        Headline {
            title: format!("Title {}", n),
            description: format!("Description {}", n),
            url: format!("https://example.com/{}", n),
        }
    }

    fn gateway(poison: Option<&'static str>) -> (LlmGateway, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gw = LlmGateway::with_backend(Box::new(SelectiveBackend {
            calls: calls.clone(),
            poison,
        }));
        (gw, calls)
    }

    #[tokio::test]
    async fn all_success_preserves_length_order_and_fields() {
        let (gw, _) = gateway(None);
        let headlines: Vec<_> = (1..=3).map(headline).collect();

        let summaries = Summarizer::new(&gw).summarize(&headlines).await;

        assert_eq!(summaries.len(), 3);
        for (s, h) in summaries.iter().zip(&headlines) {
            assert_eq!(s.title, h.title);
            assert_eq!(s.url, h.url);
            assert_eq!(s.summary, "• 要点");
        }
    }

    #[tokio::test]
    async fn single_failure_drops_only_that_item() {
        let (gw, _) = gateway(Some("Title 2"));
        let headlines: Vec<_> = (1..=3).map(headline).collect();

        let summaries = Summarizer::new(&gw).summarize(&headlines).await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Title 1");
        assert_eq!(summaries[1].title, "Title 3");
    }

    #[tokio::test]
    async fn empty_input_makes_no_llm_calls() {
        let (gw, calls) = gateway(None);

        let summaries = Summarizer::new(&gw).summarize(&[]).await;

        assert!(summaries.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn total_failure_yields_empty_batch() {
        let (gw, _) = gateway(Some("Title"));
        let headlines: Vec<_> = (1..=3).map(headline).collect();

        let summaries = Summarizer::new(&gw).summarize(&headlines).await;
        assert!(summaries.is_empty());
    }
}

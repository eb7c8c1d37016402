use tracing::{error, warn};

use crate::modules::action::mailer::MailTransport;
use crate::modules::action::renderer;
use crate::modules::brain::{InspirationWriter, LlmGateway, Summarizer};
use crate::modules::perception::{Headline, NewsClient};

/// 一次运行抓取的头条数量与语言
const PAGE_SIZE: u32 = 10;
const LANGUAGE: &str = "en";

/// 一次运行的最终去向。中止还是继续的决策走显式控制流，
/// 不藏在异常处理里
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 未获取到任何新闻，未发送邮件
    NoNews,
    /// 有新闻但摘要全部失败，未发送邮件
    NoSummaries,
    /// 邮件已成功投递
    Delivered,
    /// 摘要就绪但投递失败（已记录日志，运行仍算完成）
    DeliveryFailed,
}

pub struct ReportPipeline {
    news: NewsClient,
    gateway: LlmGateway,
    mailer: Box<dyn MailTransport>,
}

impl ReportPipeline {
    pub fn new(news: NewsClient, gateway: LlmGateway, mailer: Box<dyn MailTransport>) -> Self {
        Self {
            news,
            gateway,
            mailer,
        }
    }

    pub async fn run(&self) -> RunOutcome {
        let headlines = match self.news.fetch_top_headlines(PAGE_SIZE, LANGUAGE).await {
            Ok(list) => list,
            Err(e) => {
                error!("从NewsAPI.org获取新闻时出错: {}", e);
                Vec::new()
            }
        };
        self.process(headlines).await
    }

    /// 抓取之后的阶段序列：总结 + 灵感 → 空摘要闸门 → 渲染 → 发送。
    /// 灵感失败从不中止流程；摘要为空时即使灵感成功也不发信
    async fn process(&self, headlines: Vec<Headline>) -> RunOutcome {
        if headlines.is_empty() {
            warn!("未能获取任何新闻，任务结束。");
            return RunOutcome::NoNews;
        }

        let summaries = Summarizer::new(&self.gateway).summarize(&headlines).await;
        let inspiration = InspirationWriter::new(&self.gateway).generate().await;

        if summaries.is_empty() {
            warn!("新闻总结为空，不发送邮件。");
            return RunOutcome::NoSummaries;
        }

        let digest = renderer::render(&summaries, &inspiration, chrono::Utc::now());
        match self.mailer.deliver(&digest).await {
            Ok(()) => RunOutcome::Delivered,
            Err(e) => {
                error!("邮件发送失败: {}", e);
                RunOutcome::DeliveryFailed
            }
        }
    }
}

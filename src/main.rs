mod config;
mod modules;
mod pipeline;
mod utils;

use dotenvy::dotenv;
use tracing::{error, info};

use crate::config::Settings;
use crate::modules::action::SmtpMailer;
use crate::modules::brain::LlmGateway;
use crate::modules::perception::NewsClient;
use crate::pipeline::ReportPipeline;
use crate::utils::http_client::HttpClientFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guard = utils::logging::init()?;

    info!("============ 任务开始 ============");

    // Init 阶段失败即收口：配置不全时不发起任何网络调用，
    // 并以非 0 退出码告知外部调度器
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            error!("一个或多个关键配置缺失，请检查.env文件: {}", e);
            info!("============ 任务结束 ============");
            return Err(e.into());
        }
    };

    let news_client = HttpClientFactory::create()?;
    let llm_client = HttpClientFactory::create_llm()?;

    let gateway = LlmGateway::from_settings(&settings.provider, llm_client);
    let news = NewsClient::new(news_client, settings.news_api_key.clone());
    let mailer = SmtpMailer::new(settings.mail.clone());

    let pipeline = ReportPipeline::new(news, gateway, Box::new(mailer));
    let outcome = pipeline.run().await;
    info!("本次运行结果: {:?}", outcome);

    info!("============ 任务结束 ============");
    Ok(())
}

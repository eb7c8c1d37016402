use reqwest::Client;
use std::time::Duration;
use anyhow::Result;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// 创建通用 HTTP Client，用于 NewsAPI 等常规接口
    pub fn create() -> Result<Client> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(client)
    }

    /// 创建 LLM 专用 Client
    /// 总结/生成可能耗时较长，放宽总超时；强制 HTTP/1.1 避免部分
    /// 云厂商网络下 HTTP/2 断流
    pub fn create_llm() -> Result<Client> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(30))
            .http1_only()
            .build()?;
        Ok(client)
    }
}

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::structs::Headline;

const TOP_HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// 新闻抓取失败：传输错误与接口返回的非 ok 状态同等对待，
/// 由调用方按“无新闻”处理，不中断进程
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("请求 NewsAPI 失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("NewsAPI 返回错误: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

pub struct NewsClient {
    client: Client,
    api_key: String,
}

impl NewsClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// 单次请求，不重试
    pub async fn fetch_top_headlines(
        &self,
        page_size: u32,
        language: &str,
    ) -> Result<Vec<Headline>, FetchError> {
        info!("正在从 NewsAPI.org 获取新闻...");
        let page_size = page_size.to_string();

        let resp: HeadlinesResponse = self
            .client
            .get(TOP_HEADLINES_URL)
            .header("X-Api-Key", &self.api_key)
            .query(&[("language", language), ("pageSize", page_size.as_str())])
            .send()
            .await?
            .json()
            .await?;

        let headlines = collect_articles(resp)?;
        info!("成功获取新闻，共 {} 条。", headlines.len());
        Ok(headlines)
    }
}

/// NewsAPI 的字段可能为 null：缺标题或链接的条目直接丢弃
fn collect_articles(resp: HeadlinesResponse) -> Result<Vec<Headline>, FetchError> {
    if resp.status != "ok" {
        return Err(FetchError::Api(
            resp.message.unwrap_or_else(|| "unknown".to_string()),
        ));
    }

    let headlines = resp
        .articles
        .into_iter()
        .filter_map(|a| match (a.title, a.url) {
            (Some(title), Some(url)) if !title.trim().is_empty() && !url.trim().is_empty() => {
                Some(Headline {
                    title,
                    description: a.description.unwrap_or_default(),
                    url,
                })
            }
            _ => None,
        })
        .collect();

    Ok(headlines)
}

/// 新闻 API 返回的单条头条。缺 title 或 url 的条目在解码时被丢弃，
/// description 允许为空。
#[derive(Debug, Clone)]
pub struct Headline {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl Headline {
    /// 摘要 Prompt 使用的正文：描述为空时退回标题
    pub fn content_for_summary(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}

/// 一条新闻的 LLM 摘要结果，顺序跟随输入头条
#[derive(Debug, Clone)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    pub url: String,
}

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::modules::perception::Summary;

/// 渲染完成的邮件载荷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub html_body: String,
    pub subject: String,
}

/// 主题和正文里的日期一律按北京时间（UTC+8）计算，与部署机时区无关
const CST_OFFSET_SECS: i32 = 8 * 3600;

const STYLE: &str = r#"body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; } .container { max-width: 680px; margin: 20px auto; padding: 25px; border: 1px solid #e0e0e0; border-radius: 12px; background-color: #f9f9f9; } h1 { color: #2c3e50; text-align: center; border-bottom: 2px solid #3498db; padding-bottom: 10px; } h2 { color: #34495e; } .news-item { background-color: #ffffff; padding: 15px; margin-bottom: 20px; border-radius: 8px; border-left: 4px solid #3498db; box-shadow: 0 2px 4px rgba(0,0,0,0.05); } .news-title { font-size: 1.2em; font-weight: 600; margin-top: 0; } .summary { margin-left: 15px; border-left: 2px solid #ecf0f1; padding-left: 15px; } .source-link { display: inline-block; margin-top: 10px; font-size: 0.9em; text-decoration: none; color: #ffffff; background-color: #3498db; padding: 8px 12px; border-radius: 5px; } .inspiration-card { background-color: #e8f6f3; border-left: 4px solid #1abc9c; padding: 15px; margin-top: 30px; border-radius: 8px; } .footer { margin-top: 30px; font-size: 0.8em; color: #7f8c8d; text-align: center; }"#;

/// 纯函数：相同输入和时刻产出相同的 Digest，不做任何 I/O
pub fn render(summaries: &[Summary], inspiration: &str, now: DateTime<Utc>) -> Digest {
    let cst = FixedOffset::east_opt(CST_OFFSET_SECS).expect("UTC+8 偏移必然有效");
    let today = now.with_timezone(&cst).format("%Y-%m-%d").to_string();

    let mut html = format!(
        r#"
    <html><head><style>
        {STYLE}
    </style></head><body>
    <div class="container">
        <h1>📰 全球新闻摘要 ({today})</h1>
    "#
    );

    for item in summaries {
        let _ = write!(
            html,
            r#"
        <div class="news-item"> <p class="news-title">{title}</p> <div class="summary">{summary}</div> <a href="{url}" class="source-link">阅读原文 &rarr;</a> </div>
        "#,
            title = html_escape(&item.title),
            summary = normalize_summary(&item.summary),
            url = html_escape(&item.url),
        );
    }

    let _ = write!(
        html,
        r#"
        <div class="inspiration-card"> <h2>今日灵感卡片 ✨</h2> <p>{inspiration}</p> </div>
        <div class="footer"> <p>Powered by Rust on Ubuntu Server</p> </div>
    </div></body></html>
    "#,
        inspiration = html_escape(inspiration),
    );

    Digest {
        html_body: html,
        subject: format!("每日全球新闻头条 ({today})"),
    }
}

/// 模型产出和新闻字段都不可信，插入 HTML 前一律转义
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 摘要正文：转义后把项目符号统一为 HTML 实体，换行转 <br>
fn normalize_summary(text: &str) -> String {
    html_escape(text)
        .replace('•', "&#8226;")
        .replace('*', "&#8226;")
        .replace('\n', "<br>")
}

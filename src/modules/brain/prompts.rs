//! 发送给 LLM 的中文 Prompt 模板

/// 单条新闻的摘要 Prompt：固定中文输出、无序列表、不超过 3 个要点，
/// 回复必须直接以项目符号开始。格式约束写给模型，本地不做校验
pub fn summary_prompt(title: &str, content: &str) -> String {
    format!(
        "直接提取并输出以下新闻内容的核心要点，使用中文，以无序列表（bullet points）的形式呈现。
要求：
1. 不超过3个要点。
2. 直接输出要点，不要包含任何前导、解释或总结性文字。
3. 你的回答必须以第一个要点（例如•或*）开始。

新闻标题: {title}
新闻内容: {content}
"
    )
}

/// “今日概念卡片”的固定 Prompt
pub const INSPIRATION_PROMPT: &str = r#"你是一位知识渊博且富有创造力的科普作家，你的任务是为读者带来每日的知识惊喜。

请生成一个“今日概念卡片”，内容必须满足以下所有要求：
1.  **主题新颖**: 请避免选择过于大众化或陈词滥调的概念（例如：量子纠缠、薛定谔的猫、相对论、巴甫洛夫的狗等）。我希望看到一些真正能拓展我知识面的、不常见的知识点。
2.  **领域多样**: 请从下面这个更详细的领域列表中，随机选择一个进行介绍：
    *   **硬核科技**: 如最新的AI架构、某个不为人知的编程语言范式、空间探测器上的某个关键技术、材料科学的新突破。
    *   **深刻哲思**: 如某个冷门哲学家的核心思想、一个有趣的逻辑悖论、东方哲学中的某个特定概念（如“无为”）。
    *   **精妙科学**: 如某个有趣的生物学现象（如灯塔水母的永生）、一个反直觉的物理学原理、化学中的某个奇特反应。
    *   **认知心理**: 如一个不常见的认知偏误（如“宜家效应”）、关于记忆或学习的新理论。
    *   **社科经济**: 如某个小众但影响深远的经济学模型、一个有趣的历史社会学现象。
3.  **格式要求**:
    *   用3-5句话简明扼要地介绍这个概念。
    *   解释它为什么重要、有趣，或者它在现实世界中的应用。
    *   你的回答必须直接是概念的介绍，不包含任何“当然，这是一个...”之类的前导语。

现在，请给我带来一个惊喜。"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_embeds_title_and_content() {
        let p = summary_prompt("某标题", "某正文");
        assert!(p.contains("新闻标题: 某标题"));
        assert!(p.contains("新闻内容: 某正文"));
        assert!(p.contains("不超过3个要点"));
    }
}

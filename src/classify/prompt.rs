use indoc::formatdoc;

/// Label opening the line of related keywords in the model reply.
pub const RELATED_LABEL: &str = "相关关键词";
/// Label opening the line of unrelated keywords in the model reply.
pub const UNRELATED_LABEL: &str = "不相关关键词";
/// Full-width colon separating a label from its list.
pub const LABEL_SEPARATOR: char = '：';

/// Builds the computational linguistics rubric prompt for one batch.
pub fn classification_prompt(batch: &[String]) -> String {
    formatdoc! {"
        请你对以下关键词进行判断，判断其是否与计算语言学（computational linguistics）相关。

        判断规则：
        1. 与语言、文本、语音、语义、语法、NLP、语言模型、语料库等相关 → 相关
        2. 常见缩写（如 NLP, BERT, POS, NER, ASR, TTS, LSTM, GPT） → 相关
        3. 无明确学术含义的字母组合 → 不相关
        4. 明显属于其他领域 → 不相关

        关键词：
        {keywords}

        请严格按以下格式输出（仅两行）：
        {related}{sep}xxx, xxx
        {unrelated}{sep}xxx, xxx
        ",
        keywords = batch.join(", "),
        related = RELATED_LABEL,
        unrelated = UNRELATED_LABEL,
        sep = LABEL_SEPARATOR,
    }
}

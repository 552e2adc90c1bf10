use gaap_core::Language;

const COMPRESS_ZH: &str =
    "将消息压缩成简短口语化的中文，去除所有Markdown格式。保留核心信息，最多100字。只输出压缩结果。";
const COMPRESS_EN: &str = "Compress the message into concise conversational English. \
Remove all Markdown formatting. Keep core info only, max 50 words. Output only the result.";

const TITLE_ZH: &str = "将用户消息总结为一个简短的标题（5-10个字），只输出标题，不要引号或其他内容。";
const TITLE_EN: &str = "Summarize the user message into a short title (3-6 words). \
Output only the title, no quotes or extra text.";

/// System prompt for shrinking a notification message
pub fn compress_prompt(language: Language) -> &'static str {
    match language {
        Language::Zh => COMPRESS_ZH,
        Language::En => COMPRESS_EN,
    }
}

/// System prompt for naming a session after its first message
pub fn title_prompt(language: Language) -> &'static str {
    match language {
        Language::Zh => TITLE_ZH,
        Language::En => TITLE_EN,
    }
}

//! Language analysis client.
//!
//! A [`LanguageAnalyzer`] sends a title to an external language model and
//! returns the parsed [`AnalysisResult`]. Exactly one attempt is made per
//! call; failures propagate to the caller unchanged.
//!
//! The instruction set is fixed: detect the language by name and ISO 639
//! code, score the detection in `[0, 1]`, transliterate into Latin-1 and
//! translate into English, answering with a bare JSON object.

pub mod openai;
mod parse;

pub use openai::OpenAiAnalyzer;
pub use parse::parse_analysis;

use async_trait::async_trait;

use crate::Result;
use crate::types::AnalysisResult;

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an expert language model trained to detect languages, \
provide transliterations, and generate translations for movie titles. Provide a confidence \
score between 0 and 1 for the language detection.";

/// User instruction for a single title.
pub fn user_prompt(title: &str) -> String {
    format!(
        "Given the title: '{title}', detect the language both by name and ISO 639 language code, \
provide a transliteration into the Latin-1 character set, and translate it to English. \
Return the output in JSON format with keys: DetectedLanguage, ISO639LanguageCode, Confidence, \
Transliteration, and Translation. Do not include code block formatting."
    )
}

/// Analyzes titles via an external language service.
#[async_trait]
pub trait LanguageAnalyzer: Send + Sync {
    /// Analyzer name for logging/metrics.
    fn name(&self) -> &str;

    /// Analyze a single title.
    ///
    /// Fails with [`AnalysisService`](crate::TitleLangError::AnalysisService)
    /// when the call itself fails and with
    /// [`MalformedResponse`](crate::TitleLangError::MalformedResponse) when
    /// the payload cannot be parsed.
    async fn analyze(&self, title: &str) -> Result<AnalysisResult>;
}

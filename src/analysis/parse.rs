//! Strict parsing of the analysis payload.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::types::{AnalysisResult, Confidence};
use crate::{Result, TitleLangError};

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(rename = "DetectedLanguage")]
    detected_language: String,
    #[serde(rename = "ISO639LanguageCode")]
    language_code: String,
    /// Kept as source text so numeric digits never pass through `f64`.
    #[serde(rename = "Confidence")]
    confidence: Box<RawValue>,
    #[serde(rename = "Transliteration")]
    transliteration: String,
    #[serde(rename = "Translation")]
    translation: String,
}

/// Parse the model's message content into an [`AnalysisResult`].
///
/// Surrounding whitespace is ignored; anything else that is not a bare JSON
/// object with all five keys is rejected as a whole. Extra keys are ignored.
pub fn parse_analysis(content: &str) -> Result<AnalysisResult> {
    let raw: RawAnalysis = serde_json::from_str(content.trim())
        .map_err(|e| TitleLangError::MalformedResponse(e.to_string()))?;

    let confidence = parse_confidence(&raw.confidence)?;

    if let Some(c) = raw.transliteration.chars().find(|c| u32::from(*c) > 0xFF) {
        return Err(TitleLangError::MalformedResponse(format!(
            "transliteration contains non-Latin-1 character {c:?}"
        )));
    }

    Ok(AnalysisResult {
        detected_language: raw.detected_language,
        language_code: raw.language_code,
        confidence,
        transliteration: raw.transliteration,
        translation: raw.translation,
    })
}

/// The model is asked for a plain number but sometimes quotes it. Either
/// way the literal digits are parsed straight into a decimal.
fn parse_confidence(raw: &RawValue) -> Result<Confidence> {
    let text = raw.get();
    if text.starts_with('"') {
        let quoted: String = serde_json::from_str(text)
            .map_err(|e| TitleLangError::MalformedResponse(e.to_string()))?;
        return quoted.parse();
    }
    text.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITALIAN: &str = r#"{
        "DetectedLanguage": "Italian",
        "ISO639LanguageCode": "it",
        "Confidence": 0.95,
        "Transliteration": "La Vita e Bella",
        "Translation": "Life Is Beautiful"
    }"#;

    #[test]
    fn parses_all_fields() {
        let result = parse_analysis(ITALIAN).unwrap();
        assert_eq!(result.detected_language, "Italian");
        assert_eq!(result.language_code, "it");
        assert_eq!(result.confidence.to_string(), "0.95");
        assert_eq!(result.transliteration, "La Vita e Bella");
        assert_eq!(result.translation, "Life Is Beautiful");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!("\n  {ITALIAN}\n\n");
        assert!(parse_analysis(&padded).is_ok());
    }

    #[test]
    fn accepts_quoted_confidence() {
        let json = ITALIAN.replace("0.95", "\"0.87\"");
        let result = parse_analysis(&json).unwrap();
        assert_eq!(result.confidence.to_string(), "0.87");
    }

    #[test]
    fn accepts_integer_confidence() {
        let json = ITALIAN.replace("0.95", "1");
        let result = parse_analysis(&json).unwrap();
        assert_eq!(result.confidence.to_string(), "1");
    }

    #[test]
    fn keeps_every_numeric_digit() {
        let json = ITALIAN.replace("0.95", "0.123456789012345678");
        let result = parse_analysis(&json).unwrap();
        assert_eq!(result.confidence.to_string(), "0.123456789012345678");
    }

    #[test]
    fn keeps_trailing_zeros() {
        let json = ITALIAN.replace("0.95", "0.950");
        let result = parse_analysis(&json).unwrap();
        assert_eq!(result.confidence.to_string(), "0.950");
    }

    #[test]
    fn rejects_non_scalar_confidence() {
        for value in ["null", "true", "[0.9]", "{\"v\": 0.9}"] {
            let json = ITALIAN.replace("0.95", value);
            assert!(
                matches!(parse_analysis(&json), Err(TitleLangError::MalformedResponse(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn rejects_code_fences() {
        let fenced = format!("```json\n{ITALIAN}\n```");
        let err = parse_analysis(&fenced).unwrap_err();
        assert!(matches!(err, TitleLangError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_missing_key() {
        let json = r#"{"DetectedLanguage": "Italian", "ISO639LanguageCode": "it",
            "Confidence": 0.9, "Transliteration": "La Vita e Bella"}"#;
        let err = parse_analysis(json).unwrap_err();
        assert!(err.to_string().contains("Translation"));
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let json = ITALIAN.replace("0.95", "1.5");
        assert!(matches!(
            parse_analysis(&json),
            Err(TitleLangError::MalformedResponse(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_confidence() {
        let json = ITALIAN.replace("0.95", "\"high\"");
        assert!(parse_analysis(&json).is_err());
    }

    #[test]
    fn rejects_non_latin1_transliteration() {
        let json = ITALIAN.replace("La Vita e Bella", "Жизнь прекрасна");
        let err = parse_analysis(&json).unwrap_err();
        assert!(err.to_string().contains("Latin-1"));
    }

    #[test]
    fn accepts_latin1_accents() {
        let json = ITALIAN.replace("La Vita e Bella", "La Vita è Bella");
        assert!(parse_analysis(&json).is_ok());
    }

    #[test]
    fn rejects_plain_text() {
        assert!(parse_analysis("Italian, 95% sure").is_err());
    }
}

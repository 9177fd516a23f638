use serde::{Deserialize, Serialize};

/// Inbound request body for `POST /ai-suggestions`.
///
/// Fields stay optional so that missing values surface as the handler's own
/// 400 response instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub language: Option<String>,
}

/// Supported suggestion languages. Unknown tags fail closed in
/// [`Language::parse`]; there is deliberately no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    EN,
    FR,
    ES,
}

impl Language {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "EN" => Some(Language::EN),
            "FR" => Some(Language::FR),
            "ES" => Some(Language::ES),
            _ => None,
        }
    }

    /// The user-turn instruction sent to the model for this language.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::EN => {
                "Analyze this clothing image and provide 2-3 short, friendly styling suggestions in English."
            }
            Language::FR => {
                "Analysez cette image de vêtements et fournissez 2-3 suggestions de style courtes et amicales en français."
            }
            Language::ES => {
                "Analiza esta imagen de ropa y proporciona 2-3 sugerencias de estilo cortas y amigables en español."
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub success: bool,
    pub suggestions: String,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_language_tags() {
        assert_eq!(Language::parse("EN"), Some(Language::EN));
        assert_eq!(Language::parse("FR"), Some(Language::FR));
        assert_eq!(Language::parse("ES"), Some(Language::ES));
    }

    #[test]
    fn unknown_tags_fail_closed() {
        assert_eq!(Language::parse("DE"), None);
        assert_eq!(Language::parse("en"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn instructions_match_language() {
        assert!(Language::EN.instruction().contains("English"));
        assert!(Language::FR.instruction().contains("français"));
        assert!(Language::ES.instruction().contains("español"));
    }

    #[test]
    fn language_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Language::FR).unwrap(), "\"FR\"");
    }
}

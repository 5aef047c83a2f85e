use serde::{Deserialize, Serialize};

/// Placeholder syntax used when values are bound instead of inlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `$1`, `$2`, ... (PostgreSQL)
    #[default]
    Dollar,
    /// `?` (SQLite, MySQL)
    QuestionMark,
}

/// Controls how statements are turned into SQL text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Inline values as literals instead of emitting placeholders
    pub inline_literals: bool,
    pub placeholder: Placeholder,
    /// One clause per line
    pub pretty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            inline_literals: true,
            placeholder: Placeholder::Dollar,
            pretty: true,
        }
    }
}

impl RenderOptions {
    /// Bind values as `$n` placeholders
    pub fn parameterized() -> Self {
        RenderOptions {
            inline_literals: false,
            ..Self::default()
        }
    }

    /// Load options from a JSON document; missing keys keep their defaults
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.inline_literals);
        assert!(options.pretty);
        assert_eq!(options.placeholder, Placeholder::Dollar);
    }

    #[test]
    fn test_from_json_partial() {
        let options = RenderOptions::from_json(r#"{"placeholder": "question_mark", "pretty": false}"#).unwrap();
        assert!(options.inline_literals);
        assert!(!options.pretty);
        assert_eq!(options.placeholder, Placeholder::QuestionMark);
    }

    #[test]
    fn test_from_json_rejects_unknown_placeholder() {
        assert!(RenderOptions::from_json(r#"{"placeholder": "colon"}"#).is_err());
    }
}

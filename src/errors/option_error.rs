use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionError {
    #[error("invalid option definition {subsystem}.{name}: {reason}")]
    ConfigDefect {
        subsystem: String,
        name: String,
        reason: String,
    },
    #[error("unknown option {subsystem}.{name}{}", render_suggestions(.suggestions))]
    UnknownOption {
        subsystem: String,
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<String>,
    },
}

fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    format!(" (did you mean: {}?)", suggestions.join(", "))
}

impl OptionError {
    pub fn defect(subsystem: &str, name: &str, reason: impl Into<String>) -> Self {
        OptionError::ConfigDefect {
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown(subsystem: &str, name: &str, suggestions: Vec<String>) -> Self {
        OptionError::UnknownOption {
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            suggestions,
        }
    }

    pub fn is_defect(&self) -> bool {
        matches!(self, OptionError::ConfigDefect { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, OptionError::UnknownOption { .. })
    }
}

//! Editor configuration
//!
//! Configuration is plain serde data so hosts can ship it as JSON (from
//! JavaScript) or YAML (from a file). Every field has a default, so an empty
//! document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::clipboard::StyleRule;
use crate::errors::{EditorError, Result};
use crate::models::{HeadingLevel, InlineMark, StyleToken, Tag};

/// CSS class names used to render style tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub heading1: String,
    pub heading2: String,
    pub bold: String,
    pub italic: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            heading1: "header1-text".to_string(),
            heading2: "header2-text".to_string(),
            bold: "bold-text".to_string(),
            italic: "italic-text".to_string(),
        }
    }
}

impl ClassNames {
    pub fn class_for(&self, token: StyleToken) -> &str {
        match token {
            StyleToken::Heading1 => &self.heading1,
            StyleToken::Heading2 => &self.heading2,
            StyleToken::Bold => &self.bold,
            StyleToken::Italic => &self.italic,
        }
    }

    /// Map a class name back to its token
    pub fn token_for(&self, class: &str) -> Option<StyleToken> {
        [
            StyleToken::Heading1,
            StyleToken::Heading2,
            StyleToken::Bold,
            StyleToken::Italic,
        ]
        .into_iter()
        .find(|token| self.class_for(*token) == class)
    }

    pub fn heading_class(&self, level: HeadingLevel) -> &str {
        self.class_for(level.token())
    }

    pub fn mark_class(&self, mark: InlineMark) -> &str {
        self.class_for(mark.token())
    }
}

/// Tag names never treated as a toggle target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuralContainers(Vec<String>);

impl Default for StructuralContainers {
    fn default() -> Self {
        Self(vec!["div".to_string()])
    }
}

impl StructuralContainers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.as_ref().trim().to_ascii_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Parse the comma-separated form (`"div,p"`)
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.iter().any(|name| name == tag.name())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub structural_containers: StructuralContainers,
    pub class_names: ClassNames,
    /// Rules applied after the default stylesheet
    pub stylesheet: Vec<StyleRule>,
    /// Use only `stylesheet`, dropping the built-in rules
    pub replace_default_stylesheet: bool,
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_containers_parse() {
        let containers = StructuralContainers::parse(" DIV, p ,,");
        assert_eq!(containers.names(), &["div".to_string(), "p".to_string()]);
        assert!(containers.contains(&Tag::Div));
        assert!(containers.contains(&Tag::Paragraph));
        assert!(!containers.contains(&Tag::Span));
    }

    #[test]
    fn test_class_names_round_trip() {
        let classes = ClassNames::default();
        assert_eq!(classes.class_for(StyleToken::Bold), "bold-text");
        assert_eq!(classes.token_for("header2-text"), Some(StyleToken::Heading2));
        assert_eq!(classes.token_for("unknown"), None);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }
}

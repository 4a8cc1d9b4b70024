//! Style tokens and the actions that request them

use serde::{Deserialize, Serialize};

use super::node::{HeadingLevel, InlineMark};

/// A named visual treatment attached to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleToken {
    Heading1,
    Heading2,
    Bold,
    Italic,
}

impl StyleToken {
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            StyleToken::Heading1 => Some(HeadingLevel::H1),
            StyleToken::Heading2 => Some(HeadingLevel::H2),
            _ => None,
        }
    }

    pub fn mark(self) -> Option<InlineMark> {
        match self {
            StyleToken::Bold => Some(InlineMark::Bold),
            StyleToken::Italic => Some(InlineMark::Italic),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// Parse the action names used by toolbars (`heading-1`, `bold`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "heading-1" | "h1" => Some(StyleToken::Heading1),
            "heading-2" | "h2" => Some(StyleToken::Heading2),
            "bold" => Some(StyleToken::Bold),
            "italic" => Some(StyleToken::Italic),
            _ => None,
        }
    }
}

/// A requested style change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAction {
    pub token: StyleToken,
    /// Member of the mutually-exclusive heading group
    pub is_heading: bool,
}

impl StyleAction {
    pub fn new(token: StyleToken) -> Self {
        Self {
            token,
            is_heading: token.is_heading(),
        }
    }

    pub fn heading1() -> Self {
        Self::new(StyleToken::Heading1)
    }

    pub fn heading2() -> Self {
        Self::new(StyleToken::Heading2)
    }

    pub fn bold() -> Self {
        Self::new(StyleToken::Bold)
    }

    pub fn italic() -> Self {
        Self::new(StyleToken::Italic)
    }
}

impl From<StyleToken> for StyleAction {
    fn from(token: StyleToken) -> Self {
        Self::new(token)
    }
}

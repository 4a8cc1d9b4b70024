//! Effective style resolution
//!
//! Clipboard fragments carry literal values for a fixed allow-list of text
//! appearance properties, so the pasted content looks the same without the
//! editor's stylesheet. [`CascadeStyleResolver`] computes those values from
//! a small stylesheet of tag and class rules.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{ClassNames, EditorConfig};
use crate::models::{DocumentTree, NodeId};

/// Properties copied onto clipboard clones, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    FontStyle,
    FontVariant,
    FontWeight,
    FontStretch,
    FontSize,
    LineHeight,
    FontFamily,
    Color,
    BackgroundColor,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 9] = [
        StyleProperty::FontStyle,
        StyleProperty::FontVariant,
        StyleProperty::FontWeight,
        StyleProperty::FontStretch,
        StyleProperty::FontSize,
        StyleProperty::LineHeight,
        StyleProperty::FontFamily,
        StyleProperty::Color,
        StyleProperty::BackgroundColor,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::FontStyle => "font-style",
            StyleProperty::FontVariant => "font-variant",
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::FontStretch => "font-stretch",
            StyleProperty::FontSize => "font-size",
            StyleProperty::LineHeight => "line-height",
            StyleProperty::FontFamily => "font-family",
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background-color",
        }
    }

    /// Computed value before any rule applies
    pub fn initial_value(self) -> &'static str {
        match self {
            StyleProperty::FontStyle => "normal",
            StyleProperty::FontVariant => "normal",
            StyleProperty::FontWeight => "400",
            StyleProperty::FontStretch => "100%",
            StyleProperty::FontSize => "16px",
            StyleProperty::LineHeight => "normal",
            StyleProperty::FontFamily => "serif",
            StyleProperty::Color => "rgb(0, 0, 0)",
            StyleProperty::BackgroundColor => "rgba(0, 0, 0, 0)",
        }
    }

    pub fn is_inherited(self) -> bool {
        !matches!(self, StyleProperty::BackgroundColor)
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Literal values for every allow-listed property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    values: BTreeMap<StyleProperty, String>,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        Self {
            values: StyleProperty::ALL
                .iter()
                .map(|p| (*p, p.initial_value().to_string()))
                .collect(),
        }
    }

    /// Style of a child of `parent` before the child's own rules apply
    pub fn inherit_from(parent: &ComputedStyle) -> Self {
        let mut style = Self::initial();
        for property in StyleProperty::ALL {
            if property.is_inherited() {
                style.set(property, parent.get(property));
            }
        }
        style
    }

    pub fn get(&self, property: StyleProperty) -> &str {
        self.values
            .get(&property)
            .map(String::as_str)
            .unwrap_or_else(|| property.initial_value())
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) {
        self.values.insert(property, value.into());
    }

    /// Inline `style` attribute value, properties in allow-list order
    pub fn to_inline_css(&self) -> String {
        let mut css = String::new();
        for property in StyleProperty::ALL {
            if !css.is_empty() {
                css.push(' ');
            }
            css.push_str(property.css_name());
            css.push_str(": ");
            css.push_str(self.get(property));
            css.push(';');
        }
        css
    }
}

/// Either a tag name (`h1`) or a class (`.bold-text`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Tag(String),
    Class(String),
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, String> {
        let selector = selector.trim();
        match selector.strip_prefix('.') {
            Some("") => Err("empty class selector".to_string()),
            Some(class) => Ok(Selector::Class(class.to_string())),
            None if selector.is_empty() => Err("empty selector".to_string()),
            None => Ok(Selector::Tag(selector.to_ascii_lowercase())),
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Selector::parse(&value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Tag(name) => name,
            Selector::Class(class) => format!(".{}", class),
        }
    }
}

/// One stylesheet rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: Selector,
    #[serde(default)]
    pub declarations: BTreeMap<StyleProperty, String>,
}

impl StyleRule {
    pub fn new(selector: Selector, declarations: &[(StyleProperty, &str)]) -> Self {
        Self {
            selector,
            declarations: declarations
                .iter()
                .map(|(p, v)| (*p, v.to_string()))
                .collect(),
        }
    }
}

// User-agent defaults for the heading tags
static USER_AGENT_RULES: Lazy<Vec<StyleRule>> = Lazy::new(|| {
    vec![
        StyleRule::new(
            Selector::Tag("h1".to_string()),
            &[
                (StyleProperty::FontSize, "32px"),
                (StyleProperty::FontWeight, "700"),
            ],
        ),
        StyleRule::new(
            Selector::Tag("h2".to_string()),
            &[
                (StyleProperty::FontSize, "24px"),
                (StyleProperty::FontWeight, "700"),
            ],
        ),
    ]
});

/// Built-in stylesheet for the given class names
pub fn default_stylesheet(classes: &ClassNames) -> Vec<StyleRule> {
    let mut rules = USER_AGENT_RULES.clone();
    rules.push(StyleRule::new(
        Selector::Class(classes.bold.clone()),
        &[(StyleProperty::FontWeight, "700")],
    ));
    rules.push(StyleRule::new(
        Selector::Class(classes.italic.clone()),
        &[(StyleProperty::FontStyle, "italic")],
    ));
    rules
}

/// Source of effective styles for tree nodes
pub trait StyleResolver {
    fn computed_style(&self, tree: &DocumentTree, node: NodeId) -> ComputedStyle;
}

/// Resolves styles by cascading a stylesheet from the root down
#[derive(Debug, Clone)]
pub struct CascadeStyleResolver {
    rules: Vec<StyleRule>,
    classes: ClassNames,
}

impl Default for CascadeStyleResolver {
    fn default() -> Self {
        let classes = ClassNames::default();
        Self {
            rules: default_stylesheet(&classes),
            classes,
        }
    }
}

impl CascadeStyleResolver {
    pub fn new(rules: Vec<StyleRule>, classes: ClassNames) -> Self {
        Self { rules, classes }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let mut rules = if config.replace_default_stylesheet {
            Vec::new()
        } else {
            default_stylesheet(&config.class_names)
        };
        rules.extend(config.stylesheet.iter().cloned());
        Self::new(rules, config.class_names.clone())
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    fn apply_rules(&self, tree: &DocumentTree, node: NodeId, style: &mut ComputedStyle) {
        let Some(element) = tree.element(node) else {
            return;
        };
        let classes: Vec<&str> = element
            .tokens()
            .into_iter()
            .map(|token| self.classes.class_for(token))
            .collect();

        // Tag rules first, then class rules, each in stylesheet order
        for rule in &self.rules {
            if matches!(&rule.selector, Selector::Tag(name) if name == element.tag.name()) {
                apply_declarations(rule, style);
            }
        }
        for rule in &self.rules {
            if matches!(&rule.selector, Selector::Class(class) if classes.contains(&class.as_str())) {
                apply_declarations(rule, style);
            }
        }
    }
}

fn apply_declarations(rule: &StyleRule, style: &mut ComputedStyle) {
    for (property, value) in &rule.declarations {
        style.set(*property, value.clone());
    }
}

impl StyleResolver for CascadeStyleResolver {
    fn computed_style(&self, tree: &DocumentTree, node: NodeId) -> ComputedStyle {
        let Some(element) = tree.element_container(node) else {
            return ComputedStyle::initial();
        };

        let mut path: Vec<NodeId> = tree.ancestors(element).collect();
        path.reverse();
        path.push(element);

        let mut style = ComputedStyle::initial();
        for node in path {
            let mut next = ComputedStyle::inherit_from(&style);
            self.apply_rules(tree, node, &mut next);
            style = next;
        }
        style
    }
}

//! Style rule synchronization.
//!
//! Projects the level catalog into a stylesheet: one `--color<level>`
//! custom property per level at document scope, and one
//! `.<prefix>-<level>` class rule setting the background to that property
//! and the text to the level's text color. Re-applying replaces earlier
//! rules instead of stacking duplicates.

use crate::error::StyleError;
use crate::levels::LevelCatalog;

/// Target for custom properties and class rules.
///
/// Not safe to drive from several threads without external locking; the
/// synchronizer assumes exclusive access for the duration of `apply`.
pub trait StyleSink {
    /// Set a document-scope custom property (name starts with `--`).
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError>;

    /// Index of the rule whose selector is exactly `selector`.
    fn rule_index(&self, selector: &str) -> Option<usize>;

    fn delete_rule(&mut self, index: usize);

    /// Parse and append `selector { prop: value; ... }`, returning its index.
    fn insert_rule(&mut self, rule: &str) -> Result<usize, StyleError>;
}

/// A parsed `selector { declarations }` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    /// Parse rule text.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidRule`] for missing braces, an invalid
    /// selector, or a declaration without `prop: value`.
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        let invalid = |reason: &str| StyleError::InvalidRule {
            rule: text.to_string(),
            reason: reason.to_string(),
        };

        let open = text.find('{').ok_or_else(|| invalid("missing '{'"))?;
        let body = text[open + 1..]
            .trim_end()
            .strip_suffix('}')
            .ok_or_else(|| invalid("missing '}'"))?;
        if body.contains('{') || body.contains('}') {
            return Err(invalid("nested braces"));
        }

        let selector = text[..open].trim();
        if !is_valid_selector(selector) {
            return Err(invalid("invalid selector"));
        }

        let mut declarations = Vec::new();
        for decl in body.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let (prop, value) = decl
                .split_once(':')
                .ok_or_else(|| invalid("declaration without ':'"))?;
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() || value.is_empty() {
                return Err(invalid("empty property or value"));
            }
            declarations.push((prop.to_string(), value.to_string()));
        }

        Ok(Self {
            selector: selector.to_string(),
            declarations,
        })
    }

    pub fn to_css(&self) -> String {
        let body: Vec<String> = self
            .declarations
            .iter()
            .map(|(prop, value)| format!("{prop}: {value};"))
            .collect();
        format!("{} {{ {} }}", self.selector, body.join(" "))
    }
}

/// `:root`-style pseudo selectors, or class selectors with a valid identifier.
fn is_valid_selector(selector: &str) -> bool {
    if let Some(class) = selector.strip_prefix('.') {
        return is_identifier(class);
    }
    if let Some(pseudo) = selector.strip_prefix(':') {
        return is_identifier(pseudo);
    }
    is_identifier(selector)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let body_ok = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    (first.is_ascii_alphabetic() || first == '_' || first == '-') && chars.all(body_ok)
}

/// In-memory stylesheet: root custom properties plus ordered rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    properties: Vec<(String, String)>,
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Number of rules with exactly this selector.
    pub fn count_selector(&self, selector: &str) -> usize {
        self.rules.iter().filter(|r| r.selector == selector).count()
    }

    /// Render as CSS text, `:root` block first.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if !self.properties.is_empty() {
            css.push_str(":root {\n");
            for (name, value) in &self.properties {
                css.push_str(&format!("  {name}: {value};\n"));
            }
            css.push_str("}\n");
        }
        for rule in &self.rules {
            css.push_str(&rule.to_css());
            css.push('\n');
        }
        css
    }
}

impl StyleSink for StyleSheet {
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        let valid_name = name
            .strip_prefix("--")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(is_name_char));
        if !valid_name {
            return Err(StyleError::InvalidProperty(name.to_string()));
        }

        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.properties.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn rule_index(&self, selector: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.selector == selector)
    }

    fn delete_rule(&mut self, index: usize) {
        if index < self.rules.len() {
            self.rules.remove(index);
        }
    }

    fn insert_rule(&mut self, rule: &str) -> Result<usize, StyleError> {
        let parsed = StyleRule::parse(rule)?;
        self.rules.push(parsed);
        Ok(self.rules.len() - 1)
    }
}

/// Keeps a sink in step with a level catalog.
#[derive(Debug, Clone)]
pub struct StyleSynchronizer {
    cell_class_prefix: String,
}

impl StyleSynchronizer {
    pub fn new(cell_class_prefix: impl Into<String>) -> Self {
        Self {
            cell_class_prefix: cell_class_prefix.into(),
        }
    }

    /// `--color<level>`
    pub fn property_name(level: u32) -> String {
        format!("--color{level}")
    }

    /// `.<prefix>-<level>`
    pub fn selector(&self, level: u32) -> String {
        format!(".{}-{}", self.cell_class_prefix, level)
    }

    /// Upsert the custom property and class rule for every catalog level.
    ///
    /// A rejected property or rule is logged and skipped; the remaining
    /// levels are still applied.
    pub fn apply(&self, catalog: &LevelCatalog, sink: &mut dyn StyleSink) {
        for level in &catalog.levels {
            let property = Self::property_name(level.level);
            if let Err(e) = sink.set_property(&property, &level.background_color) {
                tracing::warn!(level = level.level, error = %e, "failed to set color property");
            }

            let selector = self.selector(level.level);
            let rule = format!(
                "{selector} {{ background-color: var({property}); color: {}; }}",
                level.text_color
            );
            self.upsert_rule(sink, &selector, &rule);
        }
    }

    fn upsert_rule(&self, sink: &mut dyn StyleSink, selector: &str, rule: &str) {
        if let Some(index) = sink.rule_index(selector) {
            sink.delete_rule(index);
        }
        if let Err(e) = sink.insert_rule(rule) {
            tracing::warn!(%selector, error = %e, "error inserting style rule");
        }
    }
}

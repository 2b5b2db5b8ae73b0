//! RuleDefinition - A Wazuh detection rule
//!
//! Rules are either built from structured fields (and rendered as Wazuh
//! XML) or wrapped verbatim from an existing markup fragment.

use crate::domain::errors::DomainError;

/// Highest severity level Wazuh accepts
pub const MAX_RULE_LEVEL: u8 = 16;

/// A detection rule, carried with its prompt-ready markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    id: Option<String>,
    level: Option<u8>,
    decoded_as: Option<String>,
    description: Option<String>,
    markup: String,
    structured: bool,
}

impl RuleDefinition {
    /// Build a structured rule. `id` and `description` must be non-empty,
    /// `level` must be within the Wazuh range.
    pub fn new(
        id: impl Into<String>,
        level: u8,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into().trim().to_string();
        let description = description.into().trim().to_string();

        if id.is_empty() {
            return Err(DomainError::Validation("rule id must not be empty".into()));
        }
        if description.is_empty() {
            return Err(DomainError::Validation(format!(
                "rule {id} has an empty description"
            )));
        }
        if level > MAX_RULE_LEVEL {
            return Err(DomainError::Validation(format!(
                "rule {id} level {level} exceeds {MAX_RULE_LEVEL}"
            )));
        }

        let mut rule = Self {
            id: Some(id),
            level: Some(level),
            decoded_as: None,
            description: Some(description),
            markup: String::new(),
            structured: true,
        };
        rule.markup = rule.render();
        Ok(rule)
    }

    /// Attach a decoder hint (e.g. `json`). Markup-wrapped rules are left as is.
    pub fn with_decoded_as(mut self, decoder: impl Into<String>) -> Self {
        let decoder = decoder.into().trim().to_string();
        if self.structured && !decoder.is_empty() {
            self.decoded_as = Some(decoder);
            self.markup = self.render();
        }
        self
    }

    /// Wrap an existing markup fragment verbatim.
    ///
    /// `id` and `level` attributes are picked up when present; the text
    /// itself is never altered.
    pub fn from_markup(markup: impl Into<String>) -> Result<Self, DomainError> {
        let markup = markup.into();
        if markup.trim().is_empty() {
            return Err(DomainError::Validation(
                "rule markup must not be empty".into(),
            ));
        }

        Ok(Self {
            id: attribute(&markup, "id"),
            level: attribute(&markup, "level").and_then(|l| l.parse().ok()),
            decoded_as: element_text(&markup, "decoded_as"),
            description: element_text(&markup, "description"),
            markup,
            structured: false,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }

    pub fn decoded_as(&self) -> Option<&str> {
        self.decoded_as.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Text embedded in optimization prompts
    pub fn markup(&self) -> &str {
        &self.markup
    }

    fn render(&self) -> String {
        let mut out = format!(
            "<rule id=\"{}\" level=\"{}\">",
            escape_xml(self.id.as_deref().unwrap_or_default()),
            self.level.unwrap_or_default()
        );
        if let Some(decoder) = &self.decoded_as {
            out.push_str(&format!("<decoded_as>{}</decoded_as>", escape_xml(decoder)));
        }
        if let Some(description) = &self.description {
            out.push_str(&format!(
                "<description>{}</description>",
                escape_xml(description)
            ));
        }
        out.push_str("</rule>");
        out
    }
}

impl std::fmt::Display for RuleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.markup)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Attribute value from the opening tag, single or double quoted
fn attribute(markup: &str, name: &str) -> Option<String> {
    let start = markup.find('<')?;
    let end = markup[start..].find('>').map_or(markup.len(), |e| start + e);
    let prefix = format!("{name}=");

    markup[start..end].split_whitespace().find_map(|token| {
        let value = token.strip_prefix(&prefix)?;
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let inner = &value[1..];
        inner.find(quote).map(|close| inner[..close].to_string())
    })
}

fn element_text(markup: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = markup.find(&open)? + open.len();
    let len = markup[start..].find(&close)?;
    let text = markup[start..start + len].trim();
    (!text.is_empty()).then(|| text.to_string())
}

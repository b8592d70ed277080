//! Message categories, display templates, and embed rendering.
//!
//! Each [`Category`] maps to a fixed (title, color, marker) template.
//! Rendering turns a [`Notification`] into the Discord embed wire structure
//! with a deterministic field order: timestamp first, then details when
//! given, then metadata entries in insertion order.

use indexmap::IndexMap;

/// Placeholder used when no project name is supplied.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Footer text attached to every structured embed.
pub const FOOTER_TEXT: &str = "taskping notifications";

const TIMESTAMP_LABEL: &str = "📅 Timestamp";
const DETAILS_LABEL: &str = "📝 Details";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Known notification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TaskComplete,
    BuildComplete,
    UserDecision,
    Error,
}

impl Category {
    /// Map a category string to its variant.
    ///
    /// Unrecognized input never fails: it falls back to `TaskComplete` and
    /// logs a warning so a typo doesn't silently vanish.
    pub fn parse(input: &str) -> Self {
        match input {
            "task_complete" => Category::TaskComplete,
            "build_complete" => Category::BuildComplete,
            "user_decision" => Category::UserDecision,
            "error" => Category::Error,
            other => {
                tracing::warn!(
                    category = other,
                    "unknown notification category, falling back to task_complete"
                );
                Category::TaskComplete
            }
        }
    }

    /// The canonical wire spelling of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::TaskComplete => "task_complete",
            Category::BuildComplete => "build_complete",
            Category::UserDecision => "user_decision",
            Category::Error => "error",
        }
    }

    /// The fixed display template for this category.
    pub fn template(self) -> Template {
        match self {
            Category::TaskComplete => Template {
                title: "✅ Task Complete",
                color: 3_066_993, // green
                marker: "🎉",
            },
            Category::BuildComplete => Template {
                title: "🏗️ Build Complete",
                color: 3_447_003, // blue
                marker: "🚀",
            },
            Category::UserDecision => Template {
                title: "❓ Decision Needed",
                color: 15_844_367, // yellow
                marker: "⚠️",
            },
            Category::Error => Template {
                title: "❌ Error Occurred",
                color: 15_158_332, // red
                marker: "🚨",
            },
        }
    }
}

/// Fixed (title, color, marker) tuple associated with a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub title: &'static str,
    pub color: u32,
    pub marker: &'static str,
}

/// A metadata value with an explicit display rule.
///
/// Keeps the caller honest about what can appear in an embed field instead
/// of stringifying arbitrary values at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Str(s) => f.write_str(s),
            MetaValue::Int(i) => write!(f, "{i}"),
            MetaValue::Float(x) => write!(f, "{x}"),
            MetaValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

/// Input to a structured send: a category plus optional display fields.
///
/// Metadata entries render in insertion order.
#[derive(Debug, Clone)]
pub struct Notification {
    category: Category,
    project_name: Option<String>,
    details: Option<String>,
    metadata: IndexMap<String, MetaValue>,
}

impl Notification {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            project_name: None,
            details: None,
            metadata: IndexMap::new(),
        }
    }

    /// Project name shown in the embed description. Empty input keeps the
    /// [`DEFAULT_PROJECT_NAME`] placeholder.
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.project_name = Some(name);
        }
        self
    }

    /// Free-text details rendered as a non-inline field after the timestamp.
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Append a metadata entry. Re-inserting an existing label overwrites
    /// its value but keeps the original position.
    pub fn metadata(mut self, label: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(label.into(), value.into());
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Render this notification into a Discord embed.
    ///
    /// Builds a fresh [`Embed`] on every call. Field order is fixed:
    /// timestamp, details (when present), metadata in insertion order.
    pub fn render(&self) -> Embed {
        self.render_at(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    fn render_at(&self, timestamp: String) -> Embed {
        let template = self.category.template();
        let project = self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME);

        let mut fields = Vec::with_capacity(2 + self.metadata.len());
        fields.push(EmbedField {
            name: TIMESTAMP_LABEL.to_string(),
            value: timestamp,
            inline: true,
        });
        if let Some(ref details) = self.details {
            fields.push(EmbedField {
                name: DETAILS_LABEL.to_string(),
                value: details.clone(),
                inline: false,
            });
        }
        for (label, value) in &self.metadata {
            fields.push(EmbedField {
                name: format!("🔸 {label}"),
                value: value.to_string(),
                inline: true,
            });
        }

        Embed {
            title: template.title.to_string(),
            description: format!("{} **{project}**", template.marker),
            color: template.color,
            fields,
            footer: EmbedFooter {
                text: FOOTER_TEXT.to_string(),
            },
        }
    }
}

/// One labeled field inside an embed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// A fully rendered Discord embed, ready for serialization.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

/// Request body for a structured send: `{"embeds": [...]}`.
#[derive(Debug, serde::Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// Request body for a plain-text send: `{"content": "..."}`.
#[derive(Debug, serde::Serialize)]
pub struct SimplePayload<'a> {
    pub content: &'a str,
}

//! # Annotation Model
//!
//! Plain data describing typed spans over the raw text. Annotations are
//! immutable inputs to a render call: the caller creates them, the renderer
//! reads them, nothing is written back.
//!
//! The annotation type is a closed enum ([`AnnotationKind`]) so that tag,
//! format, containment and redaction logic all match exhaustively.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Style property → value overrides, emitted as the element's `style`
/// attribute in key order.
pub type Format = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("annotation {index} starts after it ends ({start} > {end})")]
    StartAfterEnd {
        index: usize,
        start: usize,
        end: usize,
    },
    #[error("annotation {index} ends at {end}, beyond text length {len}")]
    EndBeyondText { index: usize, end: usize, len: usize },
    #[error("annotation {index} has invalid tag name {tag:?}")]
    InvalidTag { index: usize, tag: String },
}

/// The three annotation kinds without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationType {
    Markup,
    Highlight,
    Redaction,
}

impl AnnotationType {
    /// Class token identifying the type on rendered elements.
    pub fn class_token(self) -> &'static str {
        match self {
            AnnotationType::Markup => "annotation-markup",
            AnnotationType::Highlight => "annotation-highlight",
            AnnotationType::Redaction => "annotation-redaction",
        }
    }

    pub fn default_tag(self) -> &'static str {
        match self {
            AnnotationType::Markup | AnnotationType::Redaction => "span",
            AnnotationType::Highlight => "mark",
        }
    }

    /// Style applied before any caller `format` overrides.
    pub fn default_format(self) -> Format {
        let pairs: &[(&str, &str)] = match self {
            AnnotationType::Markup => &[],
            AnnotationType::Highlight => &[("background-color", "yellow")],
            AnnotationType::Redaction => &[("background-color", "black"), ("color", "white")],
        };
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }
}

/// Payload carried only by redactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    /// Replacement text displayed in place of the raw span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Fixed display width in chars. Defaults to `max(span len, content len)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationKind {
    Markup,
    Highlight,
    Redaction(Redaction),
}

impl AnnotationKind {
    pub fn ty(&self) -> AnnotationType {
        match self {
            AnnotationKind::Markup => AnnotationType::Markup,
            AnnotationKind::Highlight => AnnotationType::Highlight,
            AnnotationKind::Redaction(_) => AnnotationType::Redaction,
        }
    }
}

/// Optional element metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Custom element tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Extra class token appended after the type class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Stable external id, emitted as `data-id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A typed half-open interval `[start, end)` over the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub kind: AnnotationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Annotation {
    pub fn new(start: usize, end: usize, kind: AnnotationKind) -> Self {
        Self {
            start,
            end,
            kind,
            format: None,
            meta: None,
        }
    }

    pub fn markup(start: usize, end: usize) -> Self {
        Self::new(start, end, AnnotationKind::Markup)
    }

    pub fn highlight(start: usize, end: usize) -> Self {
        Self::new(start, end, AnnotationKind::Highlight)
    }

    pub fn redaction(start: usize, end: usize) -> Self {
        Self::new(start, end, AnnotationKind::Redaction(Redaction::default()))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(Meta::default).tag = Some(tag.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(Meta::default).class_name = Some(class_name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(Meta::default).id = Some(id.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.format
            .get_or_insert_with(Format::new)
            .insert(property.into(), value.into());
        self
    }

    /// Sets the replacement text. No-op on non-redactions.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        if let AnnotationKind::Redaction(r) = &mut self.kind {
            r.content = Some(content.into());
        }
        self
    }

    /// Sets the fixed display width. No-op on non-redactions.
    pub fn with_extent(mut self, extent: usize) -> Self {
        if let AnnotationKind::Redaction(r) = &mut self.kind {
            r.extent = Some(extent);
        }
        self
    }

    pub fn ty(&self) -> AnnotationType {
        self.kind.ty()
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Effective element tag: `meta.tag`, falling back to the type default.
    pub fn tag(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.tag.as_deref())
            .unwrap_or_else(|| self.ty().default_tag())
    }

    /// Type defaults with the caller's `format` laid over them.
    pub fn style(&self) -> Format {
        let mut style = self.ty().default_format();
        if let Some(format) = &self.format {
            style.extend(format.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        style
    }

    pub fn class_name(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.class_name.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.id.as_deref())
    }
}

fn tag_name_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("Invalid tag regex"))
}

/// Checks the render preconditions for `annotations` over a text of
/// `text_len` chars.
///
/// [`crate::render()`] assumes these hold and does not check them itself.
pub fn validate(text_len: usize, annotations: &[Annotation]) -> Result<(), AnnotationError> {
    for (index, a) in annotations.iter().enumerate() {
        if a.start > a.end {
            return Err(AnnotationError::StartAfterEnd {
                index,
                start: a.start,
                end: a.end,
            });
        }
        if a.end > text_len {
            return Err(AnnotationError::EndBeyondText {
                index,
                end: a.end,
                len: text_len,
            });
        }
        if !tag_name_regex().is_match(a.tag()) {
            return Err(AnnotationError::InvalidTag {
                index,
                tag: a.tag().to_string(),
            });
        }
    }
    Ok(())
}

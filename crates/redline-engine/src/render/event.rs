use crate::annotation::{AnnotationType, Format};
use crate::redaction::Warp;

/// Class token carried by every rendered annotation element.
pub const ANNOTATION_CLASS: &str = "annotation";
/// Attribute holding the raw offset where an element's content starts.
pub const ATTR_POSITION: &str = "data-position";
/// Attribute holding raw chars per rendered char inside an element.
pub const ATTR_WARP: &str = "data-warp";
/// Attribute holding the caller's stable annotation id.
pub const ATTR_ID: &str = "data-id";

/// Everything needed to emit one element's opening tag.
///
/// An annotation that gets split produces one `Opening` per piece, each with
/// its own `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    /// Index into the caller's annotation slice; `None` for synthesized
    /// paragraphs.
    pub source: Option<usize>,
    pub ty: AnnotationType,
    pub tag: String,
    pub class_name: Option<String>,
    pub id: Option<String>,
    pub style: Format,
    /// Raw offset of the first char inside this element. Fractional when
    /// the element resumes partway through a redaction's substitute.
    pub position: f64,
    pub warp: Warp,
}

impl Opening {
    /// Space separated class list: the shared token, the type token, then
    /// the caller's class.
    pub fn classes(&self) -> String {
        let mut classes = format!("{ANNOTATION_CLASS} {}", self.ty.class_token());
        if let Some(extra) = &self.class_name {
            classes.push(' ');
            classes.push_str(extra);
        }
        classes
    }

    /// Attributes in emission order: class, id, style, position, warp.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("class", self.classes())];
        if let Some(id) = &self.id {
            attrs.push((ATTR_ID, id.clone()));
        }
        if let Some(style) = self.style_attr() {
            attrs.push(("style", style));
        }
        attrs.push((ATTR_POSITION, self.position.to_string()));
        attrs.push((ATTR_WARP, self.warp.to_string()));
        attrs
    }

    /// Inline style declaration, `None` when there is nothing to set.
    pub fn style_attr(&self) -> Option<String> {
        if self.style.is_empty() {
            return None;
        }
        let decls: Vec<String> = self
            .style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect();
        Some(decls.join("; "))
    }
}

/// One step of rendered output. Text is stored unescaped.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupEvent {
    Open(Opening),
    Close { tag: String },
    Text(String),
}

/// Appends text, merging into a trailing `Text` event.
pub(crate) fn push_text(events: &mut Vec<MarkupEvent>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(MarkupEvent::Text(last)) = events.last_mut() {
        last.push_str(text);
    } else {
        events.push(MarkupEvent::Text(text.to_string()));
    }
}

/// Serializes events to a markup string.
pub fn write_markup(events: &[MarkupEvent]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            MarkupEvent::Open(opening) => write_open(&mut out, opening),
            MarkupEvent::Close { tag } => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            MarkupEvent::Text(text) => {
                html_escape::encode_text_to_string(text, &mut out);
            }
        }
    }
    out
}

fn write_open(out: &mut String, opening: &Opening) {
    out.push('<');
    out.push_str(&opening.tag);
    for (name, value) in opening.attributes() {
        write_attr(out, name, &value);
    }
    out.push('>');
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    html_escape::encode_double_quoted_attribute_to_string(value, out);
    out.push('"');
}

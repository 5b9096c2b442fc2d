// ABOUTME: Renderable text primitives distinguishing plain from pre-escaped strings
// ABOUTME: Implements HTML escaping and the escape-expression rules used by templates

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Text headed for a template, tagged with whether it still needs escaping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderableText {
    /// Escaped on render
    Plain(String),
    /// Emitted verbatim on render
    PreEscaped(String),
}

impl RenderableText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn pre_escaped(text: impl Into<String>) -> Self {
        Self::PreEscaped(text.into())
    }

    /// The underlying text, before any escaping
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::PreEscaped(text) => text,
        }
    }

    pub fn into_inner(self) -> String {
        match self {
            Self::Plain(text) | Self::PreEscaped(text) => text,
        }
    }

    pub fn is_pre_escaped(&self) -> bool {
        matches!(self, Self::PreEscaped(_))
    }

    /// Transform the underlying text, keeping the variant
    pub fn map(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            Self::Plain(text) => Self::Plain(f(&text)),
            Self::PreEscaped(text) => Self::PreEscaped(f(&text)),
        }
    }

    /// Escape plain text, pass pre-escaped text through unchanged
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Plain(text) => Cow::Owned(escape_html(text)),
            Self::PreEscaped(text) => Cow::Borrowed(text),
        }
    }
}

impl From<String> for RenderableText {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<&str> for RenderableText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

// Comparing against a bare string looks at the underlying text only,
// whichever variant holds it.
impl PartialEq<str> for RenderableText {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RenderableText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for RenderableText {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<RenderableText> for str {
    fn eq(&self, other: &RenderableText) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<RenderableText> for &str {
    fn eq(&self, other: &RenderableText) -> bool {
        *self == other.as_str()
    }
}

impl fmt::Display for RenderableText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// HTML-escape a string the way Handlebars escapes `{{expression}}` output
pub fn escape_html(text: &str) -> String {
    handlebars::html_escape(text)
}

// Pre-escaped strings travel through the handlebars context wrapped in a
// pair of Unicode noncharacters. Plain input never carries them: they are
// stripped when values enter a `TemplateContext`.
pub(crate) const SAFE_OPEN: char = '\u{FDD0}';
pub(crate) const SAFE_CLOSE: char = '\u{FDD1}';

/// Wrap pre-escaped text so the output escaper passes it through
pub(crate) fn mark_pre_escaped(text: &str) -> String {
    let mut marked = String::with_capacity(text.len() + 6);
    marked.push(SAFE_OPEN);
    marked.push_str(&strip_markers(text));
    marked.push(SAFE_CLOSE);
    marked
}

/// Remove any marker characters
pub(crate) fn strip_markers(text: &str) -> String {
    text.replace([SAFE_OPEN, SAFE_CLOSE], "")
}

/// Recover the tagged text from a context string
pub(crate) fn unmark(text: &str) -> RenderableText {
    match text
        .strip_prefix(SAFE_OPEN)
        .and_then(|inner| inner.strip_suffix(SAFE_CLOSE))
    {
        Some(inner) if !inner.contains([SAFE_OPEN, SAFE_CLOSE]) => {
            RenderableText::PreEscaped(inner.to_string())
        }
        _ => RenderableText::Plain(strip_markers(text)),
    }
}

/// Escape function for the template registry: marked spans pass through,
/// everything else is HTML-escaped, markers never reach the output.
pub fn escape_output(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(SAFE_OPEN) {
        out.push_str(&escape_html(&rest[..start]));
        let after = &rest[start + SAFE_OPEN.len_utf8()..];
        match after.find(SAFE_CLOSE) {
            Some(end) => {
                out.push_str(&after[..end]);
                rest = &after[end + SAFE_CLOSE.len_utf8()..];
            }
            None => rest = after,
        }
    }
    out.push_str(&escape_html(rest));

    strip_markers(&out)
}

/// Render a dynamic value for template output.
///
/// Missing values, `null` and `false` become `""`; numbers (including `0`)
/// are emitted unescaped; strings are HTML-escaped; arrays and objects are
/// escaped as compact JSON.
pub fn escape_expression(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => escape_html(text),
        Some(other) => escape_html(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("foo<&\"'>"), "foo&lt;&amp;&quot;&#x27;&gt;");
        assert_eq!(escape_html("no markup"), "no markup");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_expression_strings() {
        assert_eq!(
            escape_expression(Some(&json!("foo<&\"'>"))),
            "foo&lt;&amp;&quot;&#x27;&gt;"
        );
        assert_eq!(escape_expression(Some(&json!(""))), "");
    }

    #[test]
    fn test_escape_expression_falsy_values() {
        assert_eq!(escape_expression(None), "");
        assert_eq!(escape_expression(Some(&Value::Null)), "");
        assert_eq!(escape_expression(Some(&json!(false))), "");
        assert_eq!(escape_expression(Some(&json!(0))), "0");
        assert_eq!(escape_expression(Some(&json!(true))), "true");
        assert_eq!(escape_expression(Some(&json!(1.5))), "1.5");
    }

    #[test]
    fn test_escape_expression_composites() {
        assert_eq!(
            escape_expression(Some(&json!(["<a>"]))),
            "[&quot;&lt;a&gt;&quot;]"
        );
        assert_eq!(escape_expression(Some(&json!({}))), "{}");
    }

    #[test]
    fn test_pre_escaped_is_not_escaped() {
        let safe = RenderableText::pre_escaped("foo<&\"'>");
        assert_eq!(safe.render(), "foo<&\"'>");
        assert_eq!(safe.to_string(), "foo<&\"'>");
        assert!(safe.is_pre_escaped());
    }

    #[test]
    fn test_plain_is_escaped() {
        let plain = RenderableText::plain("<b>");
        assert_eq!(plain.render(), "&lt;b&gt;");
        assert_eq!(plain.to_string(), "&lt;b&gt;");
        assert!(!plain.is_pre_escaped());
    }

    #[test]
    fn test_safe_string_equals_its_underlying_string() {
        let safe = RenderableText::pre_escaped("testing 1, 2, 3");
        assert!(safe == "testing 1, 2, 3");
        assert!("testing 1, 2, 3" == safe);
        assert!(safe == "testing 1, 2, 3".to_string());
        assert_eq!(safe.as_str(), "testing 1, 2, 3");
        assert_eq!(safe.into_inner(), "testing 1, 2, 3");
    }

    #[test]
    fn test_escape_output_passes_marked_spans() {
        let marked = mark_pre_escaped("<em>x</em>");
        assert_eq!(escape_output(&marked), "<em>x</em>");
        assert_eq!(
            escape_output(&format!("<b>{}</b>", marked)),
            "&lt;b&gt;<em>x</em>&lt;/b&gt;"
        );
        assert_eq!(escape_output("a < b"), "a &lt; b");
    }

    #[test]
    fn test_escape_output_drops_stray_markers() {
        let text = format!("{}<i>", SAFE_OPEN);
        assert_eq!(escape_output(&text), "&lt;i&gt;");
        let text = format!("<i>{}", SAFE_CLOSE);
        assert_eq!(escape_output(&text), "&lt;i&gt;");
    }

    #[test]
    fn test_unmark() {
        assert_eq!(
            unmark(&mark_pre_escaped("<p>")),
            RenderableText::pre_escaped("<p>")
        );
        assert_eq!(unmark("<p>"), RenderableText::plain("<p>"));
        assert_eq!(
            unmark(&format!("{}a{}b{}", SAFE_OPEN, SAFE_CLOSE, SAFE_CLOSE)),
            RenderableText::plain("ab")
        );
    }

    #[test]
    fn test_map_keeps_variant() {
        let mapped = RenderableText::pre_escaped(" <B> ").map(|t| t.trim().to_lowercase());
        assert_eq!(mapped, RenderableText::pre_escaped("<b>"));
        let mapped = RenderableText::plain("X").map(|t| t.to_lowercase());
        assert_eq!(mapped, RenderableText::plain("x"));
    }

    #[test]
    fn test_variant_matters_between_texts() {
        assert_ne!(RenderableText::plain("x"), RenderableText::pre_escaped("x"));
        assert_eq!(RenderableText::from("x"), RenderableText::plain("x"));
        assert_eq!(
            RenderableText::from("x".to_string()),
            RenderableText::plain("x")
        );
    }
}

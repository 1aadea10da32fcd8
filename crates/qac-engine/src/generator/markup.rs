//! Small HTML fragment builders shared by the generators.

use html_escape::encode_double_quoted_attribute;

pub fn wrap(tag: &str, body: &str) -> String {
    format!("<{tag}>{body}</{tag}>")
}

pub fn wrap_class(tag: &str, class: &str, body: &str) -> String {
    format!("<{tag} class=\"{class}\">{body}</{tag}>")
}

pub fn wrap_style(tag: &str, style: &str, body: &str) -> String {
    format!("<{tag} style=\"{style}\">{body}</{tag}>")
}

/// `<img>` tag; the size is only written when both dimensions are known.
pub fn image(source: &str, width: Option<u32>, height: Option<u32>) -> String {
    let source = encode_double_quoted_attribute(source);
    match (width, height) {
        (Some(width), Some(height)) => {
            format!("<img src=\"{source}\" width=\"{width}\" height=\"{height}\">")
        }
        _ => format!("<img src=\"{source}\">"),
    }
}

//! Prompt placeholder substitution.
//!
//! Prompts embed video titles and channel names inside double-quoted JSON
//! examples, so every substituted value gets its `"` characters escaped.
//! Braces that are not a known placeholder pass through untouched, which
//! lets templates contain literal JSON structure.

/// Replaces each `{key}` in `template` with the matching value, escaping
/// embedded double quotes in the value.
#[must_use]
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (key, value) in values {
        let escaped = value.replace('"', "\\\"");
        out = out.replace(&format!("{{{key}}}"), &escaped);
    }
    out
}

/// Like [`render_template`] but without quote escaping, for values placed
/// outside quoted JSON context (URLs in prose, pre-rendered JSON blocks).
#[must_use]
pub fn render_plain(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

//! Escaping utilities for embedding metadata in Nix source.
//!
//! Package metadata comes from PyPI and may contain anything: quotes in a
//! description, `${` in a homepage, a newline in a license string. Unescaped,
//! any of these either breaks parsing of the generated file or, worse,
//! turns into an antiquotation evaluated by Nix.
//!
//! All free-text values MUST go through [`escape_nix_string`] before being
//! placed between double quotes.

use regex::Regex;
use std::sync::LazyLock;

/// Plain Nix identifier, usable unquoted as an attribute name.
static NIX_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_'-]*$").expect("static regex"));

/// One segment of a Nix path literal such as `./requirements_generated.nix`.
static NIX_PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._+-]+$").expect("static regex"));

/// Words the Nix parser reserves; they match the identifier pattern but
/// cannot name an attribute unquoted.
const NIX_KEYWORDS: &[&str] = &[
    "assert", "else", "if", "in", "inherit", "let", "or", "rec", "then", "with",
];

/// Escape a string for inclusion inside a double-quoted Nix string.
///
/// # Examples
///
/// ```
/// use pypi2nix::render::escape::escape_nix_string;
///
/// assert_eq!(escape_nix_string(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_nix_string("${pkgs.evil}"), r"\${pkgs.evil}");
/// assert_eq!(escape_nix_string("safe text"), "safe text");
/// ```
pub fn escape_nix_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '$' if chars.peek() == Some(&'{') => result.push_str("\\$"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result
}

/// Flatten text for a `#` line comment.
///
/// Line breaks would end the comment and leak the rest into the expression.
pub fn sanitize_comment(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Check whether `s` can be used as an unquoted attribute name.
pub fn is_nix_identifier(s: &str) -> bool {
    NIX_IDENTIFIER.is_match(s) && !NIX_KEYWORDS.contains(&s)
}

/// Check whether `s` is a dotted attribute path of identifiers, such as
/// `libxml2` or `xorg.libX11`.
pub fn is_nix_attr_path(s: &str) -> bool {
    s.split('.').all(is_nix_identifier)
}

/// Check whether `s` can follow `./` in a Nix path literal.
pub fn is_nix_path_segment(s: &str) -> bool {
    NIX_PATH_SEGMENT.is_match(s) && s != "." && s != ".."
}

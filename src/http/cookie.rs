//! Request cookies

use std::fmt;

/// A cookie to send with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            sanitize_name(&self.name),
            sanitize_value(&self.value)
        )
    }
}

/// Convert cookies to HTTP header format, after any existing `Cookie` value
pub fn cookies_to_header(existing: Option<&str>, cookies: &[Cookie]) -> String {
    let joined = cookies
        .iter()
        .map(Cookie::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    match existing {
        Some(existing) if !existing.is_empty() => format!("{}; {}", existing, joined),
        _ => joined,
    }
}

fn sanitize_name(name: &str) -> String {
    name.replace(['\r', '\n'], "-")
}

fn sanitize_value(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|c| matches!(*c, ' '..='~') && !matches!(*c, '"' | ';' | '\\'))
        .collect();
    if kept.contains([' ', ',']) {
        format!("\"{}\"", kept)
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::{cookies_to_header, Cookie};

    #[test]
    fn cookies_join_in_insertion_order() {
        let cookies = [Cookie::new("b", "2"), Cookie::new("a", "1")];
        assert_eq!(cookies_to_header(None, &cookies), "b=2; a=1");
    }

    #[test]
    fn cookies_append_to_existing_header() {
        let cookies = [Cookie::new("session", "xyz")];
        assert_eq!(
            cookies_to_header(Some("theme=dark"), &cookies),
            "theme=dark; session=xyz"
        );
    }

    #[test]
    fn invalid_value_bytes_are_dropped() {
        assert_eq!(Cookie::new("k", "a\"b;c\\d").to_string(), "k=abcd");
        assert_eq!(Cookie::new("k", "caf\u{e9}").to_string(), "k=caf");
    }

    #[test]
    fn values_with_space_or_comma_are_quoted() {
        assert_eq!(Cookie::new("k", "a b").to_string(), "k=\"a b\"");
        assert_eq!(Cookie::new("k", "a,b").to_string(), "k=\"a,b\"");
    }

    #[test]
    fn line_breaks_in_names_are_replaced() {
        assert_eq!(Cookie::new("a\r\nb", "v").to_string(), "a--b=v");
    }
}

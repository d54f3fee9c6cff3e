//! HTTP authentication utilities

use base64::Engine;

/// Authentication configured on a request.
///
/// A token and a login may both be configured; the token wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// `Authorization` header value for these credentials, if any.
    ///
    /// Empty tokens and empty logins count as unset.
    pub fn authorization(&self) -> Option<String> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Some(Auth::bearer_token(token));
        }
        self.login
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|login| Auth::basic_auth(login, self.password.as_deref().unwrap_or_default()))
    }
}

/// Authentication helper
pub struct Auth;

impl Auth {
    /// Create basic auth header value
    pub fn basic_auth(username: &str, password: &str) -> String {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Create bearer token header value
    pub fn bearer_token(token: &str) -> String {
        format!("Bearer {}", token)
    }
}

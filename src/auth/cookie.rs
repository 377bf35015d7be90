use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::SecurityConfig;

pub const SESSION_COOKIE: &str = "token";

/// Attributes shared by the session cookie and its expired replacement
#[derive(Clone, Debug)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: &'static str,
    pub max_age_secs: i64,
}

impl CookiePolicy {
    pub fn from_config(security: &SecurityConfig) -> Self {
        Self {
            secure: security.cookie_secure,
            same_site: security.cookie_same_site.as_str(),
            max_age_secs: security.session_ttl_secs,
        }
    }

    fn attributes(&self) -> String {
        let mut attrs = format!("HttpOnly; Path=/; SameSite={}", self.same_site);
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value carrying a freshly issued token
    pub fn session(&self, token: &str) -> String {
        format!(
            "{}={}; Max-Age={}; {}",
            SESSION_COOKIE,
            token,
            self.max_age_secs,
            self.attributes()
        )
    }

    /// `Set-Cookie` value that makes the client discard its token
    pub fn revoked(&self) -> String {
        format!(
            "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
            SESSION_COOKIE,
            self.attributes()
        )
    }
}

/// Read a named cookie from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value: &HeaderValue| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().trim_matches('"').to_string())
        })
        .next()
}

/// The session token carried by the request, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, SESSION_COOKIE).filter(|token| !token.is_empty())
}

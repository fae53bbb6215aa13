//! Browser session credentials: the CSRF token and the cookie jar.
//!
//! Nothing here logs in. The token and cookies are copied out of a logged-in
//! browser session and replayed on every request.

use crate::config::ConnectionConfig;
use crate::source::FetchError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    csrf_token: String,
    cookies: Vec<(String, String)>,
}

impl Session {
    /// Build a session from a token and a `name=value; name2=value2` line.
    pub fn new(csrf_token: impl Into<String>, cookie_line: &str) -> Result<Self, FetchError> {
        Ok(Self {
            csrf_token: csrf_token.into(),
            cookies: parse_cookies(cookie_line)?,
        })
    }

    /// Build a session from the first line of a cookie file.
    pub fn from_cookie_file(csrf_token: impl Into<String>, path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path)?;
        let line = content
            .lines()
            .next()
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| FetchError::InvalidCookie(format!("{} is empty", path.display())))?;
        Self::new(csrf_token, line)
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    /// Cookies re-joined into a single `cookie` header value.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Headers a mobile browser sends to the private endpoints.
    pub fn headers(&self, config: &ConnectionConfig) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        insert(&mut headers, "origin", config.base_url.trim_end_matches('/'))?;
        insert(&mut headers, "accept-language", &config.accept_language)?;
        insert(&mut headers, "lang", "en")?;
        insert(&mut headers, "pragma", "no-cache")?;
        insert(&mut headers, "accept", "*/*")?;
        insert(&mut headers, "cache-control", "no-cache")?;
        if let Some(authority) = config.authority() {
            insert(&mut headers, "authority", &authority)?;
        }
        insert(&mut headers, "dnt", "1")?;
        insert(&mut headers, "clienttype", "web")?;
        insert(&mut headers, "csrftoken", &self.csrf_token)?;
        if !self.cookies.is_empty() {
            insert(&mut headers, "cookie", &self.cookie_header())?;
        }
        Ok(headers)
    }
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<(), FetchError> {
    let value = HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader { name })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Split a cookie line into ordered `(name, value)` pairs.
///
/// Values may contain `=`; only the first one separates name from value.
/// A repeated name keeps its first position and takes the later value.
pub fn parse_cookies(line: &str) -> Result<Vec<(String, String)>, FetchError> {
    let mut cookies: Vec<(String, String)> = Vec::new();
    for segment in line.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (name, value) = segment
            .split_once('=')
            .ok_or_else(|| FetchError::InvalidCookie(segment.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::InvalidCookie(segment.to_string()));
        }
        let value = value.trim().to_string();
        match cookies.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value,
            None => cookies.push((name.to_string(), value)),
        }
    }
    Ok(cookies)
}

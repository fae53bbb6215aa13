//! Opaque transaction records and the endpoint page envelope.

use crate::source::FetchError;
use serde::Deserialize;

/// One trade, deposit, or withdrawal as returned by the server.
///
/// Field order is the server's order (serde_json is built with
/// `preserve_order`), which later becomes the CSV column order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Response envelope shared by the trade and money log endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    /// Total page count reported by the server. Only the first page is ever
    /// requested.
    #[serde(default)]
    pub pages: Option<u64>,
    pub data: Vec<Record>,
}

impl RecordPage {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// True when the server says there is more than the page we got.
    pub fn is_truncated(&self) -> bool {
        self.pages.is_some_and(|p| p > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_and_keeps_field_order() {
        let page = RecordPage::from_json(
            r#"{"pages":1,"data":[{"time":1,"symbol":"ETHBTC","side":"BUY","price":"0.1"}]}"#,
        )
        .unwrap();
        assert_eq!(page.pages, Some(1));
        let keys: Vec<&str> = page.data[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["time", "symbol", "side", "price"]);
        assert!(!page.is_truncated());
    }

    #[test]
    fn missing_pages_is_tolerated() {
        let page = RecordPage::from_json(r#"{"data":[]}"#).unwrap();
        assert_eq!(page.pages, None);
        assert!(page.data.is_empty());
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        let err = RecordPage::from_json(r#"{"pages":3}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn html_login_page_is_a_decode_error() {
        let err = RecordPage::from_json("<html>please log in</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn multi_page_response_is_truncated() {
        let page = RecordPage::from_json(r#"{"pages":4,"data":[]}"#).unwrap();
        assert!(page.is_truncated());
    }
}

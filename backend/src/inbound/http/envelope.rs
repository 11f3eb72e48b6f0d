//! Success response envelope.
//!
//! Every successful endpoint answers `{success, message?, data?,
//! pagination?}`; the error side of the same envelope is produced by the
//! [`crate::domain::Error`] serializer. Clients branch on `success` alone.

use pagination::{Page, PageInfo};
use serde::Serialize;

/// Success envelope wrapping response data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,
    /// Human-readable outcome description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Page metadata for listing endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T: Serialize> Envelope<T> {
    /// Data-only envelope.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
        }
    }

    /// Envelope with a message and payload.
    pub fn message_and_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            pagination: None,
        }
    }
}

impl Envelope<()> {
    /// Message-only envelope, for operations with nothing to return.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            pagination: None,
        }
    }
}

impl<T: Serialize> From<Page<T>> for Envelope<Vec<T>> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(page.items),
            pagination: Some(page.info),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use pagination::PageRequest;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn data_envelope_omits_absent_fields() {
        let value = serde_json::to_value(Envelope::data(json!({ "id": 1 }))).expect("encodes");
        assert_eq!(value.get("success"), Some(&Value::Bool(true)));
        assert!(value.get("message").is_none());
        assert!(value.get("pagination").is_none());
    }

    #[rstest]
    fn page_envelope_carries_pagination_metadata() {
        let page = Page::new(vec![1, 2, 3], 7, PageRequest::try_new(1, 3).expect("valid"));
        let value = serde_json::to_value(Envelope::from(page)).expect("encodes");
        assert_eq!(value.pointer("/pagination/total"), Some(&json!(7)));
        assert_eq!(value.pointer("/pagination/pages"), Some(&json!(3)));
        assert_eq!(value.pointer("/pagination/limit"), Some(&json!(3)));
        assert_eq!(
            value.get("data").and_then(Value::as_array).map(Vec::len),
            Some(3)
        );
    }
}

//! JSON envelopes: post payloads and RFC 7807 problem documents.

use serde::{Deserialize, Serialize};

/// Successful JSON body. Lists also carry their length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { data, count: None }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            data: items,
        }
    }
}

/// RFC 7807 Problem Details.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// Problem with the standard reason phrase for `status` as its title.
    pub fn for_status(status: u16) -> Self {
        let title = match status {
            403 => "Forbidden",
            404 => "Not Found",
            _ => "Internal Server Error",
        };

        Self {
            error_type: "about:blank".to_string(),
            title: title.to_string(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn forbidden() -> Self {
        Self::for_status(403).with_detail("You do not have permission to access this page.")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::for_status(404).with_detail(detail)
    }

    /// Carries no detail; the cause is only logged server-side.
    pub fn internal_error() -> Self {
        Self::for_status(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_carries_count() {
        let body = serde_json::to_value(ApiResponse::list(vec!["a", "b"])).unwrap();

        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][1], "b");
    }

    #[test]
    fn test_single_item_omits_count() {
        let body = serde_json::to_value(ApiResponse::ok("a")).unwrap();

        assert!(body.get("count").is_none());
    }

    #[test]
    fn test_problem_document_shape() {
        let body = serde_json::to_value(ErrorResponse::not_found("Post with id 3 not found"))
            .unwrap();

        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["title"], "Not Found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "Post with id 3 not found");

        let internal = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert!(internal.get("detail").is_none());
    }
}

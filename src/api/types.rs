use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            total_count: None,
        }
    }

    /// A page of results together with the number of matches across all pages.
    pub fn page(message: impl Into<String>, data: T, total_count: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            total_count: Some(total_count),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            total_count: None,
        }
    }

    /// Failure envelope that still carries details, e.g. field errors.
    pub fn error_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            total_count: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            total_count: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub database: bool,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::<()>::error("Role not found")).unwrap();
        assert_eq!(body, json!({"success": false, "message": "Role not found"}));
    }

    #[test]
    fn page_uses_camel_case_total() {
        let body = serde_json::to_value(ApiResponse::page("Successfully.", vec![1, 2], 7)).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "Successfully.", "data": [1, 2], "totalCount": 7})
        );
    }
}

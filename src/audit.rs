/// 감사 로그 (Audit Trail)
///
/// Admin mutations and login attempts each produce one `AuditLog` entry,
/// written to the structured log under the `audit` target.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

fn rfc3339<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&dt.to_rfc3339())
}

/// 감사 로그 항목
#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    pub log_id: String,
    #[serde(serialize_with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    /// CREATE, UPDATE, DELETE, LOGIN ...
    pub action: String,
    /// product, testimonial, portfolio_item, contact_request, user
    pub resource_type: String,
    pub resource_id: Option<String>,
    /// Acting admin (token subject); absent for logins
    pub user_id: Option<String>,
    /// SUCCESS or FAILURE
    pub status: String,
    pub message: String,
}

impl AuditLog {
    pub fn new(action: &str, resource_type: &str, status: &str, message: impl Into<String>) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: None,
            user_id: None,
            status: status.to_string(),
            message: message.into(),
        }
    }

    pub fn success(action: &str, resource_type: &str, message: impl Into<String>) -> Self {
        Self::new(action, resource_type, "SUCCESS", message)
    }

    pub fn failure(action: &str, resource_type: &str, message: impl Into<String>) -> Self {
        Self::new(action, resource_type, "FAILURE", message)
    }

    pub fn with_resource_id(mut self, id: impl ToString) -> Self {
        self.resource_id = Some(id.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn record(&self) {
        tracing::info!(
            target: "audit",
            log_id = %self.log_id,
            action = %self.action,
            resource_type = %self.resource_type,
            resource_id = ?self.resource_id,
            user_id = ?self.user_id,
            status = %self.status,
            "{}",
            self.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_optional_fields() {
        let log = AuditLog::success("DELETE", "product", "Product deleted")
            .with_resource_id(12)
            .with_user_id("3");

        assert_eq!(log.status, "SUCCESS");
        assert_eq!(log.resource_id.as_deref(), Some("12"));
        assert_eq!(log.user_id.as_deref(), Some("3"));
    }

    #[test]
    fn failure_entries_serialize_without_ids() {
        let log = AuditLog::failure("LOGIN", "user", "Invalid credentials");
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["status"], "FAILURE");
        assert!(json["resource_id"].is_null());
        assert!(json["user_id"].is_null());
        log.record();
    }
}

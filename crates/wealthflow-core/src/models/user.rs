use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by `/auth/me` and `/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expires_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Full name when set, otherwise the email address
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Result of the credential exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_parses_backend_payload() {
        let json = r#"{
            "email": "a@b.com",
            "full_name": null,
            "is_active": true,
            "is_superuser": false,
            "id": 1,
            "subscription_tier": "free",
            "subscription_expires_at": null,
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.subscription_tier.as_deref(), Some("free"));
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn test_register_request_omits_missing_name() {
        let req = RegisterRequest {
            email: "a@b.com".into(),
            password: "pw".into(),
            full_name: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("full_name").is_none());
    }
}

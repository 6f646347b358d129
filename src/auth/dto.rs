use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Request body for user registration. Profile fields feed the survey
/// prompt later and may be filled in after signup.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dob: Option<Date>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub work_style: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login, register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<Date>,
    pub occupation: Option<String>,
    pub work_style: Option<String>,
}

impl From<crate::auth::repo::User> for PublicUser {
    fn from(user: crate::auth::repo::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            gender: user.gender,
            dob: user.dob,
            occupation: user.occupation,
            work_style: user.work_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serialization() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Kim".to_string()),
            gender: Some("F".to_string()),
            dob: None,
            occupation: Some("nurse".to_string()),
            work_style: Some("shift".to_string()),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("nurse"));
        assert!(json.contains("id"));
    }

    #[test]
    fn register_request_profile_fields_are_optional() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":"longenough"}"#).unwrap();
        assert!(req.name.is_none());
        assert!(req.dob.is_none());
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::employees::repo::{Role, User};

/// Request body for creating an employee account.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for updating an employee. Absent fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Employee as returned by the list and update endpoints. The password hash
/// never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for EmployeeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response for a freshly created employee.
#[derive(Debug, Serialize)]
pub struct CreatedEmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            role: Role::Employee,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn employee_response_omits_password_hash() {
        let json = serde_json::to_value(EmployeeResponse::from(sample_user())).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.keys().all(|k| !k.to_lowercase().contains("password")));
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(json["role"], "employee");
        assert_eq!(json["email"], "ana@x.com");
    }

    #[test]
    fn employee_response_uses_camel_case_created_at() {
        let json = serde_json::to_value(EmployeeResponse::from(sample_user())).unwrap();
        let created_at = json["createdAt"].as_str().expect("createdAt string");
        assert!(created_at.contains('T'), "expected RFC 3339, got {created_at}");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn created_response_shape() {
        let user = sample_user();
        let response = CreatedEmployeeResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["role"], "employee");
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn update_request_fields_default_to_none() {
        let req: UpdateEmployeeRequest = serde_json::from_str(r#"{"name":"Bo"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Bo"));
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}

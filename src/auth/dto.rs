use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for registration. The wire format is camelCase, as submitted by
/// the site's signup form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub gender: String,
    pub subscribe: bool,
}

/// Request body for password change (authorized users only).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response returned by a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: String,
}

/// Full account view for the authenticated user. The password hash is never
/// part of any response type.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub subscribe: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_uses_camel_case_field_names() {
        let body = r#"{
            "firstName": "Ana",
            "lastName": "Srisuk",
            "email": "ana@x.com",
            "password": "pw1",
            "phoneNumber": "0812345678",
            "gender": "female",
            "subscribe": true
        }"#;
        let req: RegisterRequest = serde_json::from_str(body).expect("deserialize");
        assert_eq!(req.first_name, "Ana");
        assert_eq!(req.phone_number, "0812345678");
        assert!(req.subscribe);
    }

    #[test]
    fn request_bodies_reject_unknown_fields() {
        let body = r#"{"email":"a@x.com","password":"pw1","admin":true}"#;
        assert!(serde_json::from_str::<LoginRequest>(body).is_err());
    }

    #[test]
    fn request_bodies_reject_missing_fields() {
        let body = r#"{"email":"a@x.com"}"#;
        assert!(serde_json::from_str::<LoginRequest>(body).is_err());
    }

    #[test]
    fn token_response_serializes_the_token_field() {
        let json = serde_json::to_string(&TokenResponse {
            token: "abc.def.ghi".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"token":"abc.def.ghi"}"#);
    }

    #[test]
    fn account_response_is_snake_case() {
        let json = serde_json::to_string(&AccountResponse {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Srisuk".into(),
            email: "ana@x.com".into(),
            phone_number: "0812345678".into(),
            gender: "female".into(),
            subscribe: false,
        })
        .unwrap();
        assert!(json.contains(r#""first_name":"Ana""#));
        assert!(json.contains(r#""phone_number":"0812345678""#));
        assert!(!json.contains("password"));
    }
}

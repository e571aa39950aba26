use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser},
        jwt::JwtKeys,
        password,
    },
    employees::repo::User,
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login. Verifies the credential pair and issues a signed token
/// binding the user's id and role. An unknown email and a wrong password
/// produce the same answer.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(user) => user,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::repo::Role;
    use uuid::Uuid;

    #[test]
    fn login_response_exposes_no_credential_material() {
        let response = LoginResponse {
            token: "signed.jwt.token".into(),
            user: PublicUser {
                id: Uuid::new_v4(),
                name: "Ana".into(),
                email: "ana@x.com".into(),
                role: Role::Employee,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "signed.jwt.token");
        assert_eq!(json["user"]["email"], "ana@x.com");
        assert_eq!(json["user"]["role"], "employee");
        assert!(json["user"].get("password").is_none());
        assert!(json["user"].get("passwordHash").is_none());
    }
}

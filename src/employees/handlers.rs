use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{extractors::AdminUser, password},
    employees::{
        dto::{
            CreateEmployeeRequest, CreatedEmployeeResponse, EmployeeResponse,
            UpdateEmployeeRequest,
        },
        repo::{Role, User},
    },
    error::ApiError,
    state::AppState,
};

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", put(update_employee).delete(delete_employee))
}

#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    _: AdminUser,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let employees = User::list_employees(&state.db).await?;
    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<CreatedEmployeeResponse>), ApiError> {
    if payload.name.trim().is_empty() {
        warn!("employee name empty");
        return Err(ApiError::BadRequest("Name is required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    // Friendly check on the common path; the unique index on email still
    // backs it under concurrent writes.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already in use");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = password::hash_password(&payload.password)?;
    let employee =
        User::create(&state.db, &payload.name, &payload.email, &hash, Role::Employee).await?;

    info!(user_id = %employee.id, admin = %claims.sub, "employee created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedEmployeeResponse {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_employee(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest("Name is required".into()));
        }
    }
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            return Err(ApiError::BadRequest("Invalid email".into()));
        }
    }
    if let Some(password) = &payload.password {
        if password.len() < 8 {
            return Err(ApiError::BadRequest("Password too short".into()));
        }
    }

    // Re-hash only when a new password is supplied.
    let password_hash = match &payload.password {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };

    let employee = User::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        password_hash.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("Employee"))?;

    info!(user_id = %employee.id, admin = %claims.sub, "employee updated");
    Ok(Json(EmployeeResponse::from(employee)))
}

#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    // Tasks assigned to the deleted user stay in place.
    User::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    info!(user_id = %id, admin = %claims.sub, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two words@x.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password;
use crate::config::AdminConfig;

/// Closed set of roles. Admins manage accounts and tasks; employees only read
/// their own task list and move task status. No endpoint changes a role after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,      // unique user ID
    pub name: String,  // display name
    pub email: String, // unique, matched case-sensitively
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub role: Role,
    pub created_at: OffsetDateTime, // creation timestamp
}

impl User {
    /// Find a user by email (exact, case-sensitive match).
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// All employee accounts, newest first. Admin accounts are not listed.
    pub async fn list_employees(db: &PgPool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(Role::Employee)
        .fetch_all(db)
        .await
    }

    /// Create a user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
    }

    /// Merge the supplied fields into an existing user; `None` keeps the
    /// stored value. Returns `None` when the id is unknown.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(db)
        .await
    }

    /// Delete a user. Tasks assigned to them are left in place; their
    /// assignee resolves to null from then on.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Seed the well-known admin account if no user holds its email yet.
    /// Safe to run on every startup; losing the unique-index race to a
    /// concurrently starting process counts as already seeded.
    pub async fn ensure_default_admin(db: &PgPool, admin: &AdminConfig) -> anyhow::Result<()> {
        if User::find_by_email(db, &admin.email).await?.is_some() {
            debug!(email = %admin.email, "default admin already present");
            return Ok(());
        }

        let hash = password::hash_password(&admin.password)?;
        match User::create(db, "Admin", &admin.email, &hash, Role::Admin).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "default admin created");
                Ok(())
            }
            Err(sqlx::Error::Database(e))
                if matches!(e.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                debug!(email = %admin.email, "default admin seeded concurrently");
                Ok(())
            }
            Err(e) => Err(e).context("create default admin"),
        }
    }
}

//! Diesel row models for user persistence.

use super::schema::users;
use crate::user::domain::User;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewUserRow {
    /// Builds an insert row from the domain aggregate.
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

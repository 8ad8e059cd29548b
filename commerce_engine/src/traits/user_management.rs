use thiserror::Error;

use crate::db_types::{NewUser, User, UserId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserApiError {
    #[error("Email já cadastrado")]
    EmailExists,
    #[error("CPF/CNPJ já cadastrado")]
    DocumentExists,
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for UserApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// Behaviour backends must expose for user records.
///
/// Uniqueness on email and document number is enforced by the backend; [`UserManagement::insert_user`] reports a
/// violation as [`UserApiError::EmailExists`] or [`UserApiError::DocumentExists`]. Callers are still expected to
/// pre-check with the fetch methods so they can return friendly messages without relying on constraint errors.
#[allow(async_fn_in_trait)]
pub trait UserManagement: Clone {
    async fn insert_user(&self, user: NewUser) -> Result<User, UserApiError>;

    async fn fetch_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError>;

    /// Fetch by document number. The stored document is digits-only, so callers must normalize before querying.
    async fn fetch_user_by_document(&self, documento: &str) -> Result<Option<User>, UserApiError>;
}

use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewUser, User, UserId},
    traits::{UserApiError, UserManagement},
};

/// The `UserApi` provides a unified API for registering and looking up users.
pub struct UserApi<B> {
    db: B,
}

impl<B: Debug> Debug for UserApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserApi ({:?})", self.db)
    }
}

impl<B> UserApi<B>
where B: UserManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Register a new user.
    ///
    /// Email and document number are pre-checked so that callers get a friendly conflict message; the database's
    /// unique constraints remain the backstop for races between the check and the insert. Document validation is
    /// the caller's job, since CNPJ checks involve a registry lookup the engine does not perform.
    pub async fn register(&self, user: NewUser) -> Result<User, UserApiError> {
        if self.db.fetch_user_by_email(&user.email).await?.is_some() {
            return Err(UserApiError::EmailExists);
        }
        if self.db.fetch_user_by_document(&user.documento).await?.is_some() {
            return Err(UserApiError::DocumentExists);
        }
        let user = self.db.insert_user(user).await?;
        debug!("👤️ User {} has been registered", user.id);
        Ok(user)
    }

    pub async fn user_by_id(&self, id: &UserId) -> Result<Option<User>, UserApiError> {
        self.db.fetch_user_by_id(id).await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError> {
        self.db.fetch_user_by_email(email).await
    }

    /// Look up a user by their CPF or CNPJ. `documento` must be digits-only.
    pub async fn user_by_document(&self, documento: &str) -> Result<Option<User>, UserApiError> {
        self.db.fetch_user_by_document(documento).await
    }
}

use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewUser, User, UserId},
    traits::UserApiError,
};

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, UserApiError> {
    let id = UserId::random();
    let result = sqlx::query_as::<_, User>(
        r#"
            INSERT INTO users (
                id,
                nome_completo,
                email,
                telefone,
                documento,
                senha_hash,
                cep,
                rua,
                numero,
                bairro,
                cidade,
                estado,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *;
        "#,
    )
    .bind(id)
    .bind(user.nome_completo)
    .bind(user.email)
    .bind(user.telefone)
    .bind(user.documento)
    .bind(user.senha_hash)
    .bind(user.cep)
    .bind(user.rua)
    .bind(user.numero)
    .bind(user.bairro)
    .bind(user.cidade)
    .bind(user.estado)
    .bind(Utc::now())
    .fetch_one(conn)
    .await;
    match result {
        Ok(user) => {
            debug!("🗃️ User {} has been saved in the DB", user.id);
            Ok(user)
        },
        // The pre-checks in the API layer should make these unreachable, but races between them and the insert
        // still land here.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            if e.message().contains("users.email") {
                Err(UserApiError::EmailExists)
            } else {
                Err(UserApiError::DocumentExists)
            }
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_user_by_id(id: &UserId, conn: &mut SqliteConnection) -> Result<Option<User>, UserApiError> {
    let user =
        sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(id.as_str()).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, UserApiError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_document(
    documento: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, UserApiError> {
    let user =
        sqlx::query_as("SELECT * FROM users WHERE documento = $1").bind(documento).fetch_optional(conn).await?;
    Ok(user)
}

use chrono::Utc;
use log::trace;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{Cart, CartItem, UserId},
    traits::CartApiError,
};

/// Replace the cart for `user_id`, creating the row if it does not exist yet.
pub async fn upsert_cart(
    user_id: &UserId,
    items: Vec<CartItem>,
    conn: &mut SqliteConnection,
) -> Result<Cart, CartApiError> {
    let cart = sqlx::query_as(
        r#"
            INSERT INTO carts (user_id, items, updated_at) VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET items = excluded.items, updated_at = excluded.updated_at
            RETURNING *;
        "#,
    )
    .bind(user_id.clone())
    .bind(Json(items))
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    Ok(cart)
}

pub async fn fetch_cart(user_id: &UserId, conn: &mut SqliteConnection) -> Result<Option<Cart>, CartApiError> {
    let cart =
        sqlx::query_as("SELECT * FROM carts WHERE user_id = $1").bind(user_id.as_str()).fetch_optional(conn).await?;
    Ok(cart)
}

/// Delete the cart for `user_id`, returning whether a row was removed.
pub async fn delete_cart(user_id: &UserId, conn: &mut SqliteConnection) -> Result<bool, CartApiError> {
    let result = sqlx::query("DELETE FROM carts WHERE user_id = $1").bind(user_id.as_str()).execute(conn).await?;
    let deleted = result.rows_affected() > 0;
    trace!("🗃️ Cart for user {user_id} {}", if deleted { "deleted" } else { "was already absent" });
    Ok(deleted)
}

use chrono::Utc;
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatus, UserId},
    traits::OrderApiError,
};

/// Inserts a new order with `pendente` status and a freshly generated id. This is not atomic. You can embed this
/// call inside a transaction if you need atomicity, and pass `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderApiError> {
    let id = OrderId::random();
    let order = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (
                id,
                user_id,
                items,
                customer,
                address,
                payment,
                total,
                status,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(id)
    .bind(order.user_id)
    .bind(Json(order.items))
    .bind(Json(order.customer))
    .bind(Json(order.address))
    .bind(Json(order.payment))
    .bind(order.total)
    .bind(OrderStatus::Pending)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Order {} has been saved in the DB", order.id);
    Ok(order)
}

/// Update the order's status and payment reference. The snapshot columns are never touched here.
pub async fn update_order_payment(
    id: &OrderId,
    status: OrderStatus,
    payment_id: Option<String>,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET status = $2, payment_id = COALESCE($3, payment_id)
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(status)
    .bind(payment_id)
    .fetch_optional(conn)
    .await?;
    order.ok_or(OrderApiError::OrderNotFound)
}

pub async fn fetch_order(
    id: &OrderId,
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderApiError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
        .bind(id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// The user's orders, most recent first.
pub async fn fetch_orders_for_user(
    user_id: &UserId,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, OrderApiError> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2")
        .bind(user_id.as_str())
        .bind(limit)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

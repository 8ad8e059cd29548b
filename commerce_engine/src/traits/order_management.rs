use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderStatus, UserId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderApiError {
    #[error("Pedido não encontrado")]
    OrderNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// Behaviour backends must expose for order persistence.
///
/// The cart, customer and address snapshots on an order are immutable once inserted. Only the status and payment
/// reference change after insertion, via [`OrderManagement::update_order_payment`].
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    /// Persist a new order with `pendente` status and a freshly generated id.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;

    /// Update the status and, when given, the payment reference of an order. Returns the updated order.
    async fn update_order_payment(
        &self,
        id: &OrderId,
        status: OrderStatus,
        payment_id: Option<String>,
    ) -> Result<Order, OrderApiError>;

    /// Fetch an order scoped to its owner. Orders belonging to other users are invisible, not forbidden.
    async fn fetch_order(&self, id: &OrderId, user_id: &UserId) -> Result<Option<Order>, OrderApiError>;

    /// The user's orders, most recent first, capped at `limit`.
    async fn fetch_orders_for_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<Order>, OrderApiError>;
}

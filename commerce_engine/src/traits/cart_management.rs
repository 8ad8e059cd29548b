use thiserror::Error;

use crate::db_types::{Cart, CartItem, UserId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartApiError {
    #[error("Carrinho não encontrado")]
    CartNotFound,
    #[error("Item não encontrado no carrinho")]
    ItemNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// Behaviour backends must expose for cart persistence. Each user owns at most one cart, keyed on their user id.
#[allow(async_fn_in_trait)]
pub trait CartManagement: Clone {
    /// Replace the user's cart wholesale, creating it if absent.
    async fn replace_cart(&self, user_id: &UserId, items: Vec<CartItem>) -> Result<Cart, CartApiError>;

    async fn fetch_cart(&self, user_id: &UserId) -> Result<Option<Cart>, CartApiError>;

    /// Delete the user's cart. Returns `true` if a cart existed. Deleting an absent cart is not an error.
    async fn delete_cart(&self, user_id: &UserId) -> Result<bool, CartApiError>;

    /// Add an item to the cart, creating the cart if absent. If a line with the same product id already exists,
    /// the quantities are accumulated onto the existing line. The read-merge-write runs in one transaction.
    async fn add_cart_item(&self, user_id: &UserId, item: CartItem) -> Result<Cart, CartApiError>;

    /// Set the quantity of an existing line. A quantity of zero or less removes the line. Fails with
    /// [`CartApiError::CartNotFound`] if the user has no cart and [`CartApiError::ItemNotFound`] if no line
    /// matches `item_id`.
    async fn update_cart_item(&self, user_id: &UserId, item_id: &str, quantity: i64) -> Result<Cart, CartApiError>;
}

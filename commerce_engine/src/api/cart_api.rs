use std::fmt::Debug;

use crate::{
    db_types::{Cart, CartItem, UserId},
    traits::{CartApiError, CartManagement},
};

/// The `CartApi` provides a unified API for cart persistence. The merge semantics live in the backend so they can
/// run transactionally; this layer only provides the public surface.
pub struct CartApi<B> {
    db: B,
}

impl<B: Debug> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi ({:?})", self.db)
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Replace the user's cart wholesale.
    pub async fn save(&self, user_id: &UserId, items: Vec<CartItem>) -> Result<Cart, CartApiError> {
        self.db.replace_cart(user_id, items).await
    }

    /// The user's cart, or `None` if they have never saved one (or cleared it).
    pub async fn get(&self, user_id: &UserId) -> Result<Option<Cart>, CartApiError> {
        self.db.fetch_cart(user_id).await
    }

    /// Remove the user's cart entirely. Clearing an absent cart succeeds.
    pub async fn clear(&self, user_id: &UserId) -> Result<bool, CartApiError> {
        self.db.delete_cart(user_id).await
    }

    /// Add one item, accumulating quantity onto an existing line with the same product id.
    pub async fn add_item(&self, user_id: &UserId, item: CartItem) -> Result<Cart, CartApiError> {
        self.db.add_cart_item(user_id, item).await
    }

    /// Set the quantity of an existing line; zero or below removes it.
    pub async fn update_item(&self, user_id: &UserId, item_id: &str, quantity: i64) -> Result<Cart, CartApiError> {
        self.db.update_cart_item(user_id, item_id, quantity).await
    }
}

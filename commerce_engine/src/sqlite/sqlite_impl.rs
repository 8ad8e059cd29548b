//! `SqliteDatabase` is a concrete implementation of a commerce engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{carts, db_url, new_pool, orders, users};
use crate::{
    db_types::{Cart, CartItem, NewOrder, NewUser, Order, OrderId, OrderStatus, User, UserId},
    traits::{CartApiError, CartManagement, OrderApiError, OrderManagement, UserApiError, UserManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl UserManagement for SqliteDatabase {
    async fn insert_user(&self, user: NewUser) -> Result<User, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await
    }

    async fn fetch_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_id(id, &mut conn).await
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_email(email, &mut conn).await
    }

    async fn fetch_user_by_document(&self, documento: &str) -> Result<Option<User>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_document(documento, &mut conn).await
    }
}

impl CartManagement for SqliteDatabase {
    async fn replace_cart(&self, user_id: &UserId, items: Vec<CartItem>) -> Result<Cart, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let cart = carts::upsert_cart(user_id, items, &mut conn).await?;
        debug!("🗃️ Cart for user {user_id} replaced with {} line(s)", cart.items().len());
        Ok(cart)
    }

    async fn fetch_cart(&self, user_id: &UserId) -> Result<Option<Cart>, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::fetch_cart(user_id, &mut conn).await
    }

    async fn delete_cart(&self, user_id: &UserId) -> Result<bool, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::delete_cart(user_id, &mut conn).await
    }

    /// Reads the cart, merges the new item and writes the result back, all inside one transaction so that
    /// concurrent merges for the same user cannot silently drop a line.
    async fn add_cart_item(&self, user_id: &UserId, item: CartItem) -> Result<Cart, CartApiError> {
        let mut tx = self.pool.begin().await?;
        let mut items = carts::fetch_cart(user_id, &mut tx).await?.map(|c| c.items.0).unwrap_or_default();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item),
        }
        let cart = carts::upsert_cart(user_id, items, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Item added to cart for user {user_id}");
        Ok(cart)
    }

    async fn update_cart_item(&self, user_id: &UserId, item_id: &str, quantity: i64) -> Result<Cart, CartApiError> {
        let mut tx = self.pool.begin().await?;
        let mut items =
            carts::fetch_cart(user_id, &mut tx).await?.ok_or(CartApiError::CartNotFound)?.items.0;
        let pos = items.iter().position(|i| i.id == item_id).ok_or(CartApiError::ItemNotFound)?;
        if quantity <= 0 {
            items.remove(pos);
        } else {
            items[pos].quantity = quantity;
        }
        let cart = carts::upsert_cart(user_id, items, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Item {item_id} in cart for user {user_id} set to quantity {quantity}");
        Ok(cart)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn update_order_payment(
        &self,
        id: &OrderId,
        status: OrderStatus,
        payment_id: Option<String>,
    ) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::update_order_payment(id, status, payment_id, &mut conn).await?;
        debug!("🗃️ Order {} is now {}", order.id, order.status);
        Ok(order)
    }

    async fn fetch_order(&self, id: &OrderId, user_id: &UserId) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(id, user_id, &mut conn).await
    }

    async fn fetch_orders_for_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders_for_user(user_id, limit, &mut conn).await
    }
}

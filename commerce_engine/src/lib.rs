//! Commerce Engine
//!
//! The commerce engine contains the core logic for the storefront backend. It is transport-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly. Instead, use the public API provided by the engine. The exception is the data
//!    types used in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality of the engine. It is
//!    responsible for managing users, carts and the order checkout flow. Specific backends need to implement the
//!    traits in the [`mod@traits`] module in order to act as a backend for the commerce server.
mod api;
mod sqlite;

pub mod db_types;
pub mod helpers;
pub mod payments;
pub mod traits;

pub use api::{
    cart_api::CartApi,
    errors::OrderFlowError,
    order_flow_api::{CheckoutResult, OrderFlowApi},
    user_api::UserApi,
};
pub use sqlite::SqliteDatabase;
pub use traits::{CartApiError, CartManagement, OrderApiError, OrderManagement, UserApiError, UserManagement};

//! # Database management and control.
//!
//! This module defines the interface contracts that persistence *backends* must implement to power the commerce
//! server.
//!
//! * [`UserManagement`] covers user records, with uniqueness enforced on email and document number.
//! * [`CartManagement`] covers the one-cart-per-user model, including item merge semantics.
//! * [`OrderManagement`] covers order persistence and the post-dispatch status update.
//!
//! All methods suspend on I/O only; the traits carry no business rules beyond the per-record merge semantics of
//! carts, which must be applied inside a single backend transaction.
mod cart_management;
mod order_management;
mod user_management;

pub use cart_management::{CartApiError, CartManagement};
pub use order_management::{OrderApiError, OrderManagement};
pub use user_management::{UserApiError, UserManagement};

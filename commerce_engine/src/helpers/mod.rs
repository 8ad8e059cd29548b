//! Pure helper functions used across the engine and server.
mod documents;
mod shipping;

pub use documents::{digits_only, is_valid_cpf};
pub use shipping::shipping_fee;

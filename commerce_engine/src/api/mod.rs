//! The engine public API. The server crate talks to these thin orchestration layers rather than to the storage
//! traits directly.
pub mod cart_api;
pub mod errors;
pub mod order_flow_api;
pub mod user_api;

//! # Commerce server
//! This module hosts the HTTP server for the storefront backend. It is responsible for:
//! * Registering and authenticating users, including CPF/CNPJ document validation.
//! * Persisting shopping carts between sessions.
//! * Creating orders and dispatching their payments.
//! * Postal code lookups and shipping quotes.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! All routes live under the `/api` scope. See [routes](routes/index.html) for the full list.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod routes;
pub mod server;

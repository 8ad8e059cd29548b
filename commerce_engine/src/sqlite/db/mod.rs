//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or create an atomic transaction
//! as the need arises and call through to the functions without any other changes.
use std::{env, str::FromStr};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    Executor,
    SqlitePool,
};

pub mod carts;
pub mod orders;
pub mod users;

const SQLITE_DB_URL: &str = "sqlite://data/loja_store.db";

pub fn db_url() -> String {
    let result = env::var("LJ_DATABASE_URL").unwrap_or_else(|_| {
        info!("LJ_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Bring up the schema on a fresh database. Every statement is idempotent, so running this against an existing
/// database is a no-op.
async fn create_schema(pool: &SqlitePool) -> Result<(), SqlxError> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            nome_completo TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            telefone TEXT NOT NULL,
            documento TEXT NOT NULL UNIQUE,
            senha_hash TEXT NOT NULL,
            cep TEXT,
            rua TEXT,
            numero TEXT,
            bairro TEXT,
            cidade TEXT,
            estado TEXT,
            created_at TIMESTAMP NOT NULL
        );
        CREATE TABLE IF NOT EXISTS carts (
            user_id TEXT PRIMARY KEY NOT NULL,
            items TEXT NOT NULL DEFAULT '[]',
            updated_at TIMESTAMP NOT NULL
        );
        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            items TEXT NOT NULL,
            customer TEXT NOT NULL,
            address TEXT NOT NULL,
            payment TEXT NOT NULL,
            total INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pendente',
            payment_id TEXT,
            created_at TIMESTAMP NOT NULL
        );
        CREATE INDEX IF NOT EXISTS orders_user_created ON orders (user_id, created_at);
        "#,
    )
    .await?;
    Ok(())
}

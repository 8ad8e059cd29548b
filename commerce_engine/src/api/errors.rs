use thiserror::Error;

use crate::traits::OrderApiError;

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Pedido não encontrado")]
    OrderNotFound,
}

impl From<OrderApiError> for OrderFlowError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::OrderNotFound => Self::OrderNotFound,
            OrderApiError::DatabaseError(s) => Self::DatabaseError(s),
        }
    }
}

use chrono::{DateTime, Utc};
use commerce_engine::{
    db_types::{CartItem, CustomerInfo, NewOrder, NewUser, PaymentInfo, ShippingAddress, User, UserId},
    payments::{PaymentOutcome, CONFIRMATION_PAGE},
};
use cs_common::Money;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The generic response envelope used by most endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl StatusResponse {
    pub fn ok<S: Into<String>>(message: S) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    pub fn ok_with_data<S: Into<String>>(message: S, data: Value) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }

    pub fn fail<S: Into<String>>(message: S) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// The registration payload. `cpf` carries either a CPF or a CNPJ; it is normalized to digits before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub cpf: String,
    pub senha: String,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub rua: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl RegisterUserRequest {
    /// Build the record to insert. The document and password hash are supplied by the caller, since normalization
    /// and hashing happen during validation.
    pub fn into_new_user(self, documento: String, senha_hash: String) -> NewUser {
        NewUser {
            nome_completo: self.nome_completo,
            email: self.email,
            telefone: self.telefone,
            documento,
            senha_hash,
            cep: self.cep,
            rua: self.rua,
            numero: self.numero,
            bairro: self.bairro,
            cidade: self.cidade,
            estado: self.estado,
        }
    }
}

/// A user profile as returned to clients. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome_completo: user.nome_completo,
            email: user.email,
            telefone: user.telefone,
            cpf: user.documento,
            cep: user.cep,
            rua: user.rua,
            numero: user.numero,
            bairro: user.bairro,
            cidade: user.cidade,
            estado: user.estado,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn ok<S: Into<String>>(message: S, user: UserResponse, token: String) -> Self {
        Self { success: true, message: message.into(), user: Some(user), token: Some(token) }
    }

    pub fn fail<S: Into<String>>(message: S) -> Self {
        Self { success: false, message: message.into(), user: None, token: None }
    }
}

/// The checkout response. `redirect` is always present so clients can navigate unconditionally.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    pub redirect: String,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            payment_id: outcome.payment_id,
            payment_url: outcome.payment_url,
            redirect: outcome.redirect.unwrap_or_else(|| CONFIRMATION_PAGE.to_string()),
        }
    }
}

/// A new order as submitted by a client. The owner comes from the access token, never from the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    #[serde(rename = "carrinho")]
    pub items: Vec<CartItem>,
    #[serde(rename = "cliente")]
    pub customer: CustomerInfo,
    #[serde(rename = "endereco")]
    pub address: ShippingAddress,
    #[serde(rename = "pagamento")]
    pub payment: PaymentInfo,
    pub total: Money,
}

impl OrderDraft {
    pub fn into_new_order(self, user_id: UserId) -> NewOrder {
        NewOrder::new(user_id, self.items, self.customer, self.address, self.payment, self.total)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemQuery {
    pub quantity: i64,
}

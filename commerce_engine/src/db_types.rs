use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use cs_common::Money;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

pub use sqlx::types::Json;

//--------------------------------------       UserId        ---------------------------------------------------------
/// A lightweight wrapper around a string holding a user's unique id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for UserId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------       OrderId       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// Order lifecycle states. The wire and database representation uses the Portuguese names that storefront clients
/// already speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been created but no payment has been confirmed.
    #[sqlx(rename = "pendente")]
    #[serde(rename = "pendente")]
    Pending,
    /// Payment has been confirmed for the order.
    #[sqlx(rename = "pago")]
    #[serde(rename = "pago")]
    Paid,
    /// The order has been cancelled by the user or an admin.
    #[sqlx(rename = "cancelado")]
    #[serde(rename = "cancelado")]
    Cancelled,
    /// Payment dispatch failed after the order was persisted. Requires follow-up.
    #[sqlx(rename = "erro")]
    #[serde(rename = "erro")]
    Errored,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pendente"),
            OrderStatus::Paid => write!(f, "pago"),
            OrderStatus::Cancelled => write!(f, "cancelado"),
            OrderStatus::Errored => write!(f, "erro"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(Self::Pending),
            "pago" => Ok(Self::Paid),
            "cancelado" => Ok(Self::Cancelled),
            "erro" => Ok(Self::Errored),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to pendente");
            OrderStatus::Pending
        })
    }
}

//--------------------------------------   PaymentMethod     ---------------------------------------------------------
/// The payment method kinds the dispatcher knows about, using their wire names. Unknown kinds are preserved
/// verbatim in [`PaymentMethod::Other`] so the dispatcher can decline them explicitly instead of the request
/// failing at the parsing stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    CreditCard,
    PayPal,
    Pix,
    Boleto,
    WireTransfer,
    Other(String),
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "credit_card"),
            PaymentMethod::PayPal => write!(f, "paypal"),
            PaymentMethod::Pix => write!(f, "pix"),
            PaymentMethod::Boleto => write!(f, "boleto"),
            PaymentMethod::WireTransfer => write!(f, "transferencia"),
            PaymentMethod::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "credit_card" => Self::CreditCard,
            "paypal" => Self::PayPal,
            "pix" => Self::Pix,
            "boleto" => Self::Boleto,
            "transferencia" => Self::WireTransfer,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.to_string()
    }
}

//--------------------------------------    PaymentInfo      ---------------------------------------------------------
/// Payment instructions supplied by the client at checkout. Everything beyond `method` is provider-specific and is
/// carried through to the dispatcher untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(rename = "tipo")]
    pub method: PaymentMethod,
    #[serde(rename = "plataforma", default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(rename = "banco", default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<i64>,
}

impl PaymentInfo {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            platform: None,
            bank: None,
            token: None,
            payment_method_id: None,
            issuer_id: None,
            installments: None,
        }
    }

    pub fn with_platform<S: Into<String>>(mut self, platform: S) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_bank<S: Into<String>>(mut self, bank: S) -> Self {
        self.bank = Some(bank.into());
        self
    }
}

//--------------------------------------      CartItem       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub image: String,
}

impl CartItem {
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

//--------------------------------------        Cart         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Json<Vec<CartItem>>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items.0
    }

    pub fn total(&self) -> Money {
        self.items.0.iter().map(CartItem::line_total).sum()
    }
}

//--------------------------------------   CustomerInfo      ---------------------------------------------------------
/// Customer details captured at checkout. This is a snapshot; later edits to the user profile do not alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cpf: String,
}

//-------------------------------------- ShippingAddress     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub cep: String,
    pub rua: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

//--------------------------------------        User         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    /// The user's CPF or CNPJ, digits only.
    pub documento: String,
    pub senha_hash: String,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       NewUser       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    /// The CPF or CNPJ, digits only. Callers are expected to have validated the document before insertion.
    pub documento: String,
    /// The password hash. The engine never sees plaintext passwords.
    pub senha_hash: String,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
}

impl NewUser {
    pub fn new(nome_completo: String, email: String, telefone: String, documento: String, senha_hash: String) -> Self {
        Self {
            nome_completo,
            email,
            telefone,
            documento,
            senha_hash,
            cep: None,
            rua: None,
            numero: None,
            bairro: None,
            cidade: None,
            estado: None,
        }
    }
}

//--------------------------------------       Order         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Snapshot of the cart at the time the order was placed.
    #[serde(rename = "carrinho")]
    pub items: Json<Vec<CartItem>>,
    #[serde(rename = "cliente")]
    pub customer: Json<CustomerInfo>,
    #[serde(rename = "endereco")]
    pub address: Json<ShippingAddress>,
    #[serde(rename = "pagamento")]
    pub payment: Json<PaymentInfo>,
    pub total: Money,
    pub status: OrderStatus,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub customer: CustomerInfo,
    pub address: ShippingAddress,
    pub payment: PaymentInfo,
    pub total: Money,
}

impl NewOrder {
    pub fn new(
        user_id: UserId,
        items: Vec<CartItem>,
        customer: CustomerInfo,
        address: ShippingAddress,
        payment: PaymentInfo,
        total: Money,
    ) -> Self {
        Self { user_id, items, customer, address, payment, total }
    }
}

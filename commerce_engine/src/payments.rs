//! Payment dispatch stub.
//!
//! Stands in for real gateway integrations. The dispatcher is a pure function of the order id and the payment
//! descriptor: no network calls, no hidden state, and the same inputs always produce the same outcome. Real
//! integrations slot in behind the same [`PaymentOutcome`] contract later.
use serde::Serialize;

use crate::db_types::{OrderId, PaymentInfo, PaymentMethod};

pub const CONFIRMATION_PAGE: &str = "/confirmacao";
const DEFAULT_BANK: &str = "bb";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
    pub payment_id: Option<String>,
    pub payment_url: Option<String>,
    pub redirect: Option<String>,
}

impl PaymentOutcome {
    fn approved(message: String, payment_id: Option<String>, payment_url: Option<String>) -> Self {
        Self { success: true, message, payment_id, payment_url, redirect: Some(CONFIRMATION_PAGE.to_string()) }
    }

    fn declined<S: Into<String>>(message: S) -> Self {
        Self { success: false, message: message.into(), payment_id: None, payment_url: None, redirect: None }
    }
}

/// Route a payment to its (stubbed) provider.
///
/// * Credit card payments succeed with a reference of `{platform}_{order_id}`, where Mercado Pago uses its short
///   `mp` prefix and a missing platform falls back to a generic gateway prefix.
/// * PayPal payments succeed with a checkout URL instead of a reference.
/// * Pix, boleto and wire transfers succeed with a reference of `{bank}_{method}_{order_id}`, defaulting to
///   Banco do Brasil when no bank is given.
pub fn dispatch_payment(payment: &PaymentInfo, order_id: &OrderId) -> PaymentOutcome {
    let id = order_id.as_str();
    match payment.method {
        PaymentMethod::CreditCard => match payment.platform.as_deref() {
            Some("mercadopago") => PaymentOutcome::approved(
                "Pagamento processado via Mercado Pago".to_string(),
                Some(format!("mp_{id}")),
                None,
            ),
            Some(platform) => PaymentOutcome::approved(
                format!("Pagamento processado via {platform}"),
                Some(format!("{platform}_{id}")),
                None,
            ),
            None => PaymentOutcome::approved("Pagamento processado".to_string(), Some(format!("gateway_{id}")), None),
        },
        PaymentMethod::PayPal => PaymentOutcome::approved(
            "Redirecionando para PayPal".to_string(),
            None,
            Some(format!("https://paypal.com/checkout?order_id={id}")),
        ),
        PaymentMethod::Pix | PaymentMethod::Boleto | PaymentMethod::WireTransfer => {
            let bank = payment.bank.as_deref().unwrap_or(DEFAULT_BANK);
            let method = &payment.method;
            PaymentOutcome::approved(
                format!("Pagamento {method} gerado - {}", bank.to_uppercase()),
                Some(format!("{bank}_{method}_{id}")),
                None,
            )
        },
        PaymentMethod::Other(_) => PaymentOutcome::declined("Método de pagamento não suportado"),
    }
}

use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::OrderFlowError,
    db_types::{NewOrder, Order, OrderId, OrderStatus, UserId},
    payments::{dispatch_payment, PaymentOutcome},
    traits::{CartManagement, OrderManagement},
};

/// How many orders `my_orders` returns at most.
const ORDER_HISTORY_LIMIT: i64 = 100;

/// The result of a checkout: the persisted order (with its final status for this request) and the dispatcher's
/// verdict. `outcome.success == false` means the order was created but is awaiting an out-of-band payment retry.
#[derive(Debug, Clone)]
pub struct CheckoutResult {
    pub order: Order,
    pub outcome: PaymentOutcome,
}

/// `OrderFlowApi` is the primary API for the checkout flow: persisting the order, consuming the cart and
/// dispatching the payment.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + CartManagement
{
    /// Run the checkout sequence for a new order.
    ///
    /// 1. The order is persisted with `pendente` status. Failure here aborts the request; nothing else has
    ///    happened yet.
    /// 2. The user's cart is deleted. Checkout consumes the cart regardless of the payment outcome; a failure to
    ///    delete is logged and does not abort the flow.
    /// 3. The payment dispatcher produces its verdict.
    /// 4. On an approved payment the order is updated to `pago` with the payment reference attached. On a
    ///    declined payment the order stays `pendente`; only the response reports the failure.
    pub async fn checkout(&self, order: NewOrder) -> Result<CheckoutResult, OrderFlowError> {
        let user_id = order.user_id.clone();
        let order = self.db.insert_order(order).await?;
        debug!("🔄️📦️ Order {} created for user {user_id} with total {}", order.id, order.total);
        if let Err(e) = self.db.delete_cart(&user_id).await {
            warn!("🔄️📦️ Could not clear the cart for user {user_id} after creating order {}. {e}", order.id);
        }
        let outcome = dispatch_payment(&order.payment, &order.id);
        let order = if outcome.success {
            let order =
                self.db.update_order_payment(&order.id, OrderStatus::Paid, outcome.payment_id.clone()).await?;
            debug!("🔄️💰️ Order {} marked as paid. Reference: {:?}", order.id, order.payment_id);
            order
        } else {
            info!("🔄️💰️ Payment for order {} was declined ({}). The order stays pendente.", order.id, outcome.message);
            order
        };
        Ok(CheckoutResult { order, outcome })
    }

    /// Fetch a single order, scoped to its owner.
    pub async fn order_details(&self, id: &OrderId, user_id: &UserId) -> Result<Option<Order>, OrderFlowError> {
        let order = self.db.fetch_order(id, user_id).await?;
        Ok(order)
    }

    /// The user's order history, most recent first.
    pub async fn my_orders(&self, user_id: &UserId) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders_for_user(user_id, ORDER_HISTORY_LIMIT).await?;
        Ok(orders)
    }
}

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use commerce_engine::{
    db_types::{
        CustomerInfo,
        Json,
        NewOrder,
        Order,
        OrderId,
        OrderStatus,
        PaymentInfo,
        PaymentMethod,
        ShippingAddress,
        UserId,
    },
    OrderFlowApi,
};
use cs_common::Money;
use serde_json::json;

use super::{
    helpers::{get, item, post, send_request, valid_token},
    mocks::MockOrderStore,
};
use crate::routes::{CreateOrderRoute, MyOrdersRoute, OrderByIdRoute};

fn draft_payload(pagamento: serde_json::Value) -> serde_json::Value {
    json!({
        "carrinho": [{"id": "p1", "name": "Produto p1", "price": 4990, "quantity": 2, "image": "/img/p1.png"}],
        "cliente": {"nome": "Maria Silva", "email": "maria@example.com", "telefone": "11987654321", "cpf": "11144477735"},
        "endereco": {"cep": "01310-100", "rua": "Avenida Paulista", "numero": "1000", "bairro": "Bela Vista",
                     "cidade": "São Paulo", "estado": "SP"},
        "pagamento": pagamento,
        "total": 9980
    })
}

fn order_from(order: NewOrder, id: &str, status: OrderStatus, payment_id: Option<String>) -> Order {
    Order {
        id: OrderId::from(id.to_string()),
        user_id: order.user_id,
        items: Json(order.items),
        customer: Json(order.customer),
        address: Json(order.address),
        payment: Json(order.payment),
        total: order.total,
        status,
        payment_id,
        created_at: Utc::now(),
    }
}

fn stored_order(id: &str, status: OrderStatus, payment_id: Option<String>) -> Order {
    let order = NewOrder::new(
        UserId::from("u1"),
        vec![item("p1", 4990, 2)],
        CustomerInfo {
            nome: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            telefone: "11987654321".to_string(),
            cpf: "11144477735".to_string(),
        },
        ShippingAddress {
            cep: "01310-100".to_string(),
            rua: "Avenida Paulista".to_string(),
            numero: "1000".to_string(),
            bairro: "Bela Vista".to_string(),
            cidade: "São Paulo".to_string(),
            estado: "SP".to_string(),
        },
        PaymentInfo::new(PaymentMethod::CreditCard).with_platform("mercadopago"),
        Money::from_cents(9980),
    );
    order_from(order, id, status, payment_id)
}

#[actix_web::test]
async fn order_routes_require_a_token() {
    let _ = env_logger::try_init().ok();
    let (status, _) = send_request(get("/orders/my-orders", None), configure_my_orders_empty).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn checkout_processes_a_mercadopago_payment() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let payload = draft_payload(json!({"tipo": "credit_card", "plataforma": "mercadopago"}));
    let req = post("/orders/create", Some(&token)).set_json(payload);
    let (status, body) = send_request(req, configure_checkout_paid).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "{body}");
    assert!(body.contains("Pagamento processado via Mercado Pago"), "{body}");
    assert!(body.contains(r#""payment_id":"mp_abc""#), "{body}");
    assert!(body.contains(r#""redirect":"/confirmacao""#), "{body}");
}

#[actix_web::test]
async fn declined_checkout_still_answers_200() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let payload = draft_payload(json!({"tipo": "bitcoin"}));
    let req = post("/orders/create", Some(&token)).set_json(payload);
    let (status, body) = send_request(req, configure_checkout_declined).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":false"#), "{body}");
    assert!(body.contains("Método de pagamento não suportado"), "{body}");
    assert!(!body.contains("payment_id"), "{body}");
    // Declined payments still send the client to the confirmation page, where the pending state is shown
    assert!(body.contains(r#""redirect":"/confirmacao""#), "{body}");
}

#[actix_web::test]
async fn my_orders_returns_the_history() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/orders/my-orders", Some(&token)), configure_my_orders_full).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Pedidos recuperados com sucesso"), "{body}");
    assert!(body.contains(r#""status":"pago""#), "{body}");
    assert!(body.contains(r#""payment_id":"mp_abc""#), "{body}");
}

#[actix_web::test]
async fn my_orders_can_be_empty() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/orders/my-orders", Some(&token)), configure_my_orders_empty).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""orders":[]"#), "{body}");
}

#[actix_web::test]
async fn missing_order_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/orders/nao-existe", Some(&token)), configure_order_missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Pedido não encontrado"), "{body}");
}

#[actix_web::test]
async fn order_details_are_returned_for_the_owner() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/orders/abc", Some(&token)), configure_order_found).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Pedido encontrado"), "{body}");
    assert!(body.contains(r#""total":9980"#), "{body}");
}

fn order_services(cfg: &mut ServiceConfig, store: MockOrderStore) {
    cfg.service(CreateOrderRoute::<MockOrderStore>::new())
        .service(MyOrdersRoute::<MockOrderStore>::new())
        .service(OrderByIdRoute::<MockOrderStore>::new())
        .app_data(web::Data::new(OrderFlowApi::new(store)));
}

fn configure_checkout_paid(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store.expect_insert_order().returning(|order| Ok(order_from(order, "abc", OrderStatus::Pending, None)));
    store.expect_delete_cart().returning(|_| Ok(true));
    store
        .expect_update_order_payment()
        .withf(|id, status, payment_id| {
            id.as_str() == "abc" && *status == OrderStatus::Paid && payment_id.as_deref() == Some("mp_abc")
        })
        .returning(|id, status, payment_id| Ok(stored_order(id.as_str(), status, payment_id)));
    order_services(cfg, store);
}

fn configure_checkout_declined(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store.expect_insert_order().returning(|order| Ok(order_from(order, "abc", OrderStatus::Pending, None)));
    store.expect_delete_cart().returning(|_| Ok(true));
    // A declined payment must leave the order untouched, so no update expectation is set
    order_services(cfg, store);
}

fn configure_my_orders_full(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store
        .expect_fetch_orders_for_user()
        .returning(|_, _| Ok(vec![stored_order("abc", OrderStatus::Paid, Some("mp_abc".to_string()))]));
    order_services(cfg, store);
}

fn configure_my_orders_empty(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store.expect_fetch_orders_for_user().returning(|_, _| Ok(vec![]));
    order_services(cfg, store);
}

fn configure_order_missing(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store.expect_fetch_order().returning(|_, _| Ok(None));
    order_services(cfg, store);
}

fn configure_order_found(cfg: &mut ServiceConfig) {
    let mut store = MockOrderStore::new();
    store
        .expect_fetch_order()
        .returning(|id, _| Ok(Some(stored_order(id.as_str(), OrderStatus::Paid, Some("mp_abc".to_string())))));
    order_services(cfg, store);
}

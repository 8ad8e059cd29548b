use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use commerce_engine::{
    db_types::{Cart, CartItem, Json, UserId},
    traits::CartApiError,
    CartApi,
};

use super::{
    helpers::{delete, get, item, post, put, send_request, valid_token},
    mocks::MockCartStore,
};
use crate::routes::{AddCartItemRoute, ClearCartRoute, GetCartRoute, SaveCartRoute, UpdateCartItemRoute};

fn cart_with(user_id: &UserId, items: Vec<CartItem>) -> Cart {
    Cart { user_id: user_id.clone(), items: Json(items), updated_at: Utc::now() }
}

#[actix_web::test]
async fn cart_routes_require_a_token() {
    let _ = env_logger::try_init().ok();
    let req = post("/cart/save", None).set_json(vec![item("p1", 4990, 1)]);
    let (status, _) = send_request(req, configure_save).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn save_cart_persists_the_items() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let req = post("/cart/save", Some(&token)).set_json(vec![item("p1", 4990, 1), item("p2", 2500, 3)]);
    let (status, body) = send_request(req, configure_save).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Carrinho salvo com sucesso"), "{body}");
}

#[actix_web::test]
async fn empty_cart_comes_back_as_an_empty_list() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/cart/get", Some(&token)), configure_get_empty).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Carrinho vazio"), "{body}");
    assert!(body.contains(r#""cart":[]"#), "{body}");
}

#[actix_web::test]
async fn saved_cart_items_are_returned() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/cart/get", Some(&token)), configure_get_full).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Carrinho recuperado com sucesso"), "{body}");
    assert!(body.contains(r#""id":"p1""#), "{body}");
    assert!(body.contains(r#""quantity":2"#), "{body}");
}

#[actix_web::test]
async fn clear_cart_reports_success() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(delete("/cart/clear", Some(&token)), configure_clear).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Carrinho limpo com sucesso"), "{body}");
}

#[actix_web::test]
async fn add_item_reports_success() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let req = post("/cart/add-item", Some(&token)).set_json(item("p1", 4990, 1));
    let (status, body) = send_request(req, configure_add_item).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Item adicionado ao carrinho"), "{body}");
}

#[actix_web::test]
async fn updating_a_missing_item_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let req = put("/cart/update-item/p99?quantity=2", Some(&token));
    let (status, body) = send_request(req, configure_update_missing_item).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Item não encontrado no carrinho"), "{body}");
}

#[actix_web::test]
async fn updating_without_a_cart_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let req = put("/cart/update-item/p1?quantity=2", Some(&token));
    let (status, body) = send_request(req, configure_update_missing_cart).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Carrinho não encontrado"), "{body}");
}

fn cart_services(cfg: &mut ServiceConfig, store: MockCartStore) {
    cfg.service(SaveCartRoute::<MockCartStore>::new())
        .service(GetCartRoute::<MockCartStore>::new())
        .service(ClearCartRoute::<MockCartStore>::new())
        .service(AddCartItemRoute::<MockCartStore>::new())
        .service(UpdateCartItemRoute::<MockCartStore>::new())
        .app_data(web::Data::new(CartApi::new(store)));
}

fn configure_save(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_replace_cart().returning(|user_id, items| Ok(cart_with(user_id, items)));
    cart_services(cfg, store);
}

fn configure_get_empty(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_fetch_cart().returning(|_| Ok(None));
    cart_services(cfg, store);
}

fn configure_get_full(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_fetch_cart().returning(|user_id| Ok(Some(cart_with(user_id, vec![item("p1", 4990, 2)]))));
    cart_services(cfg, store);
}

fn configure_clear(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_delete_cart().returning(|_| Ok(true));
    cart_services(cfg, store);
}

fn configure_add_item(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_add_cart_item().returning(|user_id, item| Ok(cart_with(user_id, vec![item])));
    cart_services(cfg, store);
}

fn configure_update_missing_item(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_update_cart_item().returning(|_, _, _| Err(CartApiError::ItemNotFound));
    cart_services(cfg, store);
}

fn configure_update_missing_cart(cfg: &mut ServiceConfig) {
    let mut store = MockCartStore::new();
    store.expect_update_cart_item().returning(|_, _, _| Err(CartApiError::CartNotFound));
    cart_services(cfg, store);
}

use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::Utc;
use commerce_engine::db_types::{CartItem, User, UserId};
use cs_common::{Money, Secret};
use log::debug;

use crate::{auth::TokenIssuer, config::AuthConfig, helpers::hash_password};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        api_secret: Secret::new("ec2a4c02753745cf95b1e96d1c2bf96e".to_string()),
        token_validity: chrono::Duration::hours(1),
    }
}

pub fn valid_token(user_id: &str) -> String {
    TokenIssuer::new(&test_auth_config()).issue_token(&UserId::from(user_id)).expect("Failed to sign token")
}

pub fn sample_user(id: &str, password: &str) -> User {
    User {
        id: UserId::from(id),
        nome_completo: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        telefone: "11987654321".to_string(),
        documento: "11144477735".to_string(),
        senha_hash: hash_password(password).expect("Failed to hash password"),
        cep: None,
        rua: None,
        numero: None,
        bairro: None,
        cidade: None,
        estado: None,
        created_at: Utc::now(),
    }
}

pub fn item(id: &str, price_cents: i64, quantity: i64) -> CartItem {
    CartItem {
        id: id.to_string(),
        name: format!("Produto {id}"),
        price: Money::from_cents(price_cents),
        quantity,
        image: format!("/img/{id}.png"),
    }
}

pub fn get(path: &str, token: Option<&str>) -> TestRequest {
    with_auth(TestRequest::get().uri(path), token)
}

pub fn post(path: &str, token: Option<&str>) -> TestRequest {
    with_auth(TestRequest::post().uri(path), token)
}

pub fn put(path: &str, token: Option<&str>) -> TestRequest {
    with_auth(TestRequest::put().uri(path), token)
}

pub fn delete(path: &str, token: Option<&str>) -> TestRequest {
    with_auth(TestRequest::delete().uri(path), token)
}

fn with_auth(req: TestRequest, token: Option<&str>) -> TestRequest {
    match token {
        Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
        None => req,
    }
}

pub async fn send_request(req: TestRequest, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = req.to_request();
    let signer = TokenIssuer::new(&test_auth_config());
    let app = App::new().app_data(web::Data::new(signer)).configure(configure);

    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req).await;
    let (_, res) = res.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

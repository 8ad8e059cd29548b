use actix_web::{http::StatusCode, web, web::ServiceConfig};
use commerce_engine::{
    db_types::{User, UserId},
    UserApi,
};
use registry_tools::{RegistryApi, RegistryConfig};
use serde_json::json;

use super::{
    helpers::{get, post, sample_user, send_request, valid_token},
    mocks::MockUserStore,
};
use crate::routes::{validate_cpf, LoginRoute, MyProfileRoute, RegisterRoute};

fn register_payload(cpf: &str) -> serde_json::Value {
    json!({
        "nome_completo": "Maria Silva",
        "email": "maria@example.com",
        "telefone": "11987654321",
        "cpf": cpf,
        "senha": "senha123"
    })
}

#[actix_web::test]
async fn register_rejects_invalid_cpf() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/register", None).set_json(register_payload("111.111.111-11"));
    let (status, body) = send_request(req, configure_register_no_conflicts).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":false"#), "{body}");
    assert!(body.contains("CPF inválido"), "{body}");
}

#[actix_web::test]
async fn register_rejects_short_phone() {
    let _ = env_logger::try_init().ok();
    let mut payload = register_payload("111.444.777-35");
    payload["telefone"] = json!("1198765");
    let req = post("/auth/register", None).set_json(payload);
    let (status, body) = send_request(req, configure_register_no_conflicts).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":false"#), "{body}");
    assert!(body.contains("Telefone deve ter pelo menos 10 dígitos"), "{body}");
}

#[actix_web::test]
async fn register_rejects_wrong_length_document() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/register", None).set_json(register_payload("1234567890123"));
    let (status, body) = send_request(req, configure_register_no_conflicts).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Documento deve ser CPF (11 dígitos) ou CNPJ (14 dígitos)"), "{body}");
}

#[actix_web::test]
async fn register_rejects_cnpj_without_registry_token() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/register", None).set_json(register_payload("12.345.678/0001-95"));
    let (status, body) = send_request(req, configure_register_no_conflicts).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":false"#), "{body}");
    assert!(body.contains("Token ReceitaWS não configurado"), "{body}");
}

#[actix_web::test]
async fn register_rejects_duplicate_email() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/register", None).set_json(register_payload("111.444.777-35"));
    let (status, body) = send_request(req, configure_register_email_taken).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Email já cadastrado"), "{body}");
}

#[actix_web::test]
async fn register_creates_user_with_valid_cpf() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/register", None).set_json(register_payload("111.444.777-35"));
    let (status, body) = send_request(req, configure_register_accepting).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "{body}");
    assert!(body.contains("Usuário cadastrado com sucesso"), "{body}");
    assert!(body.contains("new-user"), "{body}");
    // The plaintext password must never appear in a response
    assert!(!body.contains("senha123"), "{body}");
}

#[actix_web::test]
async fn login_with_wrong_password_is_rejected() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/login", None).set_json(json!({"email": "maria@example.com", "senha": "errada"}));
    let (status, body) = send_request(req, configure_login).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":false"#), "{body}");
    assert!(body.contains("Email ou senha incorretos"), "{body}");
}

#[actix_web::test]
async fn login_with_unknown_email_gets_the_same_message() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/login", None).set_json(json!({"email": "quem@example.com", "senha": "senha123"}));
    let (status, body) = send_request(req, configure_login_no_user).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Email ou senha incorretos"), "{body}");
}

#[actix_web::test]
async fn login_issues_access_token() {
    let _ = env_logger::try_init().ok();
    let req = post("/auth/login", None).set_json(json!({"email": "maria@example.com", "senha": "senha123"}));
    let (status, body) = send_request(req, configure_login).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""success":true"#), "{body}");
    assert!(body.contains("Login realizado com sucesso"), "{body}");
    assert!(body.contains(r#""token":"#), "{body}");
    assert!(!body.contains("senha_hash"), "{body}");
}

#[actix_web::test]
async fn profile_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = send_request(get("/auth/me", None), configure_profile).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("An access token was not provided."), "{body}");
}

#[actix_web::test]
async fn profile_rejects_tampered_tokens() {
    let _ = env_logger::try_init().ok();
    let mut token = valid_token("u1");
    token.replace_range(token.len() - 5..token.len(), "AAAAA");
    let (status, body) = send_request(get("/auth/me", Some(&token)), configure_profile).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");
}

#[actix_web::test]
async fn profile_returns_the_logged_in_user() {
    let _ = env_logger::try_init().ok();
    let token = valid_token("u1");
    let (status, body) = send_request(get("/auth/me", Some(&token)), configure_profile).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("maria@example.com"), "{body}");
    assert!(body.contains(r#""cpf":"11144477735""#), "{body}");
    assert!(!body.contains("senha_hash"), "{body}");
}

#[actix_web::test]
async fn cpf_check_endpoint_is_public() {
    let _ = env_logger::try_init().ok();
    let (status, body) = send_request(get("/auth/validate-cpf/111.444.777-35", None), configure_cpf_check).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""valid":true"#), "{body}");
    assert!(body.contains("CPF válido"), "{body}");

    let (status, body) = send_request(get("/auth/validate-cpf/11111111111", None), configure_cpf_check).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""valid":false"#), "{body}");
}

fn user_from_insert(user: commerce_engine::db_types::NewUser) -> User {
    User {
        id: UserId::from("new-user"),
        nome_completo: user.nome_completo,
        email: user.email,
        telefone: user.telefone,
        documento: user.documento,
        senha_hash: user.senha_hash,
        cep: user.cep,
        rua: user.rua,
        numero: user.numero,
        bairro: user.bairro,
        cidade: user.cidade,
        estado: user.estado,
        created_at: chrono::Utc::now(),
    }
}

fn register_services(cfg: &mut ServiceConfig, store: MockUserStore) {
    let api = UserApi::new(store);
    let registry = RegistryApi::new(RegistryConfig::default()).unwrap();
    cfg.service(RegisterRoute::<MockUserStore>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(registry));
}

fn configure_register_no_conflicts(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_email().returning(|_| Ok(None));
    store.expect_fetch_user_by_document().returning(|_| Ok(None));
    register_services(cfg, store);
}

fn configure_register_email_taken(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_email().returning(|_| Ok(Some(sample_user("u1", "senha123"))));
    register_services(cfg, store);
}

fn configure_register_accepting(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_email().returning(|_| Ok(None));
    store.expect_fetch_user_by_document().returning(|_| Ok(None));
    store.expect_insert_user().returning(|user| Ok(user_from_insert(user)));
    register_services(cfg, store);
}

fn configure_login(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_email().returning(|_| Ok(Some(sample_user("u1", "senha123"))));
    cfg.service(LoginRoute::<MockUserStore>::new()).app_data(web::Data::new(UserApi::new(store)));
}

fn configure_login_no_user(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_email().returning(|_| Ok(None));
    cfg.service(LoginRoute::<MockUserStore>::new()).app_data(web::Data::new(UserApi::new(store)));
}

fn configure_profile(cfg: &mut ServiceConfig) {
    let mut store = MockUserStore::new();
    store.expect_fetch_user_by_id().returning(|id| Ok(Some(sample_user(id.as_str(), "senha123"))));
    cfg.service(MyProfileRoute::<MockUserStore>::new()).app_data(web::Data::new(UserApi::new(store)));
}

fn configure_cpf_check(cfg: &mut ServiceConfig) {
    cfg.service(validate_cpf);
}

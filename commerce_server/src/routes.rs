//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers which block the current thread will stop the worker from processing new requests, so any long,
//! non-cpu-bound operation (I/O, database calls, registry lookups) must be awaited, never blocked on.

use actix_web::{get, web, HttpResponse, Responder};
use commerce_engine::{
    db_types::{CartItem, OrderId},
    helpers::{digits_only, is_valid_cpf, shipping_fee},
    CartApi,
    CartManagement,
    OrderFlowApi,
    OrderManagement,
    UserApi,
    UserApiError,
    UserManagement,
};
use log::*;
use registry_tools::{PostalLookup, RegistryApi};
use serde_json::json;

use crate::{
    auth::{AuthenticatedUser, TokenIssuer},
    data_objects::{
        LoginRequest,
        LoginResponse,
        OrderDraft,
        PaymentResponse,
        RegisterUserRequest,
        StatusResponse,
        UpdateItemQuery,
        UserResponse,
    },
    errors::ServerError,
    helpers::{hash_password, verify_password},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/auth/register" impl UserManagement);
/// Route handler for user registration.
///
/// The flow mirrors what storefront clients expect: conflicts and validation failures come back as a 200 with
/// `success: false` and a Portuguese message, never as an HTTP error. The submitted document is normalized to
/// digits and treated as a CPF (11 digits, validated locally) or a CNPJ (14 digits, validated against ReceitaWS
/// together with the account name).
pub async fn register<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    registry: web::Data<RegistryApi>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST register for {}", request.email);
    if digits_only(&request.telefone).len() < 10 {
        return Ok(HttpResponse::Ok().json(StatusResponse::fail("Telefone deve ter pelo menos 10 dígitos")));
    }
    if api.user_by_email(&request.email).await?.is_some() {
        return Ok(HttpResponse::Ok().json(StatusResponse::fail("Email já cadastrado")));
    }
    let documento = digits_only(&request.cpf);
    if api.user_by_document(&documento).await?.is_some() {
        return Ok(HttpResponse::Ok().json(StatusResponse::fail("CPF/CNPJ já cadastrado")));
    }
    match documento.len() {
        11 => {
            if !is_valid_cpf(&documento) {
                return Ok(HttpResponse::Ok().json(StatusResponse::fail("CPF inválido")));
            }
        },
        14 => {
            let check = registry.validate_company_document(&documento, &request.nome_completo).await;
            if !check.valid {
                return Ok(HttpResponse::Ok().json(StatusResponse::fail(check.message)));
            }
        },
        _ => {
            return Ok(HttpResponse::Ok()
                .json(StatusResponse::fail("Documento deve ser CPF (11 dígitos) ou CNPJ (14 dígitos)")));
        },
    }
    let senha_hash = hash_password(&request.senha)?;
    let user = match api.register(request.into_new_user(documento, senha_hash)).await {
        Ok(user) => user,
        // The pre-checks above make these race-only, but they still deserve the friendly envelope
        Err(e @ (UserApiError::EmailExists | UserApiError::DocumentExists)) => {
            return Ok(HttpResponse::Ok().json(StatusResponse::fail(e.to_string())));
        },
        Err(e) => return Err(e.into()),
    };
    let response = StatusResponse::ok_with_data("Usuário cadastrado com sucesso", json!({"user_id": user.id}));
    Ok(HttpResponse::Ok().json(response))
}

route!(login => Post "/auth/login" impl UserManagement);
/// Route handler for login.
///
/// A missing account and a wrong password produce the same response, so the endpoint cannot be used to probe
/// which emails are registered.
pub async fn login<B: UserManagement>(
    api: web::Data<UserApi<B>>,
    signer: web::Data<TokenIssuer>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST login for {}", request.email);
    let user = match api.user_by_email(&request.email).await? {
        Some(user) if verify_password(&request.senha, &user.senha_hash) => user,
        _ => return Ok(HttpResponse::Ok().json(LoginResponse::fail("Email ou senha incorretos"))),
    };
    let token = signer.issue_token(&user.id)?;
    debug!("💻️ Issued access token for {}", user.id);
    let response = LoginResponse::ok("Login realizado com sucesso", UserResponse::from(user), token);
    Ok(HttpResponse::Ok().json(response))
}

route!(my_profile => Get "/auth/me" impl UserManagement);
pub async fn my_profile<B: UserManagement>(
    auth: AuthenticatedUser,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_profile for {}", auth.user_id);
    let user = api
        .user_by_id(&auth.user_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Usuário não encontrado".to_string()))?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[get("/auth/validate-cpf/{cpf}")]
pub async fn validate_cpf(path: web::Path<String>) -> impl Responder {
    let cpf = digits_only(&path.into_inner());
    let valid = is_valid_cpf(&cpf);
    HttpResponse::Ok().json(json!({
        "valid": valid,
        "message": if valid { "CPF válido" } else { "CPF inválido" },
    }))
}

#[get("/auth/validate-cnpj/{cnpj}/{nome}")]
pub async fn validate_cnpj(path: web::Path<(String, String)>, registry: web::Data<RegistryApi>) -> impl Responder {
    let (cnpj, nome) = path.into_inner();
    let check = registry.validate_company_document(&cnpj, &nome).await;
    HttpResponse::Ok().json(check)
}

//----------------------------------------------   Cart  ----------------------------------------------------
route!(save_cart => Post "/cart/save" impl CartManagement);
pub async fn save_cart<B: CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<CartApi<B>>,
    body: web::Json<Vec<CartItem>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST save_cart for {}", auth.user_id);
    api.save(&auth.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok("Carrinho salvo com sucesso")))
}

route!(get_cart => Get "/cart/get" impl CartManagement);
pub async fn get_cart<B: CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET get_cart for {}", auth.user_id);
    let response = match api.get(&auth.user_id).await? {
        Some(cart) => StatusResponse::ok_with_data("Carrinho recuperado com sucesso", json!({"cart": cart.items()})),
        None => StatusResponse::ok_with_data("Carrinho vazio", json!({"cart": []})),
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(clear_cart => Delete "/cart/clear" impl CartManagement);
pub async fn clear_cart<B: CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ DELETE clear_cart for {}", auth.user_id);
    api.clear(&auth.user_id).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok("Carrinho limpo com sucesso")))
}

route!(add_cart_item => Post "/cart/add-item" impl CartManagement);
pub async fn add_cart_item<B: CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<CartApi<B>>,
    body: web::Json<CartItem>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST add_cart_item for {}", auth.user_id);
    api.add_item(&auth.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok("Item adicionado ao carrinho")))
}

route!(update_cart_item => Put "/cart/update-item/{item_id}" impl CartManagement);
/// Set the quantity of a cart line. A quantity of zero or less removes the line. A missing cart or line is a 404.
pub async fn update_cart_item<B: CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<CartApi<B>>,
    path: web::Path<String>,
    query: web::Query<UpdateItemQuery>,
) -> Result<HttpResponse, ServerError> {
    let item_id = path.into_inner();
    debug!("💻️ PUT update_cart_item {item_id} for {}", auth.user_id);
    api.update_item(&auth.user_id, &item_id, query.quantity).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok("Item atualizado com sucesso")))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders/create" impl OrderManagement, CartManagement);
/// Route handler for checkout.
///
/// The order is persisted, the user's cart is consumed, and the payment is dispatched. A declined payment is
/// still a 200; `success: false` in the body tells the client the order is awaiting payment.
pub async fn create_order<B: OrderManagement + CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<OrderDraft>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST create_order for {}", auth.user_id);
    let order = body.into_inner().into_new_order(auth.user_id.clone());
    let result = api.checkout(order).await?;
    Ok(HttpResponse::Ok().json(PaymentResponse::from(result.outcome)))
}

route!(my_orders => Get "/orders/my-orders" impl OrderManagement, CartManagement);
pub async fn my_orders<B: OrderManagement + CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_orders for {}", auth.user_id);
    let orders = api.my_orders(&auth.user_id).await?;
    let response = StatusResponse::ok_with_data("Pedidos recuperados com sucesso", json!({"orders": orders}));
    Ok(HttpResponse::Ok().json(response))
}

route!(order_by_id => Get "/orders/{order_id}" impl OrderManagement, CartManagement);
pub async fn order_by_id<B: OrderManagement + CartManagement>(
    auth: AuthenticatedUser,
    api: web::Data<OrderFlowApi<B>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let order_id = OrderId::from(path.into_inner());
    debug!("💻️ GET order {order_id} for {}", auth.user_id);
    let order = api
        .order_details(&order_id, &auth.user_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("Pedido não encontrado".to_string()))?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok_with_data("Pedido encontrado", json!({"order": order}))))
}

//----------------------------------------------   Utils  ----------------------------------------------------
#[get("/utils/cep/{cep}")]
pub async fn cep_lookup(path: web::Path<String>, registry: web::Data<RegistryApi>) -> impl Responder {
    let cep = path.into_inner();
    trace!("💻️ GET cep_lookup for {cep}");
    let response = match registry.lookup_postal_code(&cep).await {
        PostalLookup::Found(address) => StatusResponse::ok_with_data("CEP encontrado", json!({
            "endereco": {
                "cep": address.cep,
                "rua": address.logradouro,
                "bairro": address.bairro,
                "cidade": address.localidade,
                "estado": address.uf,
            }
        })),
        PostalLookup::NotFound { message, .. } => StatusResponse::fail(message),
    };
    HttpResponse::Ok().json(response)
}

#[get("/utils/shipping/{estado}")]
pub async fn shipping_quote(path: web::Path<String>) -> impl Responder {
    let estado = path.into_inner();
    let fee = shipping_fee(&estado);
    trace!("💻️ GET shipping_quote for {estado}: {fee}");
    HttpResponse::Ok()
        .json(StatusResponse::ok_with_data("Frete calculado", json!({"shipping_cost": fee, "estado": estado})))
}

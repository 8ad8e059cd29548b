use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use commerce_engine::{CartApi, OrderFlowApi, SqliteDatabase, UserApi};
use registry_tools::RegistryApi;

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    routes::{
        cep_lookup,
        health,
        shipping_quote,
        validate_cnpj,
        validate_cpf,
        AddCartItemRoute,
        ClearCartRoute,
        CreateOrderRoute,
        GetCartRoute,
        LoginRoute,
        MyOrdersRoute,
        MyProfileRoute,
        OrderByIdRoute,
        RegisterRoute,
        SaveCartRoute,
        UpdateCartItemRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db.clone())?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    db.close().await;
    result
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let registry = RegistryApi::new(config.registry.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let users_api = UserApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone());
        let signer = TokenIssuer::new(&config.auth);
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("loja::access_log"))
            .wrap(Cors::permissive())
            .app_data(web::Data::new(users_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(signer));
        // my_orders must register ahead of order_by_id, or `/orders/my-orders` would match `{order_id}`
        let api_scope = web::scope("/api")
            .service(health)
            .service(validate_cpf)
            .service(validate_cnpj)
            .service(cep_lookup)
            .service(shipping_quote)
            .service(RegisterRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(MyProfileRoute::<SqliteDatabase>::new())
            .service(SaveCartRoute::<SqliteDatabase>::new())
            .service(GetCartRoute::<SqliteDatabase>::new())
            .service(ClearCartRoute::<SqliteDatabase>::new())
            .service(AddCartItemRoute::<SqliteDatabase>::new())
            .service(UpdateCartItemRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(MyOrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new());
        app.service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

use std::env;

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;

mod resolution;

const DEFAULT_ADDR: &str = "127.0.0.1:7000";

#[derive(Deserialize)]
struct ParseForm {
    formula: String,
}

#[derive(Deserialize)]
struct ProveForm {
    formula: String,
    params: Option<String>,
}

async fn index() -> impl Responder {
    HttpResponse::Ok().body(
        "Widerlegbar API Server

Available calculus endpoints:
prop-resolution",
    )
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = env::var("WIDERLEGBAR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    log::info!("listening on {addr}");

    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .route("/", web::get().to(index))
            // Prop Resolution
            .route("/prop-resolution", web::get().to(resolution::prop))
            .route(
                "/prop-resolution/parse",
                web::post().to(resolution::prop_parse),
            )
            .route(
                "/prop-resolution/prove",
                web::post().to(resolution::prop_prove),
            )
    })
    .bind(addr)?
    .run()
    .await
}

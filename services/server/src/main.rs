mod config;
mod controllers;
mod services;
mod types;

use std::env;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use bet_store::BetStore;
use dotenvy::dotenv;
use log::info;

use crate::config::MatchConfig;
use crate::controllers::bet_controller::{get_match, place_bet};
use crate::controllers::dashboard_controller::{get_dashboard_bets, get_dashboard_summary};
use crate::services::dashboard_feed::DashboardFeed;

async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status": "Ok"}"#)
}

async fn run() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let store = BetStore::connect(&database_url)
        .await
        .expect("Failed to connect to bet store");
    let store = BetStore::init_global(store);

    let feed = DashboardFeed::start(store).await;

    let config_data = web::Data::new(MatchConfig::load());
    let dashboard_data = web::Data::from(feed.state());

    info!("Server listening on {}", bind_addr);

    let result = HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(dashboard_data.clone())
            .service(place_bet)
            .service(get_match)
            .service(get_dashboard_summary)
            .service(get_dashboard_bets)
            .route("/health", web::get().to(health))
    })
    .bind(&bind_addr)?
    .run()
    .await;

    feed.stop().await;
    result
}

fn main() -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime");
    runtime.block_on(run())
}

//! Entry point of the patient registry service.
//! Loads the patient store and starts the web server with Axum.

mod backend;
mod consts;
mod database;
mod models;
mod utils;

use std::net::SocketAddr;

use dotenv::dotenv;
use log::info;

use crate::consts::HTTP_PORT;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Load the patient records from disk
    database::load().expect("Failed to load the patient store");

    let app = backend::router::get_router();

    // Start the web server
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to open web server listener");

    axum::serve(listener, app)
        .await
        .expect("Failed to bind Axum to listener");
}

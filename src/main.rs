use crate::api::Api;
use crate::app::App;
use crate::config::AppConfig;
use crate::domain::address::AddressTree;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod admin;
mod api;
mod app;
mod auth;
mod config;
mod domain;
mod errors;
mod forms;
mod handlers;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let regions = match AddressTree::from_json_file(&config.address_tree_path) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Address tree load failed: {e}");
            std::process::exit(1);
        }
    };

    let api = match Api::new(&config.api_base_url) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("API client setup failed: {e}");
            std::process::exit(1);
        }
    };

    let app = App::new(api, regions);

    let addr: SocketAddr = match config.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid listen address '{}': {e}", config.listen_addr);
            std::process::exit(1);
        }
    };
    println!("Starting portal server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}

use dioxus::prelude::*;
use std::env;

use api::config::AppMode;
use views::Home;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    install_panic_hook();
    log_runtime_config();

    #[cfg(feature = "server")]
    server::launch();

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
}

fn log_runtime_config() {
    let ip = env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    eprintln!("startup: IP={ip} PORT={port}");

    if AppMode::from_env() == AppMode::Production {
        log_missing_envs("storage", &["BLOB_READ_WRITE_TOKEN"]);
    }
}

fn log_missing_envs(group: &str, keys: &[&str]) {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| env::var(key).ok().is_none())
        .collect();
    if missing.is_empty() {
        return;
    }

    eprintln!(
        "startup: WARNING missing {group} envs: {}",
        missing.join(", ")
    );
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::AppTheme {}
        Router::<Route> {}
    }
}

/// A web-specific layout wrapping every route with the top bar.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        div { class: "site_nav",
            div { class: "site_nav_inner",
                a { class: "brand", href: "/",
                    span { class: "brand_mark" }
                    span { class: "brand_name", "Blob Shelf" }
                }
            }
        }
        div { class: "site_container route_view", Outlet::<Route> {} }
    }
}

#[cfg(feature = "server")]
mod server {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::Router;
    use dioxus_server::{DioxusRouterExt, ServeConfig};
    use tower_http::{services::ServeDir, trace::TraceLayer};
    use tracing_subscriber::EnvFilter;

    use api::config::{AppConfig, StorageConfig};
    use api::state::AppState;

    use super::App;

    pub fn launch() {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to start tokio runtime")
            .block_on(serve());
    }

    async fn serve() {
        dotenvy::dotenv().ok();
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();

        let config = AppConfig::from_env();
        let state = match AppState::from_config(&config) {
            Ok(state) => Arc::new(state),
            Err(err) => {
                tracing::error!("failed to initialize storage: {err:#}");
                std::process::exit(1);
            }
        };

        let mut api_router = Router::new()
            .merge(api::http::router(state))
            .layer(TraceLayer::new_for_http());
        if let StorageConfig::Filesystem { base_path, .. } = &config.storage {
            // Local mode serves uploaded objects back itself.
            api_router = api_router.nest_service("/dev/uploads", ServeDir::new(base_path));
        }
        let router = Router::new()
            .serve_dioxus_application(ServeConfig::new(), App)
            .merge(api_router);

        let addr = listen_addr(&config);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind listen address");
        tracing::info!(
            "Server listening on http://{}",
            listener.local_addr().expect("listener has a local address")
        );
        axum::serve(listener, router.into_make_service())
            .await
            .expect("server exited unexpectedly");
    }

    /// `IP`/`PORT` override the listen address; otherwise use whatever the
    /// Dioxus CLI hands us (or localhost when running outside `dx`).
    fn listen_addr(config: &AppConfig) -> SocketAddr {
        let overridden = std::env::var("IP").is_ok() || std::env::var("PORT").is_ok();
        if overridden {
            format!("{}:{}", config.host, config.port)
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], config.port)))
        } else {
            dioxus::cli_config::fullstack_address_or_localhost()
        }
    }
}

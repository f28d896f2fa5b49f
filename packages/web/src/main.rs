use dioxus::prelude::*;

use ui::AuthProvider;
use views::{About, Account, Dashboard, Home, Login, NotFound, Shell, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/account")]
        Account {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(launch_server()),
            Err(e) => eprintln!("Failed to start tokio runtime: {e}"),
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed by the dev tooling.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

    dotenvy::dotenv().ok();
    init_tracing();

    // Fail fast on a bad API URL instead of on the first request.
    match api::backend::get_client().await {
        Ok(client) => tracing::info!("Using external API at {}", client.config().base_url),
        Err(e) => {
            tracing::error!("Invalid external API configuration: {}", e);
            return;
        }
    }

    let secure_cookie = std::env::var("SESSION_SECURE_COOKIE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Sessions only hold the identity and the cookies relayed to the external API.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name("demandwork_session")
        .with_secure(secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = axum::Router::new()
        .route("/healthz", get(health_check))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(DefaultBodyLimit::max(api::validate::MAX_REQUEST_BODY_BYTES))
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

#[cfg(feature = "server")]
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "demandwork-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Title { "DemandWork.AI" }
        document::Meta { name: "description", content: "AI-powered job assistant platform" }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

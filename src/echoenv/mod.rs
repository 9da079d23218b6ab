use crate::echoenv::{
    environment::EnvSource,
    handlers::{health, health::__path_health, hello_world::__path_hello_world},
};
use anyhow::{Context, Result};
use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::Redirect,
    routing::get,
    Extension, Router,
};
use mac_address::get_mac_address;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod environment;
mod handlers;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = if let Some(hash) = built_info::GIT_COMMIT_HASH {
    hash
} else {
    "unknown"
};

#[derive(OpenApi)]
#[openapi(
    paths(hello_world, health),
    components(
        schemas(health::Health)
    ),
    tags(
        (name = "echoenv", description = "Environment and request-header echo API"),
    )
)]
struct ApiDoc;

/// Build the application router, with `env` as the environment lookup
/// handed to handlers.
fn app(env: EnvSource) -> Router {
    let swagger = SwaggerUi::new("/ui/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        // GET is the only method this service answers
        .allow_methods([Method::GET])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { Redirect::to("/ui/api-docs") }))
        .route("/api/hello-world", get(handlers::hello_world))
        .route("/health", get(handlers::health).options(handlers::health))
        .merge(swagger)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(env))
                .layer(PropagateHeaderLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| {
                        let node_id: [u8; 6] = node_id();
                        let uuid = uuid::Uuid::now_v1(&node_id);
                        HeaderValue::from_str(uuid.to_string().as_str()).ok()
                    },
                ))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Bind the listener and serve until SIGINT or SIGTERM.
/// # Errors
/// Will return an error if the port cannot be bound or the server faults
pub async fn new(port: u16) -> Result<()> {
    let app = app(EnvSource::process());

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind [::]:{port}"))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = GIT_COMMIT_HASH,
        "Listening on [::]:{}",
        port
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

#[must_use]
pub fn node_id() -> [u8; 6] {
    get_mac_address()
        .ok()
        .flatten()
        .map_or([0; 6], |mac| mac.bytes())
}

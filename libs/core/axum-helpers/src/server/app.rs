use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI at `/swagger-ui`, document at `/api-docs/openapi.json`)
/// - API routes nested under `/api`
/// - Request tracing (one INFO span per request, INFO events on request and on response)
/// - Security headers
/// - Plain-text 404 fallback handler
///
/// Health endpoints (/health, /ready) should be merged by the app
/// using `health_router()` and its own ready handler.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let api_routes = Router::new().nest("/users", users_router);
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
}

/// Wraps the fully merged router so `/api/users/` is routed as `/api/users`.
///
/// Path normalization has to run before routing, so it wraps the router
/// instead of being one of its layers.
pub fn trim_trailing_slash(router: Router) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router)
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Binds `server_config.address()`, serves until SIGINT or SIGTERM, then:
/// 1. stops accepting new connections,
/// 2. gives in-flight requests at most `shutdown_timeout` to finish,
/// 3. runs `cleanup` (close database connections, etc.).
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::{close_postgres, create_production_app};
///
/// create_production_app(
///     router,
///     &config.server,
///     Duration::from_secs(5),
///     async move { close_postgres(db, "main").await },
/// ).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::default();
    let signal_handle = coordinator.clone();
    tokio::spawn(async move {
        signal_handle.wait_for_signal().await;
    });

    serve_with_shutdown(listener, router, coordinator, shutdown_timeout, cleanup).await
}

/// Serves `router` on an already bound listener until `coordinator` requests
/// shutdown, then drains for at most `shutdown_timeout` and runs `cleanup`.
///
/// `cleanup` runs after the server stopped, whether draining finished in time
/// or not.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let graceful = coordinator.clone();
    let app = trim_trailing_slash(router);

    let serve = axum::serve(
        listener,
        axum::ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(async move { graceful.wait().await })
    .into_future();
    tokio::pin!(serve);

    let serve_result = tokio::select! {
        result = &mut serve => result,
        _ = coordinator.wait() => {
            info!(
                "Waiting for in-flight requests (timeout: {:?})",
                shutdown_timeout
            );
            match tokio::time::timeout(shutdown_timeout, &mut serve).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        "In-flight requests exceeded timeout of {:?}, forcing shutdown",
                        shutdown_timeout
                    );
                    Ok(())
                }
            }
        }
    };

    info!("Starting cleanup tasks");
    cleanup.await;
    info!("Cleanup completed");

    serve_result.inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    })
}

//! HTTP server assembly: storage wiring, middleware stack, route mounting.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::middleware::SessionAuth;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{AppError, ErrorBody, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpResponse, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web,
};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects the storage layer and applies pending migrations before any
    /// request can be served.
    pub async fn new(config: &Config) -> Result<Self> {
        let storage = crate::storage::StorageLayer::new(&config.storage).await?;
        storage.migrate().await?;

        let state = AppState::new(config.clone(), storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    ///
    /// Public so integration tests can drive the exact app the server runs,
    /// middleware included.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = build_cors(&state.config.server.cors);

        // Malformed JSON gets the same {"error": ...} body as every other
        // client failure.
        let json_config = web::JsonConfig::default()
            .limit(state.config.server.max_body_size)
            .error_handler(|err, _req| {
                let message = format!("Invalid request body: {}", err);
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(ErrorBody::message(message)),
                )
                .into()
            });

        // Registration order is inside-out: the session check runs inside
        // CORS so preflight requests are answered without a token.
        App::new()
            .app_data(state)
            .app_data(json_config)
            .wrap(SessionAuth)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "Workledger")))
            .configure(routes::health::configure_routes)
            .configure(routes::auth::configure_routes)
            .configure(routes::billing::configure_routes)
            .configure(routes::projects::configure_routes)
            .configure(routes::dashboard::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();
        let request_timeout = self.config.request_timeout();

        info!("Starting HTTP server on {} ({} workers)", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .client_request_timeout(request_timeout)
            .bind(&bind_addr)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AddrInUse => AppError::Config(format!(
                    "Address {} is already in use; is another instance running?",
                    bind_addr
                )),
                _ => AppError::Config(format!("Failed to bind {}: {}", bind_addr, e)),
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Translate [`CorsConfig`] into an `actix-cors` middleware instance.
///
/// Unparseable method or header names are skipped rather than failing
/// startup.
fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default().max_age(config.max_age as usize);

    if config.allows_all_origins() {
        if let Err(e) = config.validate() {
            warn!(error = %e, "CORS configuration warning");
        }
        cors = cors.allow_any_origin();
    } else {
        cors = config
            .allowed_origins
            .iter()
            .fold(cors, |c, origin| c.allowed_origin(origin));
    }

    let methods: Vec<actix_web::http::Method> = parse_list(&config.allowed_methods);
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = parse_list(&config.allowed_headers);
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

fn parse_list<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

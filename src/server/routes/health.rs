//! Health check and version endpoints

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Returns the service status together with a live database probe. This
/// endpoint is public and is typically used by load balancers and
/// monitoring systems.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let database = state.storage.health_check().await.is_ok();

    let health_status = HealthStatus {
        status: if database {
            Cow::Borrowed("healthy")
        } else {
            Cow::Borrowed("degraded")
        },
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        database,
    };

    Ok(HttpResponse::Ok().json(health_status))
}

/// Version information endpoint
///
/// Returns version and build information.
pub async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let build = crate::build_info();
    let version_info = VersionInfo {
        version: Cow::Borrowed(build.version),
        build_time: Cow::Borrowed(build.build_time),
        git_hash: Cow::Borrowed(build.git_hash),
        rust_version: Cow::Borrowed(build.rust_version),
    };

    HttpResponse::Ok().json(version_info)
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    version: Cow<'static, str>,
    database: bool,
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

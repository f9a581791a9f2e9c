//! Authentication endpoints
//!
//! Registration, login, logout, and the current-user lookup. Register and
//! login are the only public API routes; everything else sits behind the
//! session middleware.

mod login;
mod models;
mod register;
mod session;
mod user;

pub use login::login;
pub use models::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, UserResponse};
pub use register::register;
pub use session::logout;
pub use user::current_user;

use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(current_user)),
    );
}

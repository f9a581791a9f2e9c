//! Helper functions for middleware

use actix_web::http::header::HeaderMap;

/// Extract the session token from headers
///
/// The token travels either as `Authorization: Session <token>` or inside
/// the session cookie; the header wins when both are present.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    // Check Authorization header
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(stripped) = auth_str.strip_prefix("Session ") {
                return Some(stripped.to_string());
            }
        }
    }

    // Check session cookie
    if let Some(cookie_header) = headers.get("cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            let prefix = format!("{}=", cookie_name);
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(stripped) = cookie.strip_prefix(prefix.as_str()) {
                    return Some(stripped.to_string());
                }
            }
        }
    }

    None
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &[
        "/health",
        "/version",
        "/api/auth/register",
        "/api/auth/login",
    ];

    PUBLIC_ROUTES.iter().any(|&route| path.starts_with(route))
}

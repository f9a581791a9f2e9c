//! HTTP API tests
//!
//! Drives the real application, middleware included, through an in-process
//! service. Covers the session gate answering 401 before any handler runs,
//! the public routes, the register/login/logout flow, and the `{"error"}`
//! body shape on every failure path.

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, test, web};
    use serde_json::Value;
    use workledger::config::Config;
    use workledger::server::{AppState, HttpServer};
    use workledger::storage::StorageLayer;

    /// Application state backed by a fresh in-memory database
    async fn app_state() -> web::Data<AppState> {
        let mut config = Config::default();
        config.storage.database.url = "sqlite::memory:".to_string();
        config.storage.database.max_connections = 1;
        config.storage.database.sqlx_logging = false;

        let storage = StorageLayer::new(&config.storage)
            .await
            .expect("Failed to create test storage");
        storage.migrate().await.expect("Failed to run migrations");

        web::Data::new(AppState::new(config, storage))
    }

    /// Assert that a request dies at the session gate with the 401 body
    macro_rules! assert_unauthorized {
        ($app:expr, $req:expr) => {{
            let err = test::try_call_service(&$app, $req)
                .await
                .err()
                .expect("request should be rejected before any handler");
            let resp = HttpResponse::from_error(err);
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));
        }};
    }

    /// Register a user and log in, returning the session token
    macro_rules! register_and_login {
        ($app:expr, $username:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(serde_json::json!({
                    "username": $username,
                    "email": format!("{}@example.com", $username),
                    "password": "Password123",
                }))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(serde_json::json!({
                    "username": $username,
                    "password": "Password123",
                }))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            body["token"]
                .as_str()
                .expect("login response carries no token")
                .to_string()
        }};
    }

    fn session_header(token: &str) -> (&'static str, String) {
        ("authorization", format!("Session {}", token))
    }

    // ==================== Public Route Tests ====================

    #[tokio::test]
    async fn test_health_is_public() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("server").unwrap(), "Workledger");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
    }

    #[tokio::test]
    async fn test_version_is_public() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/version").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["build_time"].is_string());
        assert!(body["rust_version"].is_string());
    }

    // ==================== Session Gate Tests ====================

    #[tokio::test]
    async fn test_protected_routes_reject_anonymous_requests() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        assert_unauthorized!(app, req);

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        assert_unauthorized!(app, req);

        let req = test::TestRequest::get()
            .uri("/api/billing/accounts")
            .to_request();
        assert_unauthorized!(app, req);
    }

    #[tokio::test]
    async fn test_session_gate_runs_before_body_handling() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        // A body that would fail validation still gets 401, not 400
        let req = test::TestRequest::post()
            .uri("/api/billing/invoices")
            .set_json(serde_json::json!({"amount": -5}))
            .to_request();
        assert_unauthorized!(app, req);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(session_header("deadbeef"))
            .to_request();
        assert_unauthorized!(app, req);
    }

    // ==================== Auth Flow Tests ====================

    #[tokio::test]
    async fn test_register_login_logout_flow() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "Password123",
                "displayName": "Alice",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["displayName"], "Alice");
        // Nothing secret leaves the server
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "alice",
                "password": "Password123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .headers()
            .get(actix_web::http::header::SET_COOKIE)
            .expect("login sets the session cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session="));
        let body: Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(body["user"]["username"], "alice");

        // The token authenticates via header
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "alice");

        // And via cookie
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("cookie", format!("session={}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // Logout revokes the session and expires the cookie
        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let removal = resp
            .headers()
            .get(actix_web::http::header::SET_COOKIE)
            .expect("logout clears the session cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(removal.starts_with("session="));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"success": true}));

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(session_header(&token))
            .to_request();
        assert_unauthorized!(app, req);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        register_and_login!(app, "bob");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "bob",
                "password": "WrongPassword1",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Invalid credentials"}));

        // Unknown usernames read exactly the same
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "nobody",
                "password": "Password123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn test_register_validation_reports_every_field() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "username": "ab",
                "email": "not-an-email",
                "password": "short",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        let errors = body["error"].as_array().expect("field error list");
        assert_eq!(errors.len(), 3);
        let fields: Vec<_> = errors
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;

        register_and_login!(app, "carol");

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "username": "carol",
                "email": "carol2@example.com",
                "password": "Password123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Username already exists"}));
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_body() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;
        let token = register_and_login!(app, "dave");

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(session_header(&token))
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().expect("error message");
        assert!(message.starts_with("Invalid request body:"));
    }

    // ==================== Billing Flow Tests ====================

    #[tokio::test]
    async fn test_billing_account_and_invoice_flow() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;
        let token = register_and_login!(app, "erin");

        // No account yet
        let req = test::TestRequest::get()
            .uri("/api/billing/accounts")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Billing account not found"}));

        // Open the account
        let req = test::TestRequest::post()
            .uri("/api/billing/accounts")
            .insert_header(session_header(&token))
            .set_json(serde_json::json!({
                "billingAddress": "1 Main Street",
                "paymentMethod": "card",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["accountNumber"].as_str().unwrap().starts_with("ACC-"));
        assert_eq!(body["billingAddress"], "1 Main Street");

        // The overview flattens the account and adds its collections
        let req = test::TestRequest::get()
            .uri("/api/billing/accounts")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["accountNumber"].is_string());
        assert_eq!(body["subscriptions"], serde_json::json!([]));
        assert_eq!(body["invoices"], serde_json::json!([]));

        // Raise an invoice
        let req = test::TestRequest::post()
            .uri("/api/billing/invoices")
            .insert_header(session_header(&token))
            .set_json(serde_json::json!({"amount": 100.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["invoiceNumber"].as_str().unwrap().starts_with("INV-"));
        assert_eq!(body["status"], "pending");
        let invoice_id = body["id"].as_str().unwrap().to_string();

        // Detail view computes the totals block
        let req = test::TestRequest::get()
            .uri(&format!("/api/billing/invoices/{}", invoice_id))
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["totals"]["subtotal"], 100.0);
        assert_eq!(body["totals"]["tax"], 10.0);
        assert_eq!(body["totals"]["total"], 110.0);
        assert_eq!(body["transactions"], serde_json::json!([]));

        // An explicit successful credit settles the invoice
        let req = test::TestRequest::post()
            .uri("/api/billing/transactions")
            .insert_header(session_header(&token))
            .set_json(serde_json::json!({
                "invoiceId": invoice_id,
                "amount": 110.0,
                "status": "success",
                "transactionType": "credit",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri(&format!("/api/billing/invoices/{}", invoice_id))
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "paid");
        assert!(body["paidDate"].is_string());
        assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
    }

    // ==================== Project Flow Tests ====================

    #[tokio::test]
    async fn test_project_crud_over_http() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;
        let token = register_and_login!(app, "frank");
        let other_token = register_and_login!(app, "grace");

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header(session_header(&token))
            .set_json(serde_json::json!({"name": "Atlas"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "Atlas");
        assert_eq!(body["status"], "active");
        let project_id = body["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/projects")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        // Detail embeds the owner under `user`
        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["username"], "frank");
        assert_eq!(body["members"], serde_json::json!([]));

        // A stranger is refused
        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(session_header(&other_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));

        let req = test::TestRequest::put()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(session_header(&token))
            .set_json(serde_json::json!({"description": "Mapping work"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["description"], "Mapping work");
        assert_eq!(body["name"], "Atlas");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"success": true}));

        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"error": "Project not found"}));
    }

    // ==================== Dashboard Tests ====================

    #[tokio::test]
    async fn test_dashboard_for_fresh_user() {
        let state = app_state().await;
        let app = test::init_service(HttpServer::create_app(state)).await;
        let token = register_and_login!(app, "heidi");

        let req = test::TestRequest::get()
            .uri("/api/dashboard")
            .insert_header(session_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({
                "projects": [],
                "projectCount": 0,
                "billing": null,
            })
        );
    }
}

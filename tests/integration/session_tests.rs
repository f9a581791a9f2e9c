//! Session lifecycle tests
//!
//! Token issue, validation, expiry and revocation through the session
//! manager, backed by a real in-memory database.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::UserFactory;
    use chrono::{Duration, Utc};
    use workledger::auth::{SessionManager, generate_session_token};
    use workledger::config::models::AuthConfig;
    use workledger::utils::error::AppError;

    fn manager(db: &TestDatabase) -> SessionManager {
        SessionManager::new(db.db_arc(), AuthConfig::default())
    }

    // ==================== Issue and Validate Tests ====================

    #[tokio::test]
    async fn test_session_round_trip() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let session = sessions
            .create_session(
                user.id,
                Some("203.0.113.9".to_string()),
                Some("workledger-test".to_string()),
            )
            .await
            .expect("session creation failed");

        // Opaque token, 32 bytes hex encoded
        assert_eq!(session.id.len(), 64);
        assert!(session.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(session.is_active);
        assert_eq!(session.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(session.user_agent.as_deref(), Some("workledger-test"));

        let identity = sessions
            .authenticate(&session.id)
            .await
            .expect("authentication failed");
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.session_id, session.id);
        assert_eq!(identity.username, user.username);
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let db = TestDatabase::new().await;
        let sessions = manager(&db);

        let err = sessions.authenticate("no-such-token").await.unwrap_err();
        match err {
            AppError::Unauthenticated(message) => assert_eq!(message, "Unauthorized"),
            other => panic!("expected Unauthenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_session() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let first = sessions.create_session(user.id, None, None).await.unwrap();
        let second = sessions.create_session(user.id, None, None).await.unwrap();
        assert_ne!(first.id, second.id);

        // Both stay valid; logging in twice does not kill the first session
        assert!(sessions.authenticate(&first.id).await.is_ok());
        assert!(sessions.authenticate(&second.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_touches_last_accessed() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let session = sessions.create_session(user.id, None, None).await.unwrap();
        sessions.authenticate(&session.id).await.unwrap();

        let (refreshed, _) = db
            .db()
            .find_active_session(&session.id)
            .await
            .unwrap()
            .expect("session vanished");
        assert!(refreshed.last_accessed_at > session.last_accessed_at);
    }

    // ==================== Expiry Tests ====================

    #[tokio::test]
    async fn test_expired_session_rejected_and_revoked() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        // Plant a session that expired an hour ago
        let token = generate_session_token();
        db.db()
            .create_session(&token, user.id, Utc::now() - Duration::hours(1), None, None)
            .await
            .unwrap();

        let err = sessions.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));

        // Rejection deactivates the session, so the token is dead for good
        assert!(db.db().find_active_session(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_session_sweeps_expired_rows() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let stale = generate_session_token();
        db.db()
            .create_session(&stale, user.id, Utc::now() - Duration::days(2), None, None)
            .await
            .unwrap();

        // Issuing a fresh session cleans up the dead row
        sessions.create_session(user.id, None, None).await.unwrap();
        assert!(db.db().find_active_session(&stale).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_sessions_spares_live_ones() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        for _ in 0..2 {
            let token = generate_session_token();
            db.db()
                .create_session(&token, user.id, Utc::now() - Duration::hours(1), None, None)
                .await
                .unwrap();
        }
        let live = sessions.create_session(user.id, None, None).await.unwrap();

        let removed = db.db().delete_expired_sessions(Utc::now()).await.unwrap();
        assert_eq!(removed, 2);
        assert!(sessions.authenticate(&live.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_session_expiry_follows_configured_ttl() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = SessionManager::new(
            db.db_arc(),
            AuthConfig {
                session_ttl_hours: 2,
                ..Default::default()
            },
        );

        let session = sessions.create_session(user.id, None, None).await.unwrap();
        let expected = Utc::now() + Duration::hours(2);
        let delta = expected - session.expires_at.with_timezone(&Utc);
        assert!(delta.num_seconds().abs() < 60);
    }

    // ==================== Revocation Tests ====================

    #[tokio::test]
    async fn test_revoked_session_rejected() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let session = sessions.create_session(user.id, None, None).await.unwrap();
        sessions.revoke(&session.id).await.unwrap();

        let err = sessions.authenticate(&session.id).await.unwrap_err();
        match err {
            AppError::Unauthenticated(message) => assert_eq!(message, "Unauthorized"),
            other => panic!("expected Unauthenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_revoking_one_session_leaves_others() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let sessions = manager(&db);

        let kept = sessions.create_session(user.id, None, None).await.unwrap();
        let dropped = sessions.create_session(user.id, None, None).await.unwrap();

        sessions.revoke(&dropped.id).await.unwrap();

        assert!(sessions.authenticate(&dropped.id).await.is_err());
        assert!(sessions.authenticate(&kept.id).await.is_ok());
    }
}

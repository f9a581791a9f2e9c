//! Project access control tests
//!
//! Owners and members can read; only owners can write or delete. Missing
//! projects report not-found before any authorization check.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{ProjectFactory, UserFactory, identity_for};
    use uuid::Uuid;
    use workledger::services::{ProjectPatch, ProjectService};
    use workledger::utils::error::AppError;

    fn service(db: &TestDatabase) -> ProjectService {
        ProjectService::new(db.db_arc())
    }

    // ==================== Read Access Tests ====================

    #[tokio::test]
    async fn test_owner_reads_project_detail() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let member = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;
        ProjectFactory::add_member(db.db(), project.id, member.id).await;

        let detail = projects
            .project_detail(&identity_for(&owner), project.id)
            .await
            .expect("detail failed");

        assert_eq!(detail.project.id, project.id);
        assert_eq!(detail.owner.as_ref().map(|u| u.id), Some(owner.id));
        assert_eq!(detail.members.len(), 1);
        let (membership, member_user) = &detail.members[0];
        assert_eq!(membership.user_id, member.id);
        assert_eq!(member_user.as_ref().map(|u| u.id), Some(member.id));
    }

    #[tokio::test]
    async fn test_member_can_read_project() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let member = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;
        ProjectFactory::add_member(db.db(), project.id, member.id).await;

        let detail = projects
            .project_detail(&identity_for(&member), project.id)
            .await
            .expect("member read failed");
        assert_eq!(detail.project.id, project.id);
    }

    #[tokio::test]
    async fn test_non_member_read_forbidden() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let outsider = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;

        let err = projects
            .project_detail(&identity_for(&outsider), project.id)
            .await
            .unwrap_err();
        match err {
            AppError::Forbidden(message) => assert_eq!(message, "Unauthorized"),
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_project_reports_not_found() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let projects = service(&db);

        // Not-found must win over forbidden for a project that does not
        // exist, whoever asks.
        let err = projects
            .project_detail(&identity_for(&user), Uuid::new_v4())
            .await
            .unwrap_err();
        match err {
            AppError::NotFound(message) => assert_eq!(message, "Project not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    // ==================== Write Access Tests ====================

    #[tokio::test]
    async fn test_update_is_owner_only() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let member = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;
        ProjectFactory::add_member(db.db(), project.id, member.id).await;

        // Membership grants reads, not writes
        let err = projects
            .update_project(
                &identity_for(&member),
                project.id,
                ProjectPatch {
                    name: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let updated = projects
            .update_project(
                &identity_for(&owner),
                project.id,
                ProjectPatch {
                    name: Some("Atlas v2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("owner update failed");
        assert_eq!(updated.name, "Atlas v2");
    }

    #[tokio::test]
    async fn test_update_patches_present_fields_only() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;

        let updated = projects
            .update_project(
                &identity_for(&owner),
                project.id,
                ProjectPatch {
                    status: Some("archived".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update failed");

        assert_eq!(updated.status, "archived");
        // Untouched fields survive
        assert_eq!(updated.name, "Atlas");
        assert_eq!(updated.description.as_deref(), Some("A test project"));
        assert!(updated.updated_at >= project.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;

        let err = projects
            .update_project(
                &identity_for(&owner),
                project.id,
                ProjectPatch {
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields[0].field, "name");
                assert_eq!(fields[0].message, "Project name is required");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_project_not_found() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let err = projects
            .update_project(&identity_for(&user), Uuid::new_v4(), ProjectPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_delete_is_owner_only() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let member = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;
        ProjectFactory::add_member(db.db(), project.id, member.id).await;

        let err = projects
            .delete_project(&identity_for(&member), project.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // Still there
        assert!(db.db().find_project(project.id).await.unwrap().is_some());

        projects
            .delete_project(&identity_for(&owner), project.id)
            .await
            .expect("owner delete failed");
        assert!(db.db().find_project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_membership_rows() {
        let db = TestDatabase::new().await;
        let owner = UserFactory::create(db.db()).await;
        let member = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let project = ProjectFactory::owned_by(db.db(), owner.id, "Atlas").await;
        ProjectFactory::add_member(db.db(), project.id, member.id).await;

        projects
            .delete_project(&identity_for(&owner), project.id)
            .await
            .unwrap();

        assert!(
            !db.db()
                .is_project_member(project.id, member.id)
                .await
                .unwrap()
        );
    }

    // ==================== Creation Tests ====================

    #[tokio::test]
    async fn test_create_project_requires_name() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let identity = identity_for(&user);
        let projects = service(&db);

        let err = projects
            .create_project(&identity, None, None, None)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields[0].field, "name");
                assert_eq!(fields[0].message, "Required");
            }
            other => panic!("expected Validation, got {:?}", other),
        }

        let err = projects
            .create_project(&identity, Some("  ".to_string()), None, None)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields[0].message, "Project name is required");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_project_defaults_to_active() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let created = projects
            .create_project(
                &identity_for(&user),
                Some("Atlas".to_string()),
                Some("Mapping work".to_string()),
                None,
            )
            .await
            .expect("create failed");

        assert_eq!(created.status, "active");
        assert_eq!(created.owner_id, user.id);
        assert_eq!(created.description.as_deref(), Some("Mapping work"));
    }

    // ==================== Listing Tests ====================

    #[tokio::test]
    async fn test_list_covers_owned_and_member_projects() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let other = UserFactory::create(db.db()).await;
        let projects = service(&db);

        let owned = ProjectFactory::owned_by(db.db(), user.id, "Mine").await;
        let shared = ProjectFactory::owned_by(db.db(), other.id, "Shared").await;
        ProjectFactory::add_member(db.db(), shared.id, user.id).await;
        // Unrelated project must not leak into the list
        ProjectFactory::owned_by(db.db(), other.id, "Private").await;

        let listed = projects.list_projects(&identity_for(&user)).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&owned.id));
        assert!(ids.contains(&shared.id));
    }

    #[tokio::test]
    async fn test_list_orders_by_most_recent_update() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let identity = identity_for(&user);
        let projects = service(&db);

        let first = ProjectFactory::owned_by(db.db(), user.id, "First").await;
        let second = ProjectFactory::owned_by(db.db(), user.id, "Second").await;

        // Touching the older project moves it to the front
        projects
            .update_project(
                &identity,
                first.id,
                ProjectPatch {
                    description: Some("bumped".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let listed = projects.list_projects(&identity).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    // ==================== Dashboard Tests ====================

    #[tokio::test]
    async fn test_dashboard_counts_owned_projects_only() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let other = UserFactory::create(db.db()).await;
        let projects = service(&db);

        ProjectFactory::owned_by(db.db(), user.id, "One").await;
        ProjectFactory::owned_by(db.db(), user.id, "Two").await;
        let shared = ProjectFactory::owned_by(db.db(), other.id, "Theirs").await;
        ProjectFactory::add_member(db.db(), shared.id, user.id).await;

        let (count, recent) = projects
            .dashboard_overview(&identity_for(&user))
            .await
            .unwrap();

        // Membership widens the list view but not the dashboard
        assert_eq!(count, 2);
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|p| p.owner_id == user.id));
    }

    #[tokio::test]
    async fn test_dashboard_caps_recent_projects_at_five() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create(db.db()).await;
        let projects = service(&db);

        for i in 1..=6 {
            ProjectFactory::owned_by(db.db(), user.id, &format!("Project {}", i)).await;
        }

        let (count, recent) = projects
            .dashboard_overview(&identity_for(&user))
            .await
            .unwrap();
        assert_eq!(count, 6);
        assert_eq!(recent.len(), 5);
        // Most recently created leads
        assert_eq!(recent[0].name, "Project 6");
    }
}

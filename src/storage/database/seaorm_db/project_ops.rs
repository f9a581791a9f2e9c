use super::types::SeaOrmDatabase;
use crate::storage::database::entities::{
    project, project_member, user, Project, ProjectMember, User,
};
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

impl SeaOrmDatabase {
    /// Create a project owned by the given user
    pub async fn insert_project(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<String>,
        status: &str,
    ) -> Result<project::Model> {
        debug!("Creating project '{}' for owner: {}", name, owner_id);
        let now = Utc::now();
        let record = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            name: Set(name.to_string()),
            description: Set(description),
            status: Set(status.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        record.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Get a project by ID
    pub async fn find_project(&self, project_id: Uuid) -> Result<Option<project::Model>> {
        Project::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Projects the user can see: owned ones plus ones they are a member of,
    /// most recently updated first
    pub async fn list_projects_for_user(&self, user_id: Uuid) -> Result<Vec<project::Model>> {
        let member_project_ids = self.member_project_ids(user_id).await?;

        Project::find()
            .filter(
                Condition::any()
                    .add(project::Column::OwnerId.eq(user_id))
                    .add(project::Column::Id.is_in(member_project_ids)),
            )
            .order_by_desc(project::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// The user's most recently updated owned projects
    ///
    /// Dashboard scope is owned projects only; membership does not widen it.
    pub async fn list_recent_owned_projects(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<project::Model>> {
        Project::find()
            .filter(project::Column::OwnerId.eq(user_id))
            .order_by_desc(project::Column::UpdatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// How many projects the user owns
    pub async fn count_owned_projects(&self, user_id: Uuid) -> Result<u64> {
        Project::find()
            .filter(project::Column::OwnerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }

    async fn member_project_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let memberships = ProjectMember::find()
            .filter(project_member::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(memberships.into_iter().map(|m| m.project_id).collect())
    }

    /// Whether the user has a membership row on the project
    pub async fn is_project_member(&self, project_id: Uuid, user_id: Uuid) -> Result<bool> {
        let count = ProjectMember::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .filter(project_member::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(count > 0)
    }

    /// Members of a project together with their user records
    pub async fn list_project_members(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<(project_member::Model, Option<user::Model>)>> {
        ProjectMember::find()
            .filter(project_member::Column::ProjectId.eq(project_id))
            .find_also_related(User)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Add a user to a project
    pub async fn add_project_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: Option<String>,
    ) -> Result<project_member::Model> {
        debug!("Adding member {} to project {}", user_id, project_id);
        let record = project_member::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            user_id: Set(user_id),
            role: Set(role),
            created_at: Set(Utc::now().into()),
        };

        record.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Update project fields
    ///
    /// Absent fields are left untouched rather than cleared.
    pub async fn update_project(
        &self,
        project: project::Model,
        name: Option<String>,
        description: Option<String>,
        status: Option<String>,
    ) -> Result<project::Model> {
        let mut update: project::ActiveModel = project.into();
        if let Some(name) = name {
            update.name = Set(name);
        }
        if let Some(description) = description {
            update.description = Set(Some(description));
        }
        if let Some(status) = status {
            update.status = Set(status);
        }
        update.updated_at = Set(Utc::now().into());

        update.update(&self.db).await.map_err(AppError::Database)
    }

    /// Delete a project and, through cascades, its membership rows
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        debug!("Deleting project: {}", project_id);
        Project::delete_by_id(project_id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}

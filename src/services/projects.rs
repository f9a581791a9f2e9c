//! Project service: listing, creation and owner/member access control
//!
//! Reads are open to the owner and members; updates and deletes are owner
//! only. A missing project reports 404 before any authorization check.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::auth::Identity;
use crate::storage::database::entities::{project, project_member, user};
use crate::storage::database::Database;
use crate::utils::error::{AppError, FieldError, Result};
use crate::utils::validation::{require_text, REQUIRED};

/// Partial update of a project; absent fields stay untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// A project with its owner and member users, for detail views
#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: project::Model,
    pub owner: Option<user::Model>,
    pub members: Vec<(project_member::Model, Option<user::Model>)>,
}

/// Project operations for the authenticated caller
#[derive(Debug, Clone)]
pub struct ProjectService {
    database: Arc<Database>,
}

impl ProjectService {
    /// Create a new project service
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Projects the caller owns or is a member of, most recently updated first
    pub async fn list_projects(&self, identity: &Identity) -> Result<Vec<project::Model>> {
        self.database.list_projects_for_user(identity.user_id).await
    }

    /// Create a project owned by the caller
    pub async fn create_project(
        &self,
        identity: &Identity,
        name: Option<String>,
        description: Option<String>,
        status: Option<String>,
    ) -> Result<project::Model> {
        let mut errors = Vec::new();

        let name = match name {
            Some(value) => {
                if let Err(e) = require_text("name", &value, "Project name is required") {
                    errors.push(e);
                }
                value
            }
            None => {
                errors.push(FieldError::new("name", REQUIRED));
                String::new()
            }
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let status = status.unwrap_or_else(|| project::STATUS_ACTIVE.to_string());
        let created = self
            .database
            .insert_project(identity.user_id, &name, description, &status)
            .await?;

        info!("Project '{}' created by {}", created.name, identity.username);
        Ok(created)
    }

    /// One project with owner and members, readable by owner or member
    pub async fn project_detail(
        &self,
        identity: &Identity,
        project_id: Uuid,
    ) -> Result<ProjectDetail> {
        let project = self
            .database
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let members = self.database.list_project_members(project.id).await?;

        let is_owner = project.owner_id == identity.user_id;
        let is_member = members
            .iter()
            .any(|(member, _)| member.user_id == identity.user_id);
        if !is_owner && !is_member {
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }

        let owner = self.database.find_user_by_id(project.owner_id).await?;

        Ok(ProjectDetail {
            project,
            owner,
            members,
        })
    }

    /// Apply a partial update; owner only
    pub async fn update_project(
        &self,
        identity: &Identity,
        project_id: Uuid,
        patch: ProjectPatch,
    ) -> Result<project::Model> {
        let project = self
            .database
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if project.owner_id != identity.user_id {
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }

        let mut errors = Vec::new();
        if let Some(name) = patch.name.as_deref() {
            if let Err(e) = require_text("name", name, "Project name is required") {
                errors.push(e);
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.database
            .update_project(project, patch.name, patch.description, patch.status)
            .await
    }

    /// Delete a project and its membership rows; owner only
    pub async fn delete_project(&self, identity: &Identity, project_id: Uuid) -> Result<()> {
        let project = self
            .database
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if project.owner_id != identity.user_id {
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }

        self.database.delete_project(project.id).await?;
        info!("Project '{}' deleted by {}", project.name, identity.username);
        Ok(())
    }

    /// Owned-project count and the five most recently updated, for the
    /// dashboard
    pub async fn dashboard_overview(
        &self,
        identity: &Identity,
    ) -> Result<(u64, Vec<project::Model>)> {
        let count = self.database.count_owned_projects(identity.user_id).await?;
        let recent = self
            .database
            .list_recent_owned_projects(identity.user_id, 5)
            .await?;
        Ok((count, recent))
    }
}

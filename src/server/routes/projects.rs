//! Project endpoints
//!
//! Listing and creation plus the detail/update/delete routes. Access rules
//! live in the project service: reads are owner-or-member, writes are owner
//! only, and a missing project always answers 404 first.

use crate::auth::Identity;
use crate::server::routes::auth::PublicUser;
use crate::server::state::AppState;
use crate::services::{ProjectDetail, ProjectPatch};
use crate::storage::database::entities::{project, project_member};
use crate::utils::error::AppError;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Project creation request
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Project update request; absent fields stay untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Project member with the member's public user record
#[derive(Debug, Serialize)]
pub struct ProjectMemberView {
    #[serde(flatten)]
    pub member: project_member::Model,
    pub user: Option<PublicUser>,
}

/// Project with its owner (under `user`) and members
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: project::Model,
    pub user: Option<PublicUser>,
    pub members: Vec<ProjectMemberView>,
}

impl From<ProjectDetail> for ProjectDetailResponse {
    fn from(detail: ProjectDetail) -> Self {
        Self {
            project: detail.project,
            user: detail.owner.map(PublicUser::from),
            members: detail
                .members
                .into_iter()
                .map(|(member, user)| ProjectMemberView {
                    member,
                    user: user.map(PublicUser::from),
                })
                .collect(),
        }
    }
}

/// Configure project routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/projects")
            .route("", web::get().to(list_projects))
            .route("", web::post().to(create_project))
            .route("/{id}", web::get().to(get_project))
            .route("/{id}", web::put().to(update_project))
            .route("/{id}", web::delete().to(delete_project)),
    );
}

/// Projects the caller owns or is a member of
pub async fn list_projects(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.projects.list_projects(&identity).await {
        Ok(projects) => Ok(HttpResponse::Ok().json(projects)),
        Err(e) => Ok(e.error_response()),
    }
}

/// Create a project owned by the caller
pub async fn create_project(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Project creation requested by {}", identity.username);

    let request = request.into_inner();
    match state
        .projects
        .create_project(&identity, request.name, request.description, request.status)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(created)),
        Err(e) => Ok(e.error_response()),
    }
}

/// One project with owner and members
pub async fn get_project(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Some(project_id) = parse_project_id(&path) else {
        return Ok(AppError::NotFound("Project not found".to_string()).error_response());
    };

    match state.projects.project_detail(&identity, project_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ProjectDetailResponse::from(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Apply a partial update to a project
pub async fn update_project(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateProjectRequest>,
) -> ActixResult<HttpResponse> {
    let Some(project_id) = parse_project_id(&path) else {
        return Ok(AppError::NotFound("Project not found".to_string()).error_response());
    };

    let request = request.into_inner();
    let patch = ProjectPatch {
        name: request.name,
        description: request.description,
        status: request.status,
    };

    match state
        .projects
        .update_project(&identity, project_id, patch)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(updated)),
        Err(e) => Ok(e.error_response()),
    }
}

/// Delete a project
pub async fn delete_project(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Some(project_id) = parse_project_id(&path) else {
        return Ok(AppError::NotFound("Project not found".to_string()).error_response());
    };

    match state.projects.delete_project(&identity, project_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(e) => Ok(e.error_response()),
    }
}

// A malformed id resolves to nothing, same as an unknown one
fn parse_project_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

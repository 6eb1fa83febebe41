use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, load_assignment, with_teacher};
use crate::errors::{AssignHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::UpdateAssignmentRequest, responses::AssignmentDetail,
};
use crate::policy::{Actor, assignment::check_edit};
use crate::services::{current_actor, unauthorized_response};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, validate_title};

async fn update(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
) -> Result<AssignmentDetail> {
    let assignment = load_assignment(storage, assignment_id).await?;
    check_edit(&assignment, actor)?;

    let title =
        optional_text(req.title, "Title cannot be empty").map_err(AssignHubError::validation)?;
    if let Some(title) = &title {
        validate_title(title).map_err(AssignHubError::validation)?;
    }
    let description = optional_text(req.description, "Description cannot be empty")
        .map_err(AssignHubError::validation)?;

    let update = UpdateAssignmentRequest {
        title,
        description,
        due_date: req.due_date,
    };
    if update.is_empty() {
        return with_teacher(storage, assignment).await;
    }

    match storage.update_draft_assignment(assignment_id, update).await? {
        Some(updated) => with_teacher(storage, updated).await,
        None => {
            // 条件更新未命中：作业已被删除或状态已变更
            let current = load_assignment(storage, assignment_id).await?;
            check_edit(&current, actor)?;
            Err(AssignHubError::invalid_transition(
                "Assignment is no longer editable",
            ))
        }
    }
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    match update(&storage, &actor, assignment_id, req).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Assignment updated successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

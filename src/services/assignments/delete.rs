use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, load_assignment};
use crate::errors::{AssignHubError, Result};
use crate::models::ApiResponse;
use crate::policy::{Actor, assignment::check_delete};
use crate::services::{current_actor, unauthorized_response};
use crate::storage::Storage;

async fn delete(storage: &Arc<dyn Storage>, actor: &Actor, assignment_id: i64) -> Result<()> {
    let assignment = load_assignment(storage, assignment_id).await?;
    check_delete(&assignment, actor)?;

    if storage.delete_draft_assignment(assignment_id).await? {
        tracing::info!(
            "Teacher {} deleted assignment {}",
            actor.id,
            assignment_id
        );
        return Ok(());
    }

    let current = load_assignment(storage, assignment_id).await?;
    check_delete(&current, actor)?;
    Err(AssignHubError::invalid_transition(
        "Can only delete draft assignments",
    ))
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    match delete(&storage, &actor, assignment_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{SubmissionService, with_relations};
use crate::errors::{AssignHubError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::{
    requests::CreateSubmissionRequest, responses::SubmissionDetail,
};
use crate::policy::{
    Actor,
    submission::{check_submit, ensure_first_submission},
};
use crate::services::assignments::load_assignment;
use crate::services::{current_actor, unauthorized_response};
use crate::storage::Storage;
use crate::utils::{Clock, validate::required_text};

/// 提交答案：校验答案 -> 作业存在 -> 已发布 -> 未截止 -> 未重复提交
async fn submit(
    storage: &Arc<dyn Storage>,
    clock: &Arc<dyn Clock>,
    actor: &Actor,
    req: CreateSubmissionRequest,
) -> Result<SubmissionDetail> {
    let answer =
        required_text(&req.answer, "Answer is required").map_err(AssignHubError::validation)?;

    let assignment = load_assignment(storage, req.assignment_id).await?;
    check_submit(&assignment, actor, clock.now())?;

    let existing = storage
        .get_submission_by_assignment_and_student(assignment.id, actor.id)
        .await?;
    ensure_first_submission(existing.as_ref())?;

    // 并发提交时由唯一索引兜底，同样返回 Duplicate
    let submission = storage
        .create_submission(assignment.id, actor.id, answer)
        .await?;

    tracing::info!(
        "Student {} submitted answer {} for assignment {}",
        actor.id,
        submission.id,
        assignment.id
    );

    with_relations(storage, submission, &assignment).await
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);
    let clock = service.get_clock(request);

    match submit(&storage, &clock, &actor, req).await {
        Ok(detail) => Ok(HttpResponse::Created().json(ApiResponse::success(
            detail,
            "Answer submitted successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

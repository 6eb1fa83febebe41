use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission, with_relations};
use crate::models::ApiResponse;
use crate::policy::submission::check_view;
use crate::services::assignments::load_assignment;
use crate::services::{current_actor, unauthorized_response};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    let result = async {
        let submission = load_submission(&storage, submission_id).await?;
        let assignment = load_assignment(&storage, submission.assignment_id).await?;
        check_view(&submission, &assignment, &actor)?;
        with_relations(&storage, submission, &assignment).await
    }
    .await;

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

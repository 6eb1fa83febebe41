use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::ApiResponse;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::policy::submission::check_review;
use crate::services::{current_actor, unauthorized_response};

/// 列出某作业的全部提交（仅所属教师）
pub async fn list_assignment_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    let result = async {
        let assignment = load_assignment(&storage, assignment_id).await?;
        check_review(&assignment, &actor)?;
        storage
            .list_submissions_with_pagination(SubmissionListQuery {
                page: Some(params.pagination.page),
                size: Some(params.pagination.size),
                assignment_id: Some(assignment_id),
                student_id: None,
            })
            .await
    }
    .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, with_relations};
use crate::models::ApiResponse;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::models::users::entities::UserRole;
use crate::policy::{Rejection, Resource, submission::check_review};
use crate::services::assignments::load_assignment;
use crate::services::{current_actor, unauthorized_response};

/// 某作业下的提交
///
/// 学生只能拿到自己的那一条（没有则 404），教师需为作业所有者并获得完整列表。
pub async fn get_submissions_for_assignment(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    if actor.role == UserRole::Student {
        let result = async {
            let submission = storage
                .get_submission_by_assignment_and_student(assignment_id, actor.id)
                .await?
                .ok_or(Rejection::NotFound(Resource::Submission))?;
            let assignment = load_assignment(&storage, assignment_id).await?;
            with_relations(&storage, submission, &assignment).await
        }
        .await;

        return match result {
            Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Submission retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        };
    }

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

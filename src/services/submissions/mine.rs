use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::AssignHubError;
use crate::models::ApiResponse;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::models::users::entities::UserRole;
use crate::policy::Rejection;
use crate::services::{current_actor, unauthorized_response};

/// 当前学生的全部提交
pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    let result = async {
        if actor.role != UserRole::Student {
            return Err(AssignHubError::from(Rejection::WrongRole {
                required: UserRole::Student,
            }));
        }
        storage
            .list_submissions_with_pagination(SubmissionListQuery {
                page: Some(params.pagination.page),
                size: Some(params.pagination.size),
                assignment_id: None,
                student_id: Some(actor.id),
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

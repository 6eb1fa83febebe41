use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::{
    entities::AssignmentStatus,
    requests::{AssignmentListParams, AssignmentListQuery},
};
use crate::models::users::entities::UserRole;
use crate::policy::Actor;
use crate::services::{current_actor, unauthorized_response};

/// 按角色构建查询：学生只能看到已发布作业，教师只能看到自己的作业
pub(crate) fn scoped_query(actor: &Actor, params: AssignmentListParams) -> AssignmentListQuery {
    let (teacher_id, status) = match actor.role {
        UserRole::Student => (None, Some(AssignmentStatus::Published)),
        UserRole::Teacher => (Some(actor.id), params.status),
    };

    AssignmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        teacher_id,
        status,
    }
}

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    match storage
        .list_assignments_with_pagination(scoped_query(&actor, params))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, load_assignment, with_teacher};
use crate::errors::{AssignHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::UpdateAssignmentStatusRequest, responses::AssignmentDetail,
};
use crate::policy::{
    Actor,
    assignment::{Transition, check_transition},
};
use crate::services::{current_actor, unauthorized_response};
use crate::storage::Storage;

async fn transition(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    assignment_id: i64,
    req: UpdateAssignmentStatusRequest,
) -> Result<AssignmentDetail> {
    let assignment = load_assignment(storage, assignment_id).await?;

    let (from, to) = match check_transition(&assignment, actor, req.status)? {
        Transition::Unchanged => return with_teacher(storage, assignment).await,
        Transition::Advanced { from, to } => (from, to),
    };

    if let Some(updated) = storage
        .transition_assignment_status(assignment_id, from, to)
        .await?
    {
        tracing::info!(
            "Assignment {} moved from {} to {} by teacher {}",
            assignment_id,
            from,
            to,
            actor.id
        );
        return with_teacher(storage, updated).await;
    }

    // 条件更新未命中：按最新状态重新判定
    let current = load_assignment(storage, assignment_id).await?;
    match check_transition(&current, actor, to)? {
        Transition::Unchanged => with_teacher(storage, current).await,
        Transition::Advanced { .. } => Err(AssignHubError::invalid_transition(
            "Assignment status changed concurrently, please retry",
        )),
    }
}

pub async fn update_assignment_status(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: UpdateAssignmentStatusRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    match transition(&storage, &actor, assignment_id, req).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Assignment status updated successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentStatus;
    use crate::services::assignments::testing::{assignment_in, fixture};
    use crate::services::testing::{body_json, request_as};
    use actix_web::http::StatusCode;

    fn to(status: AssignmentStatus) -> UpdateAssignmentStatusRequest {
        UpdateAssignmentStatusRequest { status }
    }

    #[actix_web::test]
    async fn test_forward_transitions() {
        let f = fixture().await;
        let a = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Draft).await;
        let service = AssignmentService::with_storage(f.storage.clone());
        let req = request_as(&f.teacher);

        let resp = service
            .update_assignment_status(&req, a.id, to(AssignmentStatus::Published))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["status"], "published");

        // 重复请求同一状态视为无操作
        let resp = service
            .update_assignment_status(&req, a.id, to(AssignmentStatus::Published))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = service
            .update_assignment_status(&req, a.id, to(AssignmentStatus::Completed))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["data"]["status"], "completed");
    }

    #[actix_web::test]
    async fn test_completed_is_terminal() {
        let f = fixture().await;
        let a = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Completed).await;
        let service = AssignmentService::with_storage(f.storage.clone());

        for target in [AssignmentStatus::Draft, AssignmentStatus::Published] {
            let resp = service
                .update_assignment_status(&request_as(&f.teacher), a.id, to(target))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let json = body_json(resp).await;
            assert_eq!(
                json["message"],
                "Cannot change status of completed assignment"
            );
        }

        let stored = f.storage.get_assignment_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AssignmentStatus::Completed);
    }

    #[actix_web::test]
    async fn test_skipping_publish_is_rejected() {
        let f = fixture().await;
        let a = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Draft).await;
        let service = AssignmentService::with_storage(f.storage.clone());

        let resp = service
            .update_assignment_status(
                &request_as(&f.teacher),
                a.id,
                to(AssignmentStatus::Completed),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .update_assignment_status(
                &request_as(&f.other_teacher),
                a.id,
                to(AssignmentStatus::Published),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment, with_teacher};
use crate::models::ApiResponse;
use crate::policy::assignment::ensure_visible;
use crate::services::{current_actor, unauthorized_response};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    let result = async {
        let assignment = load_assignment(&storage, assignment_id).await?;
        ensure_visible(&assignment, &actor)?;
        with_teacher(&storage, assignment).await
    }
    .await;

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Assignment retrieved successfully",
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

    #[actix_web::test]
    async fn test_visibility_rules() {
        let f = fixture().await;
        let draft = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Draft).await;
        let published = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Published).await;
        let service = AssignmentService::with_storage(f.storage.clone());

        let resp = service
            .get_assignment(&request_as(&f.teacher), draft.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = service
            .get_assignment(&request_as(&f.student), draft.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["message"], "Access denied");

        let resp = service
            .get_assignment(&request_as(&f.student), published.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = service
            .get_assignment(&request_as(&f.other_teacher), published.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = service
            .get_assignment(&request_as(&f.teacher), 9999)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Assignment not found");
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission, with_relations};
use crate::models::ApiResponse;
use crate::policy::{Rejection, Resource, submission::check_review};
use crate::services::assignments::load_assignment;
use crate::services::{current_actor, unauthorized_response};

/// 标记提交为已批阅，重复标记不报错
pub async fn review_submission(
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
        check_review(&assignment, &actor)?;

        let reviewed = storage
            .mark_submission_reviewed(submission_id)
            .await?
            .ok_or(Rejection::NotFound(Resource::Submission))?;
        tracing::info!(
            "Teacher {} reviewed submission {}",
            actor.id,
            submission_id
        );
        with_relations(&storage, reviewed, &assignment).await
    }
    .await;

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Submission marked as reviewed",
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
    use crate::utils::SystemClock;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_owner_marks_reviewed_idempotently() {
        let f = fixture().await;
        let a = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Completed).await;
        let s = f
            .storage
            .create_submission(a.id, f.student.id, "mine".to_string())
            .await
            .unwrap();
        let service = SubmissionService::new(f.storage.clone(), Arc::new(SystemClock));

        for _ in 0..2 {
            let resp = service
                .review_submission(&request_as(&f.teacher), s.id)
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let json = body_json(resp).await;
            assert_eq!(json["data"]["reviewed"], true);
            assert_eq!(json["data"]["student"]["name"], "Grace");
        }
    }

    #[actix_web::test]
    async fn test_review_requires_owner() {
        let f = fixture().await;
        let a = assignment_in(&f.storage, f.teacher.id, AssignmentStatus::Published).await;
        let s = f
            .storage
            .create_submission(a.id, f.student.id, "mine".to_string())
            .await
            .unwrap();
        let service = SubmissionService::new(f.storage.clone(), Arc::new(SystemClock));

        let resp = service
            .review_submission(&request_as(&f.other_teacher), s.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["message"], "Access denied");

        let resp = service
            .review_submission(&request_as(&f.teacher), 9999)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let stored = f.storage.get_submission_by_id(s.id).await.unwrap().unwrap();
        assert!(!stored.reviewed);
    }
}

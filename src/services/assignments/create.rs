use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, with_teacher};
use crate::errors::{AssignHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::CreateAssignmentRequest, responses::AssignmentDetail,
};
use crate::policy::{Actor, assignment::ensure_teacher};
use crate::services::{current_actor, unauthorized_response};
use crate::storage::Storage;
use crate::utils::validate::{required_text, validate_title};

async fn create(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    req: CreateAssignmentRequest,
) -> Result<AssignmentDetail> {
    ensure_teacher(actor)?;

    let title = required_text(&req.title, "Title is required").map_err(AssignHubError::validation)?;
    validate_title(&title).map_err(AssignHubError::validation)?;
    let description = required_text(&req.description, "Description is required")
        .map_err(AssignHubError::validation)?;

    let assignment = storage
        .create_assignment(
            actor.id,
            CreateAssignmentRequest {
                title,
                description,
                due_date: req.due_date,
            },
        )
        .await?;

    tracing::info!(
        "Teacher {} created assignment {} ({})",
        actor.id,
        assignment.id,
        assignment.title
    );

    with_teacher(storage, assignment).await
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = current_actor(request) else {
        return Ok(unauthorized_response());
    };
    let storage = service.get_storage(request);

    match create(&storage, &actor, req).await {
        Ok(detail) => Ok(HttpResponse::Created().json(ApiResponse::success(
            detail,
            "Assignment created successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assignments::testing::{due_date, fixture};
    use crate::services::testing::{body_json, request_as};
    use actix_web::http::StatusCode;

    fn request(title: &str, description: &str) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date(),
        }
    }

    #[actix_web::test]
    async fn test_create_trims_and_starts_draft() {
        let f = fixture().await;
        let service = AssignmentService::with_storage(f.storage.clone());

        let resp = service
            .create_assignment(&request_as(&f.teacher), request("  Essay ", " Rivers  "))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let json = body_json(resp).await;
        assert_eq!(json["data"]["title"], "Essay");
        assert_eq!(json["data"]["description"], "Rivers");
        assert_eq!(json["data"]["status"], "draft");
        assert_eq!(json["data"]["teacher"]["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn test_create_rejects_blank_fields() {
        let f = fixture().await;
        let service = AssignmentService::with_storage(f.storage.clone());

        let resp = service
            .create_assignment(&request_as(&f.teacher), request("   ", "Rivers"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "Title is required");

        let resp = service
            .create_assignment(&request_as(&f.teacher), request("Essay", ""))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["message"], "Description is required");
    }

    #[actix_web::test]
    async fn test_student_cannot_create() {
        let f = fixture().await;
        let service = AssignmentService::with_storage(f.storage.clone());

        let resp = service
            .create_assignment(&request_as(&f.student), request("Essay", "Rivers"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

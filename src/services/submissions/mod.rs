pub mod create;
pub mod detail;
pub mod for_assignment;
pub mod mine;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, SubmissionListParams},
    responses::SubmissionDetail,
};
use crate::policy::{Resource, require_found};
use crate::storage::Storage;
use crate::utils::Clock;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
    clock: Option<Arc<dyn Clock>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            clock: None,
        }
    }

    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage: Some(storage),
            clock: Some(clock),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_clock(&self, request: &HttpRequest) -> Arc<dyn Clock> {
        if let Some(clock) = &self.clock {
            clock.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Clock>>>()
                .expect("Clock not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    pub async fn get_submissions_for_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        for_assignment::get_submissions_for_assignment(self, request, assignment_id, query).await
    }

    pub async fn list_my_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        mine::list_my_submissions(self, request, query).await
    }

    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        review::review_submission(self, request, submission_id).await
    }
}

pub(crate) async fn load_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<Submission> {
    let submission = storage.get_submission_by_id(submission_id).await?;
    Ok(require_found(submission, Resource::Submission)?)
}

/// 附带学生与作业信息
pub(crate) async fn with_relations(
    storage: &Arc<dyn Storage>,
    submission: Submission,
    assignment: &Assignment,
) -> Result<SubmissionDetail> {
    let student = storage
        .get_user_by_id(submission.student_id)
        .await?
        .map(|u| u.summary());
    Ok(SubmissionDetail {
        submission,
        student,
        assignment: Some(assignment.summary()),
    })
}

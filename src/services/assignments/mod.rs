pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod status;
pub mod submissions;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{
    entities::Assignment,
    requests::{
        AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
        UpdateAssignmentStatusRequest,
    },
    responses::AssignmentDetail,
};
use crate::models::submissions::requests::SubmissionListParams;
use crate::policy::{Resource, require_found};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    pub async fn update_assignment_status(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_assignment_status(self, request, assignment_id, req).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    pub async fn list_assignment_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        submissions::list_assignment_submissions(self, request, assignment_id, query).await
    }
}

/// 加载作业，不存在时返回 NotFound
pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<Assignment> {
    let assignment = storage.get_assignment_by_id(assignment_id).await?;
    Ok(require_found(assignment, Resource::Assignment)?)
}

/// 附带所属教师信息
pub(crate) async fn with_teacher(
    storage: &Arc<dyn Storage>,
    assignment: Assignment,
) -> Result<AssignmentDetail> {
    let teacher = storage
        .get_user_by_id(assignment.teacher_id)
        .await?
        .map(|u| u.summary());
    Ok(AssignmentDetail {
        assignment,
        teacher,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::CreateAssignmentRequest,
    };
    use crate::models::users::entities::{User, UserRole};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};

    pub struct Fixture {
        pub storage: Arc<dyn Storage>,
        pub teacher: User,
        pub other_teacher: User,
        pub student: User,
        pub other_student: User,
    }

    pub fn due_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 30, 23, 59, 0).unwrap()
    }

    pub async fn fixture() -> Fixture {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "Ada", UserRole::Teacher).await;
        let other_teacher = seed_user(&storage, "Alan", UserRole::Teacher).await;
        let student = seed_user(&storage, "Grace", UserRole::Student).await;
        let other_student = seed_user(&storage, "Linus", UserRole::Student).await;
        Fixture {
            storage: Arc::new(storage),
            teacher,
            other_teacher,
            student,
            other_student,
        }
    }

    /// 创建作业并推进到指定状态
    pub async fn assignment_in(
        storage: &Arc<dyn Storage>,
        teacher_id: i64,
        status: AssignmentStatus,
    ) -> Assignment {
        let mut assignment = storage
            .create_assignment(
                teacher_id,
                CreateAssignmentRequest {
                    title: "Essay".to_string(),
                    description: "Write about rivers".to_string(),
                    due_date: due_date(),
                },
            )
            .await
            .unwrap();

        let path: &[AssignmentStatus] = match status {
            AssignmentStatus::Draft => &[],
            AssignmentStatus::Published => &[AssignmentStatus::Published],
            AssignmentStatus::Completed => {
                &[AssignmentStatus::Published, AssignmentStatus::Completed]
            }
        };
        for next in path {
            assignment = storage
                .transition_assignment_status(assignment.id, assignment.status, *next)
                .await
                .unwrap()
                .unwrap();
        }
        assignment
    }
}

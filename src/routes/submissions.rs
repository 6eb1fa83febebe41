use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{CreateSubmissionRequest, SubmissionListParams};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeIDI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交答案
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 我的提交
pub async fn list_my_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_my_submissions(&req, query.into_inner())
        .await
}

// 某作业下的提交
pub async fn get_submissions_for_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submissions_for_assignment(&req, path.0, query.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 批阅提交
pub async fn review_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.review_submission(&req, path.0).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            // 提交答案 - 仅学生
            .service(
                web::resource("")
                    .route(web::post().to(create_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            // 我的提交 - 仅学生
            .service(
                web::resource("/my")
                    .route(web::get().to(list_my_submissions))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            // 学生返回自己的提交，教师返回全部（业务层区分）
            .service(
                web::resource("/assignment/{assignment_id}")
                    .route(web::get().to(get_submissions_for_assignment)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_submission)))
            .service(
                web::resource("/{id}/review")
                    .route(web::patch().to(review_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            ),
    );
}

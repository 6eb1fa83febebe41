pub mod assignments;
pub mod auth;
pub mod submissions;
pub mod system;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use submissions::SubmissionService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::Actor;

/// 从请求扩展中取出当前操作者（由 RequireJWT 写入）
pub(crate) fn current_actor(request: &HttpRequest) -> Option<Actor> {
    RequireJWT::extract_user_claims(request).map(|user| Actor::from(&user))
}

pub(crate) fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

/// 服务测试共用的请求构造
#[cfg(test)]
pub(crate) mod testing {
    use actix_web::{HttpMessage, HttpRequest, HttpResponse, test::TestRequest};
    use serde_json::Value;

    use crate::models::users::entities::User;

    pub fn request_as(user: &User) -> HttpRequest {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(user.clone());
        req
    }

    pub async fn body_json(resp: HttpResponse) -> Value {
        let bytes = actix_web::body::to_bytes(resp.into_body())
            .await
            .expect("response body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}

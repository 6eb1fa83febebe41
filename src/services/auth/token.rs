use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(new_access_token) => {
            let response = RefreshTokenResponse {
                access_token: new_access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie =
                jwt::JwtUtils::create_refresh_token_cookie("", chrono::Duration::zero());

            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::testing::{body_json, request_as};
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_refresh_with_cookie() {
        let service = AuthService::new_lazy();
        let refresh = jwt::JwtUtils::generate_refresh_token(3, UserRole::Student, None).unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(jwt::REFRESH_TOKEN_COOKIE, refresh))
            .to_http_request();

        let resp = service.refresh_token(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let claims =
            jwt::JwtUtils::verify_access_token(json["data"]["access_token"].as_str().unwrap())
                .unwrap();
        assert_eq!(claims.user_id(), Some(3));
        assert_eq!(claims.role, UserRole::Student);
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token() {
        let service = AuthService::new_lazy();
        let access = jwt::JwtUtils::generate_access_token(3, UserRole::Student).unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(jwt::REFRESH_TOKEN_COOKIE, access))
            .to_http_request();

        let resp = service.refresh_token(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = service
            .refresh_token(&TestRequest::default().to_http_request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_returns_current_user() {
        let storage = memory_storage().await;
        let user = seed_user(&storage, "Grace", UserRole::Student).await;
        let service = AuthService::new_lazy();

        let resp = service.get_user(&request_as(&user)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["user"]["email"], "grace@example.com");
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::{AuthService, normalize_email};

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据邮箱获取用户信息
    let user = match storage
        .get_user_by_email(&normalize_email(&login_request.email))
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(login_failed()),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(login_failed());
    }

    // 3. 生成令牌对
    let refresh_expiry = chrono::Duration::days(if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    });

    match user.generate_token_pair(Some(refresh_expiry)) {
        Ok(token_pair) => {
            tracing::info!("User {} logged in successfully", user.id);

            // 4. refresh token 写入 HttpOnly cookie
            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_expiry);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                user,
            };

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::services::testing::body_json;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::memory_storage;
    use crate::utils::password::hash_password;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    async fn service_with_user() -> AuthService {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        storage
            .create_user(CreateUserRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: hash_password("Analytical1").unwrap(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap();
        AuthService::with_storage(storage)
    }

    fn credentials(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_login_issues_tokens() {
        let service = service_with_user().await;
        let req = TestRequest::default().to_http_request();

        let resp = service
            .login(credentials("ADA@example.com", "Analytical1"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .cookies()
            .find(|c| c.name() == jwt::REFRESH_TOKEN_COOKIE)
            .expect("refresh cookie");
        assert!(cookie.http_only().unwrap_or(false));

        let json = body_json(resp).await;
        let token = json["data"]["access_token"].as_str().unwrap();
        let claims = jwt::JwtUtils::verify_access_token(token).unwrap();
        assert_eq!(claims.role, UserRole::Teacher);
        assert_eq!(json["data"]["user"]["name"], "Ada");
    }

    #[actix_web::test]
    async fn test_login_rejects_bad_credentials() {
        let service = service_with_user().await;
        let req = TestRequest::default().to_http_request();

        let resp = service
            .login(credentials("ada@example.com", "wrong"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = service
            .login(credentials("nobody@example.com", "Analytical1"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["code"], ErrorCode::AuthFailed as i32);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::AssignHubError;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password};

use super::{AuthService, normalize_email};

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    create_request.name = create_request.name.trim().to_string();
    create_request.email = normalize_email(&create_request.email);

    // 1. 验证姓名
    if let Err(msg) = validate_name(&create_request.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    // 2. 验证邮箱
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 3. 验证密码强度
    let password_check = validate_password(&create_request.password);
    if !password_check.is_valid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            password_check.error_message(),
        )));
    }

    // 4. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 5. 哈希密码，替换明文
    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed, unable to hash password",
                )),
            );
        }
    };

    // 6. 创建用户
    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered as {}", user.id, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        // 并发注册同一邮箱
        Err(AssignHubError::Duplicate(_)) => Ok(email_taken()),
        Err(e) => {
            tracing::error!("Register failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

fn email_taken() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::UserEmailAlreadyExists,
        "Email already exists",
    ))
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(email_taken()),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::error!("Register failed: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::testing::body_json;
    use crate::storage::sea_orm_storage::testing::memory_storage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn registration(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: " Grace Hopper ".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::Student,
        }
    }

    #[actix_web::test]
    async fn test_register_hashes_password() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = AuthService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .register(registration(" Grace@Example.com", "Compiler42"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["name"], "Grace Hopper");
        assert_eq!(json["data"]["email"], "grace@example.com");
        assert!(json["data"].get("password_hash").is_none());

        let stored = storage
            .get_user_by_email("grace@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "Compiler42");
        assert!(crate::utils::password::verify_password(
            "Compiler42",
            &stored.password_hash
        ));
    }

    #[actix_web::test]
    async fn test_register_rejects_existing_email() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = AuthService::with_storage(storage);
        let req = TestRequest::default().to_http_request();

        let resp = service
            .register(registration("grace@example.com", "Compiler42"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = service
            .register(registration("GRACE@example.com", "Compiler42"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(resp).await["code"], ErrorCode::UserEmailAlreadyExists as i32);
    }

    #[actix_web::test]
    async fn test_register_validates_input() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = AuthService::with_storage(storage);
        let req = TestRequest::default().to_http_request();

        let resp = service
            .register(registration("not-an-email", "Compiler42"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], ErrorCode::UserEmailInvalid as i32);

        let resp = service
            .register(registration("grace@example.com", "short"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], ErrorCode::UserPasswordInvalid as i32);
    }
}

//! 请求参数解析失败时的统一响应

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(kind: &str, detail: String) -> actix_web::Error {
    debug!("{kind} 参数解析失败: {detail}");
    let message = format!("Invalid {kind}: {detail}");
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("request body", err.to_string())
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("query parameters", err.to_string())
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request("path parameters", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test::TestRequest};

    #[test]
    fn test_json_errors_become_bad_request() {
        let req = TestRequest::default().to_http_request();
        let err = json_error_handler(JsonPayloadError::ContentType, &req);
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}

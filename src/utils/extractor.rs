//! 安全的路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 与统一响应结构。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{name}': {raw}");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id_extractors {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractors! {
    SafeIDI64 => "id",
    SafeAssignmentIdI64 => "assignment_id",
}

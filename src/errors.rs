//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及 HTTP 映射。

use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AssignHubError {
            $($variant(String),)*
        }

        impl AssignHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(AssignHubError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E004", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E005", "Date Parse Error", BAD_REQUEST),
    Validation("E006", "Validation Error", BAD_REQUEST),
    NotFound("E007", "Resource Not Found", NOT_FOUND),
    Authentication("E008", "Authentication Error", UNAUTHORIZED),
    Forbidden("E009", "Forbidden", FORBIDDEN),
    InvalidTransition("E010", "Invalid Status Transition", BAD_REQUEST),
    WrongStatus("E011", "Wrong Assignment Status", BAD_REQUEST),
    Overdue("E012", "Submission Overdue", BAD_REQUEST),
    Duplicate("E013", "Duplicate Resource", CONFLICT),
}

impl AssignHubError {
    /// 对应的 API 错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            AssignHubError::DatabaseConfig(_)
            | AssignHubError::DatabaseConnection(_)
            | AssignHubError::DatabaseOperation(_)
            | AssignHubError::Serialization(_) => ErrorCode::InternalServerError,
            AssignHubError::DateParse(_) | AssignHubError::Validation(_) => ErrorCode::BadRequest,
            AssignHubError::NotFound(_) => ErrorCode::NotFound,
            AssignHubError::Authentication(_) => ErrorCode::Unauthorized,
            AssignHubError::Forbidden(_) => ErrorCode::Forbidden,
            AssignHubError::InvalidTransition(_) => ErrorCode::AssignmentInvalidTransition,
            AssignHubError::WrongStatus(_) => ErrorCode::AssignmentNotPublished,
            AssignHubError::Overdue(_) => ErrorCode::SubmissionOverdue,
            AssignHubError::Duplicate(_) => ErrorCode::SubmissionDuplicate,
        }
    }

    /// 是否属于服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// 转换为统一格式的 HTTP 响应
    pub fn to_response(&self) -> HttpResponse {
        if self.is_internal() {
            tracing::error!("{}", self.format_simple());
        } else {
            tracing::info!("请求被拒绝: {}", self.format_simple());
        }
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.api_code(), self.message()))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AssignHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssignHubError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignHubError {
    fn from(err: serde_json::Error) -> Self {
        AssignHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AssignHubError {
    fn from(err: chrono::ParseError) -> Self {
        AssignHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignHubError>;

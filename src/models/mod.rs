//! 数据模型定义
//!
//! 与 entity 模块中的数据库实体分离，面向 API 与业务逻辑。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailAlreadyExists = 2003,
    UserNameInvalid = 2004,
    UserEmailInvalid = 2005,
    UserPasswordInvalid = 2006,

    // 作业
    AssignmentInvalidTransition = 3001,
    AssignmentNotPublished = 3002,

    // 提交
    SubmissionDuplicate = 4001,
    SubmissionOverdue = 4002,
}

//! 作业生命周期与提交资格策略
//!
//! 这里只包含纯函数：输入实体状态与操作者身份，输出允许或一个带类型的拒绝原因。
//! 存储、HTTP 与时钟都不在此处出现，当前时间由调用方传入。

pub mod assignment;
pub mod submission;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::errors::AssignHubError;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::users::entities::{User, UserRole};

/// 发起操作的用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn teacher(id: i64) -> Self {
        Self {
            id,
            role: UserRole::Teacher,
        }
    }

    pub fn student(id: i64) -> Self {
        Self {
            id,
            role: UserRole::Student,
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

/// 被拒绝操作涉及的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Assignment,
    Submission,
}

/// 策略拒绝原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotFound(Resource),
    /// 不是资源所有者，或资源对其不可见
    NotOwner,
    /// 角色不允许执行该操作
    WrongRole { required: UserRole },
    /// 非草稿状态不可编辑
    NotEditable(AssignmentStatus),
    /// 非草稿状态不可删除
    NotDeletable(AssignmentStatus),
    InvalidTransition {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
    /// 作业未处于发布状态，不接受提交
    WrongStatus(AssignmentStatus),
    Overdue { due_date: DateTime<Utc> },
    Duplicate,
    Validation(&'static str),
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::NotFound(Resource::Assignment) => "Assignment not found".to_string(),
            Rejection::NotFound(Resource::Submission) => "Submission not found".to_string(),
            Rejection::NotOwner => "Access denied".to_string(),
            Rejection::WrongRole { required } => {
                format!("Access denied. Only a {required} can perform this action")
            }
            Rejection::NotEditable(AssignmentStatus::Completed) => {
                "Cannot edit completed assignments".to_string()
            }
            Rejection::NotEditable(status) => {
                format!("Cannot edit {status} assignments. Only status can be changed.")
            }
            Rejection::NotDeletable(_) => "Can only delete draft assignments".to_string(),
            Rejection::InvalidTransition {
                from: AssignmentStatus::Completed,
                ..
            } => "Cannot change status of completed assignment".to_string(),
            Rejection::InvalidTransition { from, to } => {
                format!("Cannot change assignment status from {from} to {to}")
            }
            Rejection::WrongStatus(_) => {
                "Can only submit answers to published assignments".to_string()
            }
            Rejection::Overdue { .. } => "Submission deadline has passed".to_string(),
            Rejection::Duplicate => {
                "You have already submitted an answer for this assignment".to_string()
            }
            Rejection::Validation(msg) => msg.to_string(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Rejection {}

impl From<Rejection> for AssignHubError {
    fn from(rejection: Rejection) -> Self {
        let message = rejection.message();
        match rejection {
            Rejection::NotFound(_) => AssignHubError::not_found(message),
            Rejection::NotOwner | Rejection::WrongRole { .. } => {
                AssignHubError::forbidden(message)
            }
            Rejection::NotEditable(_)
            | Rejection::NotDeletable(_)
            | Rejection::InvalidTransition { .. } => AssignHubError::invalid_transition(message),
            Rejection::WrongStatus(_) => AssignHubError::wrong_status(message),
            Rejection::Overdue { .. } => AssignHubError::overdue(message),
            Rejection::Duplicate => AssignHubError::duplicate(message),
            Rejection::Validation(_) => AssignHubError::validation(message),
        }
    }
}

/// 找不到实体时的统一拒绝
pub fn require_found<T>(value: Option<T>, resource: Resource) -> Result<T, Rejection> {
    value.ok_or(Rejection::NotFound(resource))
}

use crate::models::assignments::entities::AssignmentStatus;
use crate::models::common::pagination::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
}

/// 更新作业请求（仅草稿可用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateAssignmentRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

/// 更新作业状态请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentStatusRequest {
    pub status: AssignmentStatus,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 状态过滤（仅教师视角生效）
    pub status: Option<AssignmentStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<AssignmentStatus>,
}

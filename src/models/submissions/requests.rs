use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    #[serde(default)]
    pub answer: String,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
}

use crate::models::assignments::entities::Assignment;
use crate::models::common::pagination::PaginationInfo;
use crate::models::users::entities::UserSummary;
use serde::Serialize;
use ts_rs::TS;

/// 作业详情（附带所属教师信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub teacher: Option<UserSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentDetail>,
    pub pagination: PaginationInfo,
}

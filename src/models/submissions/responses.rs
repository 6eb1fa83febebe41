use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::assignments::entities::AssignmentSummary;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::UserSummary;

/// 提交详情（附带学生与作业信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: Option<UserSummary>,
    pub assignment: Option<AssignmentSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionDetail>,
    pub pagination: PaginationInfo,
}

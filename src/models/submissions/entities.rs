use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交实体：每个学生对每个作业只有一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub answer: String,
    // 教师是否已批阅
    pub reviewed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

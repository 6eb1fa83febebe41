use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业生命周期状态
///
/// 只能按 Draft -> Published -> Completed 单向推进，Completed 为终态。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum AssignmentStatus {
    Draft,     // 草稿
    Published, // 已发布
    Completed, // 已结束
}

impl AssignmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const COMPLETED: &'static str = "completed";

    pub fn all() -> [AssignmentStatus; 3] {
        [Self::Draft, Self::Published, Self::Completed]
    }
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, published, completed"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "{}", AssignmentStatus::DRAFT),
            AssignmentStatus::Published => write!(f, "{}", AssignmentStatus::PUBLISHED),
            AssignmentStatus::Completed => write!(f, "{}", AssignmentStatus::COMPLETED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    // 兼容首字母大写的旧格式（Draft / Published / Completed）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            AssignmentStatus::DRAFT => Ok(AssignmentStatus::Draft),
            AssignmentStatus::PUBLISHED => Ok(AssignmentStatus::Published),
            AssignmentStatus::COMPLETED => Ok(AssignmentStatus::Completed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 生命周期状态
    pub status: AssignmentStatus,
    // 所属教师 ID
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn summary(&self) -> AssignmentSummary {
        AssignmentSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            status: self.status,
        }
    }
}

// 提交列表中附带的作业信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub status: AssignmentStatus,
}

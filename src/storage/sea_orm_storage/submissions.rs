//! 提交存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::entities::AssignmentSummary,
    submissions::{
        entities::Submission,
        requests::SubmissionListQuery,
        responses::{SubmissionDetail, SubmissionListResponse},
    },
    users::entities::UserSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr, sea_query::Expr,
};

pub(crate) const DUPLICATE_SUBMISSION: &str =
    "You have already submitted an answer for this assignment";

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 唯一索引 `(assignment_id, student_id)` 是并发提交的最终裁决点，
    /// 违反约束时返回与预检查相同的 Duplicate 错误。
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        answer: String,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            answer: Set(answer),
            reviewed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AssignHubError::duplicate(DUPLICATE_SUBMISSION)
            }
            _ => AssignHubError::database_operation(format!("创建提交失败: {e}")),
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生对某作业的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let submissions: Vec<Submission> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_submission())
            .collect();

        // 批量查询学生信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let students: HashMap<i64, UserSummary> = self
            .get_users_by_ids_impl(student_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        // 批量查询作业信息
        let assignment_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.assignment_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let assignments: HashMap<i64, AssignmentSummary> = if assignment_ids.is_empty() {
            HashMap::new()
        } else {
            Assignments::find()
                .filter(AssignmentColumn::Id.is_in(assignment_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    AssignHubError::database_operation(format!("批量查询作业失败: {e}"))
                })?
                .into_iter()
                .map(|m| {
                    let assignment = m.into_assignment();
                    (assignment.id, assignment.summary())
                })
                .collect()
        };

        let items = submissions
            .into_iter()
            .map(|submission| SubmissionDetail {
                student: students.get(&submission.student_id).cloned(),
                assignment: assignments.get(&submission.assignment_id).cloned(),
                submission,
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 标记为已批阅（重复批阅不报错）
    pub async fn mark_submission_reviewed_impl(&self, id: i64) -> Result<Option<Submission>> {
        let now = chrono::Utc::now().timestamp();

        Submissions::update_many()
            .col_expr(Column::Reviewed, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("批阅提交失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }
}

//! 作业存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::{AssignmentDetail, AssignmentListResponse},
    },
    users::entities::UserSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            status: Set(AssignmentStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Assignments::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序：最新创建的在前
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业总数失败: {e}")))?;

        let assignments: Vec<Assignment> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect();

        // 收集所有 teacher_id 并去重，批量查询教师信息
        let teacher_ids: Vec<i64> = assignments
            .iter()
            .map(|a| a.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let teachers: HashMap<i64, UserSummary> = self
            .get_users_by_ids_impl(teacher_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        let items = assignments
            .into_iter()
            .map(|assignment| AssignmentDetail {
                teacher: teachers.get(&assignment.teacher_id).cloned(),
                assignment,
            })
            .collect();

        Ok(AssignmentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新草稿作业
    ///
    /// 以 `status = draft` 作为更新条件，状态已被并发修改时不会写入。
    pub async fn update_draft_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let mut stmt = Assignments::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(AssignmentStatus::Draft.to_string()));

        if let Some(title) = update.title {
            stmt = stmt.col_expr(Column::Title, Expr::value(title));
        }

        if let Some(description) = update.description {
            stmt = stmt.col_expr(Column::Description, Expr::value(description));
        }

        if let Some(due_date) = update.due_date {
            stmt = stmt.col_expr(Column::DueDate, Expr::value(due_date.timestamp()));
        }

        let result = stmt
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("更新作业失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(id).await
    }

    /// 条件状态切换
    pub async fn transition_assignment_status_impl(
        &self,
        id: i64,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::Status, Expr::value(to.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("更新作业状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除草稿作业
    pub async fn delete_draft_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(AssignmentStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{memory_storage, seed_user};
    use crate::models::assignments::{
        entities::AssignmentStatus,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    };
    use crate::models::users::entities::UserRole;
    use chrono::{TimeZone, Utc};

    fn create_request(title: &str) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.to_string(),
            description: "Chapter 3 exercises".to_string(),
            due_date: Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_in_draft() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "Ada", UserRole::Teacher).await;

        let created = storage
            .create_assignment_impl(teacher.id, create_request("Algebra"))
            .await
            .unwrap();
        assert_eq!(created.status, AssignmentStatus::Draft);
        assert_eq!(created.teacher_id, teacher.id);
        assert_eq!(
            created.due_date,
            Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
        );

        let fetched = storage
            .get_assignment_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_only_applies_to_drafts() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "Ada", UserRole::Teacher).await;
        let a = storage
            .create_assignment_impl(teacher.id, create_request("Algebra"))
            .await
            .unwrap();

        let updated = storage
            .update_draft_assignment_impl(
                a.id,
                UpdateAssignmentRequest {
                    title: Some("Geometry".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Geometry");
        assert_eq!(updated.description, a.description);

        storage
            .transition_assignment_status_impl(a.id, AssignmentStatus::Draft, AssignmentStatus::Published)
            .await
            .unwrap()
            .unwrap();

        let rejected = storage
            .update_draft_assignment_impl(
                a.id,
                UpdateAssignmentRequest {
                    title: Some("Sneaky".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(rejected.is_none());

        let current = storage.get_assignment_by_id_impl(a.id).await.unwrap().unwrap();
        assert_eq!(current.title, "Geometry");
    }

    #[tokio::test]
    async fn test_transition_is_conditional_on_current_status() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "Ada", UserRole::Teacher).await;
        let a = storage
            .create_assignment_impl(teacher.id, create_request("Algebra"))
            .await
            .unwrap();

        // 当前为草稿，按 Published -> Completed 条件切换不生效
        let stale = storage
            .transition_assignment_status_impl(
                a.id,
                AssignmentStatus::Published,
                AssignmentStatus::Completed,
            )
            .await
            .unwrap();
        assert!(stale.is_none());

        let published = storage
            .transition_assignment_status_impl(a.id, AssignmentStatus::Draft, AssignmentStatus::Published)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(published.status, AssignmentStatus::Published);
    }

    #[tokio::test]
    async fn test_delete_only_drafts() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "Ada", UserRole::Teacher).await;
        let draft = storage
            .create_assignment_impl(teacher.id, create_request("Draft"))
            .await
            .unwrap();
        let published = storage
            .create_assignment_impl(teacher.id, create_request("Published"))
            .await
            .unwrap();
        storage
            .transition_assignment_status_impl(
                published.id,
                AssignmentStatus::Draft,
                AssignmentStatus::Published,
            )
            .await
            .unwrap();

        assert!(storage.delete_draft_assignment_impl(draft.id).await.unwrap());
        assert!(!storage.delete_draft_assignment_impl(published.id).await.unwrap());
        assert!(storage.get_assignment_by_id_impl(draft.id).await.unwrap().is_none());
        assert!(storage.get_assignment_by_id_impl(published.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_filters_and_attaches_teacher() {
        let storage = memory_storage().await;
        let ada = seed_user(&storage, "Ada", UserRole::Teacher).await;
        let alan = seed_user(&storage, "Alan", UserRole::Teacher).await;

        let first = storage
            .create_assignment_impl(ada.id, create_request("First"))
            .await
            .unwrap();
        let second = storage
            .create_assignment_impl(ada.id, create_request("Second"))
            .await
            .unwrap();
        storage
            .create_assignment_impl(alan.id, create_request("Other"))
            .await
            .unwrap();
        storage
            .transition_assignment_status_impl(
                first.id,
                AssignmentStatus::Draft,
                AssignmentStatus::Published,
            )
            .await
            .unwrap();

        let own = storage
            .list_assignments_with_pagination_impl(AssignmentListQuery {
                teacher_id: Some(ada.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(own.pagination.total, 2);
        // 同一秒内创建时按 ID 倒序
        let ids: Vec<i64> = own.items.iter().map(|d| d.assignment.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        let teacher = own.items[0].teacher.as_ref().unwrap();
        assert_eq!(teacher.name, "Ada");
        assert_eq!(teacher.email, "ada@example.com");

        let published = storage
            .list_assignments_with_pagination_impl(AssignmentListQuery {
                status: Some(AssignmentStatus::Published),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(published.items.len(), 1);
        assert_eq!(published.items[0].assignment.id, first.id);

        let paged = storage
            .list_assignments_with_pagination_impl(AssignmentListQuery {
                page: Some(2),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.pagination.total_pages, 2);
    }
}

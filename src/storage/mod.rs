use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 作业管理方法
    // 创建作业，初始状态为草稿
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 分页列出作业，附带教师信息
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新草稿作业内容；作业不存在或已不是草稿时返回 None
    async fn update_draft_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 仅当当前状态为 from 时切换到 to；条件不满足返回 None
    async fn transition_assignment_status(
        &self,
        id: i64,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<Option<Assignment>>;
    // 删除草稿作业，返回是否删除
    async fn delete_draft_assignment(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交；违反 (assignment, student) 唯一约束时返回 Duplicate
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        answer: String,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 分页列出提交，附带学生与作业信息
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 标记为已批阅
    async fn mark_submission_reviewed(&self, id: i64) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

//! 作业生命周期规则

use super::{Actor, Rejection};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::users::entities::UserRole;

/// 状态变更结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 目标状态与当前状态相同，无需写入
    Unchanged,
    Advanced {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
}

/// 只有草稿可以修改内容
pub fn can_edit(assignment: &Assignment) -> bool {
    assignment.status == AssignmentStatus::Draft
}

/// 只有草稿可以删除
pub fn can_delete(assignment: &Assignment) -> bool {
    assignment.status == AssignmentStatus::Draft
}

/// 状态机：Draft -> Published -> Completed，同状态请求视为无操作
pub fn can_transition(current: AssignmentStatus, requested: AssignmentStatus) -> bool {
    use AssignmentStatus::*;

    match (current, requested) {
        (Draft, Draft) | (Published, Published) | (Completed, Completed) => true,
        (Draft, Published) | (Published, Completed) => true,
        (Draft, Completed) | (Published, Draft) | (Completed, Draft) | (Completed, Published) => {
            false
        }
    }
}

/// 学生只能看到已发布作业，教师只能看到自己的作业
pub fn is_visible(assignment: &Assignment, actor: &Actor) -> bool {
    match actor.role {
        UserRole::Student => assignment.status == AssignmentStatus::Published,
        UserRole::Teacher => assignment.teacher_id == actor.id,
    }
}

pub fn ensure_teacher(actor: &Actor) -> Result<(), Rejection> {
    match actor.role {
        UserRole::Teacher => Ok(()),
        UserRole::Student => Err(Rejection::WrongRole {
            required: UserRole::Teacher,
        }),
    }
}

/// 操作者必须是该作业的所属教师
pub fn ensure_owner(assignment: &Assignment, actor: &Actor) -> Result<(), Rejection> {
    ensure_teacher(actor)?;
    if assignment.teacher_id == actor.id {
        Ok(())
    } else {
        Err(Rejection::NotOwner)
    }
}

pub fn ensure_visible(assignment: &Assignment, actor: &Actor) -> Result<(), Rejection> {
    if is_visible(assignment, actor) {
        Ok(())
    } else {
        Err(Rejection::NotOwner)
    }
}

pub fn check_edit(assignment: &Assignment, actor: &Actor) -> Result<(), Rejection> {
    ensure_owner(assignment, actor)?;
    if can_edit(assignment) {
        Ok(())
    } else {
        Err(Rejection::NotEditable(assignment.status))
    }
}

pub fn check_delete(assignment: &Assignment, actor: &Actor) -> Result<(), Rejection> {
    ensure_owner(assignment, actor)?;
    if can_delete(assignment) {
        Ok(())
    } else {
        Err(Rejection::NotDeletable(assignment.status))
    }
}

pub fn check_transition(
    assignment: &Assignment,
    actor: &Actor,
    requested: AssignmentStatus,
) -> Result<Transition, Rejection> {
    ensure_owner(assignment, actor)?;
    let current = assignment.status;
    if !can_transition(current, requested) {
        return Err(Rejection::InvalidTransition {
            from: current,
            to: requested,
        });
    }
    if current == requested {
        Ok(Transition::Unchanged)
    } else {
        Ok(Transition::Advanced {
            from: current,
            to: requested,
        })
    }
}

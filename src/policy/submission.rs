//! 提交资格规则

use chrono::{DateTime, Utc};

use super::{Actor, Rejection, assignment::ensure_owner};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::UserRole;

/// 作业已发布且未过截止时间时才接受提交
pub fn can_submit(assignment: &Assignment, now: DateTime<Utc>) -> bool {
    assignment.status == AssignmentStatus::Published && now < assignment.due_date
}

/// 按顺序检查：角色 -> 状态 -> 截止时间
///
/// 重复提交需要查询存储，由 [`ensure_first_submission`] 单独判断。
pub fn check_submit(
    assignment: &Assignment,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<(), Rejection> {
    match actor.role {
        UserRole::Student => {}
        UserRole::Teacher => {
            return Err(Rejection::WrongRole {
                required: UserRole::Student,
            });
        }
    }

    match assignment.status {
        AssignmentStatus::Published => {}
        other => return Err(Rejection::WrongStatus(other)),
    }

    if now >= assignment.due_date {
        return Err(Rejection::Overdue {
            due_date: assignment.due_date,
        });
    }

    Ok(())
}

pub fn ensure_first_submission(existing: Option<&Submission>) -> Result<(), Rejection> {
    match existing {
        Some(_) => Err(Rejection::Duplicate),
        None => Ok(()),
    }
}

/// 学生只能查看自己的提交，教师只能查看自己作业下的提交
pub fn check_view(
    submission: &Submission,
    parent: &Assignment,
    actor: &Actor,
) -> Result<(), Rejection> {
    let allowed = match actor.role {
        UserRole::Student => submission.student_id == actor.id,
        UserRole::Teacher => parent.teacher_id == actor.id,
    };
    if allowed {
        Ok(())
    } else {
        Err(Rejection::NotOwner)
    }
}

/// 批阅与列出提交都要求是作业所属教师
pub fn check_review(parent: &Assignment, actor: &Actor) -> Result<(), Rejection> {
    ensure_owner(parent, actor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 0).unwrap()
    }

    fn assignment(status: AssignmentStatus) -> Assignment {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        Assignment {
            id: 7,
            title: "Lab report".to_string(),
            description: "Describe the experiment".to_string(),
            due_date: due(),
            status,
            teacher_id: 1,
            created_at: created,
            updated_at: created,
        }
    }

    fn submission(student_id: i64) -> Submission {
        let created = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        Submission {
            id: 3,
            assignment_id: 7,
            student_id,
            answer: "42".to_string(),
            reviewed: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_can_submit_requires_published_and_before_due() {
        let before = due() - TimeDelta::minutes(1);
        for status in AssignmentStatus::all() {
            let a = assignment(status);
            assert_eq!(
                can_submit(&a, before),
                status == AssignmentStatus::Published
            );
            assert!(!can_submit(&a, due()));
            assert!(!can_submit(&a, due() + TimeDelta::days(1)));
        }
    }

    #[test]
    fn test_due_date_boundary_is_exclusive() {
        let a = assignment(AssignmentStatus::Published);
        let student = Actor::student(5);
        assert_eq!(
            check_submit(&a, &student, due() - TimeDelta::seconds(1)),
            Ok(())
        );
        assert_eq!(
            check_submit(&a, &student, due()),
            Err(Rejection::Overdue { due_date: due() })
        );
    }

    #[test]
    fn test_status_checked_before_deadline() {
        let after = due() + TimeDelta::days(2);
        let student = Actor::student(5);
        assert_eq!(
            check_submit(&assignment(AssignmentStatus::Completed), &student, after),
            Err(Rejection::WrongStatus(AssignmentStatus::Completed))
        );
        assert_eq!(
            check_submit(&assignment(AssignmentStatus::Draft), &student, after),
            Err(Rejection::WrongStatus(AssignmentStatus::Draft))
        );
    }

    #[test]
    fn test_teacher_cannot_submit() {
        let before = due() - TimeDelta::hours(1);
        assert_eq!(
            check_submit(
                &assignment(AssignmentStatus::Published),
                &Actor::teacher(1),
                before
            ),
            Err(Rejection::WrongRole {
                required: UserRole::Student
            })
        );
    }

    #[test]
    fn test_duplicate_detection() {
        assert_eq!(ensure_first_submission(None), Ok(()));
        assert_eq!(
            ensure_first_submission(Some(&submission(5))),
            Err(Rejection::Duplicate)
        );
    }

    #[test]
    fn test_view_permissions() {
        let a = assignment(AssignmentStatus::Published);
        let s = submission(5);
        assert_eq!(check_view(&s, &a, &Actor::student(5)), Ok(()));
        assert_eq!(
            check_view(&s, &a, &Actor::student(6)),
            Err(Rejection::NotOwner)
        );
        assert_eq!(check_view(&s, &a, &Actor::teacher(1)), Ok(()));
        assert_eq!(
            check_view(&s, &a, &Actor::teacher(2)),
            Err(Rejection::NotOwner)
        );
    }

    #[test]
    fn test_review_requires_owner_teacher() {
        let a = assignment(AssignmentStatus::Completed);
        assert_eq!(check_review(&a, &Actor::teacher(1)), Ok(()));
        assert_eq!(check_review(&a, &Actor::teacher(2)), Err(Rejection::NotOwner));
        assert!(check_review(&a, &Actor::student(1)).is_err());
    }

    // 教师发布、学生提交、结束后再提交被拒
    #[test]
    fn test_lifecycle_scenario() {
        use crate::policy::assignment::{Transition, check_transition};

        let teacher = Actor::teacher(1);
        let mut a = assignment(AssignmentStatus::Draft);
        let now = due() - TimeDelta::days(3);

        assert!(!can_submit(&a, now));

        let outcome = check_transition(&a, &teacher, AssignmentStatus::Published).unwrap();
        assert!(matches!(outcome, Transition::Advanced { .. }));
        a.status = AssignmentStatus::Published;

        assert_eq!(check_submit(&a, &Actor::student(10), now), Ok(()));
        let first = submission(10);
        assert_eq!(
            ensure_first_submission(Some(&first)),
            Err(Rejection::Duplicate)
        );

        check_transition(&a, &teacher, AssignmentStatus::Completed).unwrap();
        a.status = AssignmentStatus::Completed;

        assert_eq!(
            check_submit(&a, &Actor::student(11), now),
            Err(Rejection::WrongStatus(AssignmentStatus::Completed))
        );
        assert!(
            check_transition(&a, &teacher, AssignmentStatus::Published).is_err()
        );
    }
}

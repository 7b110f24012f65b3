//! Tests for the student service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::Sequence;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockRandomSource, MockStudentRepository};

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

fn suffixes(values: Vec<u32>) -> MockRandomSource {
    let mut random = MockRandomSource::new();
    let mut draws = values.into_iter();
    random
        .expect_student_suffix()
        .returning(move || draws.next().expect("test supplied enough suffixes"));
    random
}

fn make_service(repo: MockStudentRepository, random: MockRandomSource) -> StudentService<MockStudentRepository> {
    StudentService::new(Arc::new(repo), Arc::new(random), Arc::new(FixtureClock))
}

#[fixture]
fn draft() -> StudentDraft {
    StudentDraft::try_new("Ada", 12, "7").expect("valid draft")
}

#[rstest]
#[tokio::test]
async fn create_uses_year_and_first_free_suffix(draft: StudentDraft) {
    let mut repo = MockStudentRepository::new();
    let mut seq = Sequence::new();
    repo.expect_exists()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|id| id.to_string() == "202611111")
        .return_once(|_| Ok(true));
    repo.expect_exists()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|id| id.to_string() == "202622222")
        .return_once(|_| Ok(false));
    repo.expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|student| student.id.to_string() == "202622222")
        .return_once(|_| Ok(()));

    let service = make_service(repo, suffixes(vec![11_111, 22_222]));
    let student = service.create(draft).await.expect("student created");

    assert_eq!(student.id.as_ref(), "202622222");
    assert_eq!(student.name, "Ada");
    assert_eq!(student.age, 12);
    assert_eq!(student.grade, "7");
}

#[rstest]
#[tokio::test]
async fn create_gives_up_after_attempt_cap(draft: StudentDraft) {
    let mut repo = MockStudentRepository::new();
    repo.expect_exists().times(3).returning(|_| Ok(true));
    repo.expect_insert().never();

    let service = make_service(repo, suffixes(vec![10_000, 10_001, 10_002]))
        .with_max_id_attempts(3);
    let err = service.create(draft).await.expect_err("attempts exhausted");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_redraws_when_insert_reports_duplicate(draft: StudentDraft) {
    let mut repo = MockStudentRepository::new();
    repo.expect_exists().times(2).returning(|_| Ok(false));
    let mut seq = Sequence::new();
    repo.expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|student| Err(StudentPersistenceError::duplicate(student.id.to_string())));
    repo.expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let service = make_service(repo, suffixes(vec![12_345, 54_321]));
    let student = service.create(draft).await.expect("second draw succeeds");

    assert_eq!(student.id.as_ref(), "202654321");
}

#[rstest]
#[case(StudentPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(StudentPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_repository_failures(
    #[case] failure: StudentPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockStudentRepository::new();
    repo.expect_list().return_once(move || Err(failure));

    let service = make_service(repo, MockRandomSource::new());
    let err = service.list().await.expect_err("repository failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_student() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(repo, MockRandomSource::new());
    let id = StudentId::new("202600001").expect("valid id");
    let err = service.get(&id).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Student 202600001 not found");
}

#[rstest]
#[tokio::test]
async fn update_returns_merged_student(draft: StudentDraft) {
    let id = StudentId::compose(2026, 12_345);
    let mut stored = Student::from_draft(id.clone(), draft);
    let mut repo = MockStudentRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(move |_, patch| {
            stored.apply(patch);
            Ok(Some(stored))
        });

    let service = make_service(repo, MockRandomSource::new());
    let patch = StudentPatch::try_new(None, None, Some("8".to_owned())).expect("valid patch");
    let updated = service.update(&id, patch).await.expect("updated");

    assert_eq!(updated.grade, "8");
    assert_eq!(updated.name, "Ada");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_whether_a_student_was_removed(
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockStudentRepository::new();
    repo.expect_delete().return_once(move |_| Ok(removed));

    let service = make_service(repo, MockRandomSource::new());
    let id = StudentId::new("202612345").expect("valid id");
    let result = service.delete(&id).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

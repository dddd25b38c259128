//! Persistence for the two components of the service.
//!
//! Both stores wrap the same [`sqlx::SqlitePool`], built once at startup and
//! handed to the handlers as `web::Data`. The ledger only knows students by
//! roll number.

pub mod attendance;
pub mod students;

pub use attendance::AttendanceLedger;
pub use students::StudentDirectory;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::TempDb, error::ApiError};
    use futures_util::future::join_all;

    #[actix_web::test]
    async fn concurrent_writes_on_a_file_database_all_succeed() {
        let db = TempDb::new("concurrent_writes").await;
        let directory = StudentDirectory::new(db.pool.clone());
        let ledger = AttendanceLedger::new(db.pool.clone());

        let registered = join_all((0..50).map(|i| {
            let directory = directory.clone();
            async move {
                let roll_no = format!("R{i}");
                directory.register(&roll_no, "Student").await
            }
        }))
        .await;
        let failed: Vec<_> = registered.iter().filter_map(|r| r.as_ref().err()).collect();
        assert!(failed.is_empty(), "registrations failed: {failed:?}");

        let recorded = join_all((0..50).map(|i| {
            let ledger = ledger.clone();
            async move {
                let roll_no = format!("R{}", i % 5);
                let date = format!("2024-01-{:02}", i / 5 + 1);
                ledger.record(&roll_no, "present", &date).await
            }
        }))
        .await;
        let failed: Vec<_> = recorded.iter().filter_map(|r| r.as_ref().err()).collect();
        assert!(failed.is_empty(), "records failed: {failed:?}");

        let modified = join_all((0..50).map(|i| {
            let ledger = ledger.clone();
            async move {
                let roll_no = format!("R{}", i % 5);
                let date = format!("2024-01-{:02}", i / 5 + 1);
                ledger.modify_status(&roll_no, &date, "absent").await
            }
        }))
        .await;
        let failed: Vec<_> = modified.iter().filter_map(|r| r.as_ref().err()).collect();
        assert!(failed.is_empty(), "modifications failed: {failed:?}");

        let absent: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance WHERE attendance_status = 'absent'",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(absent, 50);
    }

    #[actix_web::test]
    async fn concurrent_duplicate_registrations_yield_one_student() {
        let db = TempDb::new("concurrent_duplicates").await;
        let directory = StudentDirectory::new(db.pool.clone());

        let results = join_all((0..20).map(|i| {
            let directory = directory.clone();
            async move {
                let name = format!("Student {i}");
                directory.register("DUP", &name).await
            }
        }))
        .await;

        let won = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ApiError::Conflict(_))))
            .count();
        assert_eq!((won, conflicts), (1, 19), "{results:?}");

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE roll_no = 'DUP'")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }
}

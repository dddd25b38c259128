use crate::{
    error::{ApiError, ApiResult, require},
    model::attendance::{AttendanceDetail, AttendanceRecord},
    store::students::{STUDENT_NOT_FOUND, StudentDirectory},
};
use futures_util::TryStreamExt;
use sqlx::SqlitePool;
use tracing::{debug, info};

const RECORD_REQUIRED: &str = "Roll number, attendance status, and custom date are required";
const LOOKUP_REQUIRED: &str = "Roll number and custom date are required";
const LIST_REQUIRED: &str = "Custom date and attendance status are required";
const MODIFY_REQUIRED: &str = "Roll number, custom date, and new attendance status are required";
const NOT_RECORDED: &str = "Attendance not recorded for the given date";
const RECORD_NOT_FOUND: &str = "Attendance record not found";

/// Daily attendance marks. Several records may exist for the same student
/// and date; reads and updates always act on the oldest one.
#[derive(Clone)]
pub struct AttendanceLedger {
    pool: SqlitePool,
    directory: StudentDirectory,
}

impl AttendanceLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            directory: StudentDirectory::new(pool.clone()),
            pool,
        }
    }

    pub async fn record(
        &self,
        roll_no: &str,
        attendance_status: &str,
        custom_date: &str,
    ) -> ApiResult<AttendanceRecord> {
        require(&[roll_no, attendance_status, custom_date], RECORD_REQUIRED)?;

        // the foreign key on roll_no is the existence check
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (roll_no, attendance_status, custom_date)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(roll_no)
        .bind(attendance_status)
        .bind(custom_date)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                info!(roll_no, "Attendance for unknown student");
                return Err(ApiError::not_found(STUDENT_NOT_FOUND));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(id, roll_no, attendance_status, custom_date, "Attendance recorded");

        Ok(AttendanceRecord {
            id,
            roll_no: roll_no.to_string(),
            attendance_status: attendance_status.to_string(),
            custom_date: custom_date.to_string(),
        })
    }

    /// The first record for the student on that date, with the student's name.
    pub async fn lookup(&self, roll_no: &str, custom_date: &str) -> ApiResult<AttendanceDetail> {
        require(&[roll_no, custom_date], LOOKUP_REQUIRED)?;

        let student = self.directory.find(roll_no).await?;

        let record = first_match(&self.pool, roll_no, custom_date)
            .await?
            .ok_or_else(|| ApiError::NotRecorded(NOT_RECORDED.to_string()))?;

        Ok(AttendanceDetail {
            roll_no: record.roll_no,
            name: student.name,
            attendance_status: record.attendance_status,
            date: record.custom_date,
        })
    }

    /// Every record with this date and status, in insertion order.
    pub async fn list_by_status(
        &self,
        custom_date: &str,
        attendance_status: &str,
    ) -> ApiResult<Vec<AttendanceDetail>> {
        require(&[custom_date, attendance_status], LIST_REQUIRED)?;

        let details: Vec<AttendanceDetail> = sqlx::query_as::<_, AttendanceDetail>(
            r#"
            SELECT
                a.roll_no AS roll_no,
                s.name AS name,
                a.attendance_status AS attendance_status,
                a.custom_date AS date
            FROM attendance a
            JOIN students s ON s.roll_no = a.roll_no
            WHERE a.custom_date = ?
            AND a.attendance_status = ?
            ORDER BY a.id
            "#,
        )
        .bind(custom_date)
        .bind(attendance_status)
        .fetch(&self.pool)
        .try_collect()
        .await?;

        if details.is_empty() {
            return Err(ApiError::NotRecorded(format!(
                "No {attendance_status} attendance recorded for the given date"
            )));
        }

        debug!(custom_date, attendance_status, count = details.len(), "Listed attendance");
        Ok(details)
    }

    pub async fn modify_status(
        &self,
        roll_no: &str,
        custom_date: &str,
        new_status: &str,
    ) -> ApiResult<AttendanceRecord> {
        require(&[roll_no, custom_date, new_status], MODIFY_REQUIRED)?;

        // one statement, so selecting the oldest match and rewriting it can't interleave
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance
            SET attendance_status = ?
            WHERE id = (
                SELECT id FROM attendance
                WHERE roll_no = ?
                AND custom_date = ?
                ORDER BY id
                LIMIT 1
            )
            RETURNING id, roll_no, attendance_status, custom_date
            "#,
        )
        .bind(new_status)
        .bind(roll_no)
        .bind(custom_date)
        .fetch_all(&self.pool) // drained so the statement finishes and releases the write lock
        .await?
        .pop()
        .ok_or_else(|| ApiError::not_found(RECORD_NOT_FOUND))?;

        debug!(id = record.id, roll_no, custom_date, to = new_status, "Attendance status modified");

        Ok(record)
    }
}

async fn first_match(
    pool: &SqlitePool,
    roll_no: &str,
    custom_date: &str,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, roll_no, attendance_status, custom_date
        FROM attendance
        WHERE roll_no = ?
        AND custom_date = ?
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(roll_no)
    .bind(custom_date)
    .fetch_optional(pool)
    .await
}

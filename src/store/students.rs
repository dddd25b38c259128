use crate::{
    error::{ApiError, ApiResult, require},
    model::student::Student,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

const REGISTER_REQUIRED: &str = "Roll number and name are required";
const DUPLICATE_ROLL_NO: &str = "Student with the same roll number already exists";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

/// The set of known students, keyed by roll number.
#[derive(Clone)]
pub struct StudentDirectory {
    pool: SqlitePool,
}

impl StudentDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persists a new student. A single autocommit insert; the unique index
    /// on `roll_no` decides between concurrent registrations.
    pub async fn register(&self, roll_no: &str, name: &str) -> ApiResult<Student> {
        require(&[roll_no, name], REGISTER_REQUIRED)?;

        let result = sqlx::query("INSERT INTO students (roll_no, name) VALUES (?, ?)")
            .bind(roll_no)
            .bind(name)
            .execute(&self.pool)
            .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                info!(roll_no, "Roll number already registered");
                return Err(ApiError::conflict(DUPLICATE_ROLL_NO));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(id, roll_no, "Student registered");

        Ok(Student {
            id,
            roll_no: roll_no.to_string(),
            name: name.to_string(),
        })
    }

    pub async fn find(&self, roll_no: &str) -> ApiResult<Student> {
        sqlx::query_as::<_, Student>("SELECT id, roll_no, name FROM students WHERE roll_no = ?")
            .bind(roll_no)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(STUDENT_NOT_FOUND))
    }
}

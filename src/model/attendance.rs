use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the ledger. `custom_date` is whatever string the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "R1")]
    pub roll_no: String,

    #[schema(example = "present")]
    pub attendance_status: String,

    #[schema(example = "2024-01-01")]
    pub custom_date: String,
}

/// A record joined with the student's name, as returned by the query endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "roll_no": "R1",
        "name": "Alice",
        "attendance_status": "present",
        "date": "2024-01-01"
    })
)]
pub struct AttendanceDetail {
    pub roll_no: String,
    pub name: String,
    pub attendance_status: String,
    pub date: String,
}

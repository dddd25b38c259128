use super::field;
use crate::{error::ApiResult, model::attendance::AttendanceDetail, store::AttendanceLedger};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct RecordAttendance {
    #[schema(example = "R1", value_type = String)]
    pub roll_no: Option<String>,
    #[schema(example = "present", value_type = String)]
    pub attendance_status: Option<String>,
    #[schema(example = "2024-01-01", value_type = String)]
    pub custom_date: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ModifyAttendanceStatus {
    #[schema(example = "R1", value_type = String)]
    pub roll_no: Option<String>,
    #[schema(example = "2024-01-01", value_type = String)]
    pub custom_date: Option<String>,
    #[schema(example = "absent", value_type = String)]
    pub new_attendance_status: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckAttendanceQuery {
    /// Student roll number
    pub roll_no: Option<String>,
    /// Date string exactly as recorded
    pub custom_date: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub custom_date: Option<String>,
    pub attendance_status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceDetailsResponse {
    pub attendance_details: Vec<AttendanceDetail>,
}

/// Record attendance for a registered student
#[utoipa::path(
    post,
    path = "/record_attendance",
    request_body = RecordAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance recorded successfully"
        })),
        (status = 400, description = "Missing fields", body = Object, example = json!({
            "error": "Roll number, attendance status, and custom date are required"
        })),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "error": "Student not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "record_attendance",
    skip(ledger, payload),
    fields(roll_no = ?payload.roll_no, custom_date = ?payload.custom_date)
)]
pub async fn record_attendance(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<RecordAttendance>,
) -> ApiResult<HttpResponse> {
    let record = ledger
        .record(
            field(&payload.roll_no),
            field(&payload.attendance_status),
            field(&payload.custom_date),
        )
        .await?;

    info!(id = record.id, status = %record.attendance_status, "Attendance recorded");

    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance recorded successfully"
    })))
}

/// Attendance of one student on one date
#[utoipa::path(
    get,
    path = "/check_attendance",
    params(CheckAttendanceQuery),
    responses(
        (status = 200, description = "Attendance found", body = AttendanceDetail),
        (status = 400, description = "Missing params", body = Object, example = json!({
            "error": "Roll number and custom date are required"
        })),
        (status = 404, description = "Student not found, or nothing recorded for the date", body = Object, example = json!({
            "message": "Attendance not recorded for the given date"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "check_attendance",
    skip(ledger, query),
    fields(roll_no = ?query.roll_no, custom_date = ?query.custom_date)
)]
pub async fn check_attendance(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<CheckAttendanceQuery>,
) -> ApiResult<HttpResponse> {
    let detail = ledger
        .lookup(field(&query.roll_no), field(&query.custom_date))
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Every student with the given status on the given date
#[utoipa::path(
    get,
    path = "/attendance_details_by_status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Matching attendance", body = AttendanceDetailsResponse),
        (status = 400, description = "Missing params", body = Object, example = json!({
            "error": "Custom date and attendance status are required"
        })),
        (status = 404, description = "Nothing matched", body = Object, example = json!({
            "message": "No absent attendance recorded for the given date"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "attendance_details_by_status",
    skip(ledger, query),
    fields(custom_date = ?query.custom_date, status = ?query.attendance_status)
)]
pub async fn attendance_details_by_status(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<StatusQuery>,
) -> ApiResult<HttpResponse> {
    let attendance_details = ledger
        .list_by_status(field(&query.custom_date), field(&query.attendance_status))
        .await?;

    debug!(count = attendance_details.len(), "Returning attendance details");

    Ok(HttpResponse::Ok().json(AttendanceDetailsResponse { attendance_details }))
}

/// Change the status of an existing record
#[utoipa::path(
    put,
    path = "/modify_attendance_status",
    request_body = ModifyAttendanceStatus,
    responses(
        (status = 200, description = "Status modified", body = Object, example = json!({
            "message": "Attendance status modified successfully"
        })),
        (status = 400, description = "Missing fields", body = Object, example = json!({
            "error": "Roll number, custom date, and new attendance status are required"
        })),
        (status = 404, description = "Record not found", body = Object, example = json!({
            "error": "Attendance record not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "modify_attendance_status",
    skip(ledger, payload),
    fields(roll_no = ?payload.roll_no, custom_date = ?payload.custom_date)
)]
pub async fn modify_attendance_status(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<ModifyAttendanceStatus>,
) -> ApiResult<HttpResponse> {
    let record = ledger
        .modify_status(
            field(&payload.roll_no),
            field(&payload.custom_date),
            field(&payload.new_attendance_status),
        )
        .await?;

    info!(id = record.id, status = %record.attendance_status, "Attendance status modified");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance status modified successfully"
    })))
}

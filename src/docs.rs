use crate::api::attendance::{AttendanceDetailsResponse, ModifyAttendanceStatus, RecordAttendance};
use crate::api::student::AddStudent;
use crate::model::attendance::{AttendanceDetail, AttendanceRecord};
use crate::model::student::Student;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Attendance API",
        version = "1.0.0",
        description = r#"
## Student Attendance

Register students by roll number and keep a daily attendance ledger.

### Endpoints
- **Students**: register a student with a unique roll number
- **Attendance**: record a status for a date, check one student's status,
  list everyone with a given status on a date, and correct a status

### Response Format
- Every response is a JSON object
- Failures carry an `error` key; "nothing recorded" results carry `message`

Dates are stored exactly as sent and never parsed.
"#,
    ),
    paths(
        crate::api::student::add_student,

        crate::api::attendance::record_attendance,
        crate::api::attendance::check_attendance,
        crate::api::attendance::attendance_details_by_status,
        crate::api::attendance::modify_attendance_status,

        crate::api::health::health
    ),
    components(
        schemas(
            AddStudent,
            RecordAttendance,
            ModifyAttendanceStatus,
            AttendanceDetail,
            AttendanceDetailsResponse,
            AttendanceRecord,
            Student
        )
    ),
    tags(
        (name = "Student", description = "Student registration"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

use super::field;
use crate::{error::ApiResult, store::StudentDirectory};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AddStudent {
    #[schema(example = "R1", value_type = String)]
    pub roll_no: Option<String>,
    #[schema(example = "Alice", value_type = String)]
    pub name: Option<String>,
}

/// Register a student
#[utoipa::path(
    post,
    path = "/add_student",
    request_body = AddStudent,
    responses(
        (status = 201, description = "Student added", body = Object, example = json!({
            "message": "Student added successfully"
        })),
        (status = 400, description = "Missing fields", body = Object, example = json!({
            "error": "Roll number and name are required"
        })),
        (status = 409, description = "Duplicate roll number", body = Object, example = json!({
            "error": "Student with the same roll number already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
#[instrument(name = "add_student", skip(directory, payload), fields(roll_no = ?payload.roll_no))]
pub async fn add_student(
    directory: web::Data<StudentDirectory>,
    payload: web::Json<AddStudent>,
) -> ApiResult<HttpResponse> {
    let student = directory
        .register(field(&payload.roll_no), field(&payload.name))
        .await?;

    info!(id = student.id, "Student added");

    Ok(HttpResponse::Created().json(json!({
        "message": "Student added successfully"
    })))
}

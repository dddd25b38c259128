use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "R1")]
    pub roll_no: String,

    #[schema(example = "Alice")]
    pub name: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Table;

/// One recorded energy reading, listed by ascending id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Consumption {
    pub id: i32,
    pub period: String,
    pub kwh: f64,
}

pub struct ConsumptionTable;

impl Table for ConsumptionTable {
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS consumption (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                period TEXT NOT NULL,
                kwh REAL NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS consumption;")
    }
}

use time::OffsetDateTime;

use crate::models::Table;

/// A user row. `otp` and `otp_expiry` are set together while a code is
/// pending and cleared together once it is consumed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub otp: Option<String>,
    pub otp_expiry: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

pub struct UserTable;

impl Table for UserTable {
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone_number TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                otp TEXT,
                otp_expiry TIMESTAMP,
                created_at TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS users;")
    }
}

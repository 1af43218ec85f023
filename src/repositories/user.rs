use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::User;

pub struct UserRepository {
    storage: Arc<Storage>,
}

impl UserRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }

    // Create new user, returns the assigned id
    pub async fn create(
        &self,
        item: &User,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO users (full_name, email, phone_number, password, otp, otp_expiry, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.full_name)
        .bind(&item.email)
        .bind(&item.phone_number)
        .bind(&item.password)
        .bind(item.otp.as_deref())
        .bind(item.otp_expiry)
        .bind(item.created_at)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    // Find user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(user)
    }

    // Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(user)
    }

    // Find user by phone number
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, Error> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(user)
    }

    // Store a pending code, overwriting any previous one
    pub async fn set_otp(
        &self,
        id: i32,
        otp: &str,
        expiry: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET otp = $1, otp_expiry = $2
            WHERE id = $3
            "#,
        )
        .bind(otp)
        .bind(expiry)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    // Consume the pending code
    pub async fn clear_otp(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("UPDATE users SET otp = NULL, otp_expiry = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::configs::{Database, SchemaManager};

    use super::*;

    async fn setup_test_db() -> Arc<Storage> {
        Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        )
    }

    fn sample_user() -> User {
        User {
            id: 0,
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone_number: "+15550000".to_string(),
            password: "hashed_password".to_string(),
            otp: None,
            otp_expiry: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = setup_test_db().await;
        let repo = UserRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&sample_user(), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let by_id = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "test@example.com");
        assert!(by_id.otp.is_none());
        assert!(by_id.otp_expiry.is_none());

        let by_email = repo.find_by_email("test@example.com").await.unwrap();
        assert!(by_email.is_some());

        let by_phone = repo.find_by_phone("+15550000").await.unwrap().unwrap();
        assert_eq!(by_phone.id, id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let storage = setup_test_db().await;
        let repo = UserRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&sample_user(), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let mut duplicate = sample_user();
        duplicate.phone_number = "+15550099".to_string();

        let mut tx = storage.get_pool().begin().await.unwrap();
        let result = repo.create(&duplicate, &mut tx).await;

        match result {
            Err(Error::Database(e)) => assert!(e.is_unique_violation()),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_set_and_clear_otp() {
        let storage = setup_test_db().await;
        let repo = UserRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&sample_user(), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let expiry = OffsetDateTime::now_utc() + time::Duration::minutes(5);
        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.set_otp(id, "123456", expiry, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let user = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.otp.as_deref(), Some("123456"));
        assert!(user.otp_expiry.is_some());

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.clear_otp(id, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let user = repo.find_by_id(id).await.unwrap().unwrap();
        assert!(user.otp.is_none());
        assert!(user.otp_expiry.is_none());
    }
}

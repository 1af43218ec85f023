use std::sync::Arc;

use sqlx::Error;

use crate::configs::Storage;
use crate::models::Consumption;

pub struct ConsumptionRepository {
    storage: Arc<Storage>,
}

impl ConsumptionRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    // All readings, oldest id first
    pub async fn find_all(&self) -> Result<Vec<Consumption>, Error> {
        let rows: Vec<Consumption> = sqlx::query_as("SELECT * FROM consumption ORDER BY id ASC")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(rows)
    }
}

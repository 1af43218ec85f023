use crate::models::Table;
use crate::models::consumption::ConsumptionTable;
use crate::models::user::UserTable;

/// Collects the DDL of every table the server owns.
pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self { tables }
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![Box::new(UserTable), Box::new(ConsumptionTable)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_covers_all_tables() {
        let schema = SchemaManager::default();

        let create = schema.create_schema().join("\n");
        assert!(create.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(create.contains("CREATE TABLE IF NOT EXISTS consumption"));

        let dispose = schema.dispose_schema().join("\n");
        assert!(dispose.contains("DROP TABLE IF EXISTS users"));
        assert!(dispose.contains("DROP TABLE IF EXISTS consumption"));
    }
}

pub use sea_orm_migration::prelude::*;

mod m20251001_add_relation_indexes;
mod m20251001_create_academic_tables;

pub use m20251001_create_academic_tables::{NAME_LEN, PROFESSOR_NAME_LEN};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_create_academic_tables::Migration),
            Box::new(m20251001_add_relation_indexes::Migration),
        ]
    }
}

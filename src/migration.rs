pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_reservation_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Own bookkeeping table so the schema can share a database with other migrators
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("spot_reservations_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_reservation_tables::Migration)]
    }
}

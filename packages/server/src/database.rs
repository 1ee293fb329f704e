use std::time::Duration;

use sea_orm::sea_query::{Alias, ColumnDef, Table, TableCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::records::{
    ALL_SCHEMAS, CATEGORY_COLUMN, DEFAULT_STATUS, DESCRIPTION_COLUMN, QUANTITY_COLUMN,
    RecordSchema, STATUS_COLUMN, UNIT_PRICE_COLUMN,
};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(opt).await
}

/// Create every record table that does not exist yet. Existing tables are
/// left untouched.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for schema in ALL_SCHEMAS {
        db.execute_raw(backend.build(&create_table(schema))).await?;
        info!(table = schema.table, "Ensured table");
    }
    Ok(())
}

fn create_table(schema: &RecordSchema) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(schema.table))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new(schema.id_column))
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Alias::new(schema.name_column))
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(Alias::new(CATEGORY_COLUMN)).string_len(255).null())
        .col(ColumnDef::new(Alias::new(DESCRIPTION_COLUMN)).text().null())
        .col(
            ColumnDef::new(Alias::new(QUANTITY_COLUMN))
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Alias::new(UNIT_PRICE_COLUMN))
                .double()
                .not_null()
                .default(0.0),
        )
        .col(ColumnDef::new(Alias::new(schema.image_column)).string_len(255).null())
        .col(
            ColumnDef::new(Alias::new(STATUS_COLUMN))
                .string_len(50)
                .not_null()
                .default(DEFAULT_STATUS),
        )
        .to_owned()
}

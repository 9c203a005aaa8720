//! Schema bootstrap: creates the grid tables from their descriptors when missing.

use crate::domain::{GridColumn, GridConfiguration, GridToolbarItem};
use crate::error::AppResult;
use crate::sql::create_table;
use sqlx::PgPool;

/// Statements in dependency order: the owner table first.
pub fn schema_statements() -> Vec<String> {
    let mut statements = create_table::<GridConfiguration>();
    statements.extend(create_table::<GridColumn>());
    statements.extend(create_table::<GridToolbarItem>());
    statements
}

pub async fn apply_migrations(pool: &PgPool) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for ddl in schema_statements() {
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("schema ready");
    Ok(())
}

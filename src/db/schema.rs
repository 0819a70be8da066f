use sqlx::postgres::PgConnection;

use crate::error::BenchError;

/// Create PostGIS and the `employees` table. Safe to run repeatedly.
pub async fn init_schema(conn: &mut PgConnection) -> Result<(), BenchError> {
    tracing::info!("Initializing employees schema...");

    sqlx::query(CREATE_POSTGIS_EXTENSION)
        .execute(&mut *conn)
        .await
        .map_err(BenchError::Schema)?;

    sqlx::query(CREATE_EMPLOYEES_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(BenchError::Schema)?;

    tracing::info!("Employees schema initialized successfully");
    Ok(())
}

const CREATE_POSTGIS_EXTENSION: &str = "CREATE EXTENSION IF NOT EXISTS postgis";

// No primary key: generated IDs are not unique across batches, and the
// column-set inserts leave most columns NULL.
const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    employee_id         INTEGER,
    first_name          TEXT,
    last_name           TEXT,
    age                 INTEGER,
    rating              REAL,
    json_contact_info   JSON,
    bjson_contact_info  JSONB,
    address             GEOMETRY(Point)
)
"#;

//! Table definition for the contact store.

use sqlx::PgConnection;

/// The one table this service manages. `id` is the only constraint;
/// duplicate names and emails are allowed.
pub const CREATE_CONTACTS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS contacts (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    relation TEXT,
    notes TEXT,
    address TEXT
)";

/// Creates the contacts table if it does not exist yet. Run once at
/// server startup so a fresh database can serve requests immediately.
pub async fn ensure_schema(conn: &mut PgConnection) -> sqlx::Result<()> {
    sqlx::query(CREATE_CONTACTS_TABLE).execute(conn).await?;
    Ok(())
}

//! Statement layer for the contacts table.
//!
//! Every operation opens its own connection and closes it before
//! returning; nothing is pooled or shared across requests. Failures on
//! the error path close the connection on drop.

use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};

use crate::config::DbConfig;
use crate::contact::{Contact, ContactPatch, NewContact};
use crate::error::ApiError;

/// Opens a fresh connection to the store.
pub async fn connect(config: &DbConfig) -> Result<PgConnection, ApiError> {
    PgConnection::connect(config.url())
        .await
        .map_err(ApiError::Connection)
}

/// All contacts in the store's natural order.
pub async fn list(config: &DbConfig) -> Result<Vec<Contact>, ApiError> {
    let mut conn = connect(config).await?;
    let contacts = sqlx::query_as::<_, Contact>(
        "SELECT id, name, email, phone, relation, notes, address FROM contacts",
    )
    .fetch_all(&mut conn)
    .await?;
    conn.close().await?;
    Ok(contacts)
}

/// Inserts a contact and returns the stored row, id included.
pub async fn insert(config: &DbConfig, contact: &NewContact) -> Result<Contact, ApiError> {
    let mut conn = connect(config).await?;
    let created = sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts (name, email, phone, relation, notes, address) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, name, email, phone, relation, notes, address",
    )
    .bind(contact.name.as_deref())
    .bind(contact.email.as_deref())
    .bind(contact.phone.as_deref())
    .bind(contact.relation.as_deref())
    .bind(contact.notes.as_deref())
    .bind(contact.address.as_deref())
    .fetch_one(&mut conn)
    .await?;
    conn.close().await?;
    Ok(created)
}

/// Looks up a single contact by id.
pub async fn fetch(config: &DbConfig, id: i32) -> Result<Option<Contact>, ApiError> {
    let mut conn = connect(config).await?;
    let contact = sqlx::query_as::<_, Contact>(
        "SELECT id, name, email, phone, relation, notes, address FROM contacts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut conn)
    .await?;
    conn.close().await?;
    Ok(contact)
}

/// Applies a sparse patch to one row. Returns the number of rows
/// affected; zero means the id does not exist. The caller must reject
/// empty patches.
pub async fn update(config: &DbConfig, id: i32, patch: &ContactPatch) -> Result<u64, ApiError> {
    let mut conn = connect(config).await?;
    let mut statement = update_statement(id, patch);
    let result = statement.build().execute(&mut conn).await?;
    conn.close().await?;
    Ok(result.rows_affected())
}

/// Removes one row. Returns the number of rows affected.
pub async fn delete(config: &DbConfig, id: i32) -> Result<u64, ApiError> {
    let mut conn = connect(config).await?;
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(&mut conn)
        .await?;
    conn.close().await?;
    Ok(result.rows_affected())
}

/// Case-insensitive substring match on the `relation` column.
pub async fn filter_by_relation(
    config: &DbConfig,
    relation: &str,
) -> Result<Vec<Contact>, ApiError> {
    let mut conn = connect(config).await?;
    let contacts = sqlx::query_as::<_, Contact>(
        "SELECT id, name, email, phone, relation, notes, address FROM contacts \
         WHERE relation ILIKE $1",
    )
    .bind(format!("%{relation}%"))
    .fetch_all(&mut conn)
    .await?;
    conn.close().await?;
    Ok(contacts)
}

/// Assembles `UPDATE contacts SET <present fields> WHERE id = $n` from the
/// fields the patch actually carries.
fn update_statement<'a>(id: i32, patch: &'a ContactPatch) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE contacts SET ");
    let mut fields = builder.separated(", ");
    for (column, value) in patch.entries() {
        fields.push(format!("{column} = "));
        fields.push_bind_unseparated(value);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_statement_includes_only_present_fields() {
        let patch: ContactPatch =
            serde_json::from_str(r#"{"name": "Ann", "notes": "college"}"#).unwrap();
        let statement = update_statement(7, &patch);
        assert_eq!(
            statement.sql(),
            "UPDATE contacts SET name = $1, notes = $2 WHERE id = $3"
        );
    }

    #[test]
    fn update_statement_keeps_null_assignments() {
        let patch: ContactPatch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        let statement = update_statement(1, &patch);
        assert_eq!(statement.sql(), "UPDATE contacts SET phone = $1 WHERE id = $2");
    }
}

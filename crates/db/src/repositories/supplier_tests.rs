//! Tests for the supplier repository.
//!
//! Verifies that the autocomplete search filters in SQL rather than fetching
//! every supplier and matching substrings in memory.

use sea_orm::{DatabaseBackend, MockDatabase};

use super::SupplierRepository;
use crate::entities::suppliers;

fn supplier_named(name: &str) -> suppliers::Model {
    let now = chrono::Utc::now().into();
    suppliers::Model {
        id: uuid::Uuid::new_v4(),
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_search_filters_with_sql_like() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[supplier_named("Acme Distribution")]])
        .into_connection();
    let repo = SupplierRepository::new(db.clone());

    let results = repo.search("ACME").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Acme Distribution");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("LIKE"), "expected LIKE in query: {log}");
    assert!(log.contains("%acme%"), "expected lowercased pattern: {log}");
    assert!(log.contains("LOWER"), "expected lower() on name: {log}");
}

//! Tests for the affiliate repository.
//!
//! Runs against a mock connection and inspects the generated SQL, so the
//! duplicate-name check stays in the database instead of scanning rows in
//! memory.

use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, Value};

use super::AffiliateRepository;

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_name_taken_matches_case_insensitively_in_sql() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .into_connection();
    let repo = AffiliateRepository::new(db.clone());

    let taken = repo.name_taken("GodsPlan", None).await.unwrap();
    assert!(taken);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("LOWER"), "expected lower() in query: {log}");
    assert!(
        log.contains("godsplan"),
        "expected lowercased parameter: {log}"
    );
}

#[tokio::test]
async fn test_name_taken_excludes_record_being_renamed() {
    let id = uuid::Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(0)]])
        .into_connection();
    let repo = AffiliateRepository::new(db.clone());

    let taken = repo.name_taken("Ana", Some(id)).await.unwrap();
    assert!(!taken);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("<>"), "expected id exclusion filter: {log}");
}

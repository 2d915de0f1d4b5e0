//! SQLite ledger probe repository
//!
//! Read-only adapter over the ledger database owned by the storage layer.
//! The gate only ever asks "does at least one record exist", optionally
//! scoped to provenance, so this adapter issues count queries and nothing
//! else.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use tb_core::ledger::RecordProvenance;
use tb_core::ports::LedgerStorePort;

diesel::table! {
    /// Ledger records; schema owned by the storage layer.
    records (id) {
        id -> Text,
        provenance -> Text,
    }
}

pub struct SqliteLedgerProbeRepository {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl SqliteLedgerProbeRepository {
    pub fn new(database_url: &str) -> anyhow::Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder().max_size(2).build(manager)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl LedgerStorePort for SqliteLedgerProbeRepository {
    async fn has_records(&self, provenance: Option<RecordProvenance>) -> anyhow::Result<bool> {
        let pool = self.pool.clone();
        let count: i64 = tokio::task::spawn_blocking(move || -> anyhow::Result<i64> {
            let mut conn = pool.get()?;
            let mut query = records::table.into_boxed();
            if let Some(provenance) = provenance {
                query = query.filter(records::provenance.eq(provenance.as_str()));
            }
            Ok(query.count().get_result(&mut conn)?)
        })
        .await??;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_repo(temp_dir: &TempDir, rows: &[(&str, &str)]) -> SqliteLedgerProbeRepository {
        let db_path = temp_dir.path().join("ledger.db");
        let repo = SqliteLedgerProbeRepository::new(db_path.to_str().unwrap()).unwrap();

        let mut conn = repo.pool.get().unwrap();
        diesel::sql_query("CREATE TABLE records (id TEXT PRIMARY KEY, provenance TEXT NOT NULL)")
            .execute(&mut conn)
            .unwrap();
        for (id, provenance) in rows {
            diesel::insert_into(records::table)
                .values((records::id.eq(*id), records::provenance.eq(*provenance)))
                .execute(&mut conn)
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn empty_table_has_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let repo = seeded_repo(&temp_dir, &[]);

        assert!(!repo.has_records(None).await.unwrap());
        assert!(!repo
            .has_records(Some(RecordProvenance::Remote))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn provenance_scoping_separates_local_from_remote() {
        let temp_dir = TempDir::new().unwrap();
        let repo = seeded_repo(&temp_dir, &[("b1", "local")]);

        assert!(repo.has_records(None).await.unwrap());
        assert!(repo
            .has_records(Some(RecordProvenance::Local))
            .await
            .unwrap());
        // A locally created record must not register as remote data.
        assert!(!repo
            .has_records(Some(RecordProvenance::Remote))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn replicated_records_are_visible_to_the_remote_scope() {
        let temp_dir = TempDir::new().unwrap();
        let repo = seeded_repo(&temp_dir, &[("b1", "local"), ("b2", "remote")]);

        assert!(repo
            .has_records(Some(RecordProvenance::Remote))
            .await
            .unwrap());
    }
}

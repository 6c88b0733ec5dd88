use hotelier::bootstrap;
use hotelier::config::Config;
use hotelier::domain::ports::sheet_store::SheetStore;
use hotelier::infrastructure::http::middleware::AppState;
use hotelier::infrastructure::persistence::{Database, InMemorySheetStore};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("default configuration")
}

/// Application state over a fresh in-memory row store.
pub async fn setup_memory_state() -> AppState {
    let store: Arc<dyn SheetStore> = Arc::new(InMemorySheetStore::new());
    bootstrap::build_app_state(store, &test_config())
        .await
        .expect("Failed to build app state")
}

/// Temp-file SQLite database, removed on drop.
pub struct TestDb {
    pub db: Database,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn setup_test_db() -> TestDb {
    // Unique file per test for parallel execution
    let path = std::env::temp_dir().join(format!("hotelier_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDb { db, path }
}

/// Application state over a temp-file SQLite database.
pub async fn setup_sqlite_state(test_db: &TestDb) -> AppState {
    let store: Arc<dyn SheetStore> = Arc::new(test_db.db.clone());
    bootstrap::build_app_state(store, &test_config())
        .await
        .expect("Failed to build app state")
}

use crate::application::services::*;
use crate::config::{Config, StoreBackend};
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::credential_provider::CredentialProvider;
use crate::domain::ports::price_rule_repository::PriceRuleRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::ports::sheet_store::SheetStore;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::{
    Database, GoogleSheetsStore, InMemorySheetStore, SheetRepository, StaticTokenProvider,
};
use std::sync::Arc;

/// Open the row store selected by the configuration.
pub async fn build_store(config: &Config) -> Result<Arc<dyn SheetStore>, Box<dyn std::error::Error>> {
    match config.store_backend {
        StoreBackend::Sqlite => {
            let db = Database::connect(&config.database_url).await?;
            tracing::info!("Database connection established");

            db.run_migrations().await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory row store, data is lost on shutdown");
            Ok(Arc::new(InMemorySheetStore::new()))
        }
        StoreBackend::Google => {
            let sheets = config
                .google_sheets
                .as_ref()
                .ok_or("Google Sheets backend selected without its configuration")?;
            let credentials: Arc<dyn CredentialProvider> =
                Arc::new(StaticTokenProvider::new(sheets.access_token.clone()));
            let store = GoogleSheetsStore::new(
                sheets.spreadsheet_id.clone(),
                sheets.api_base.clone(),
                credentials,
            )?;
            tracing::info!("Google Sheets row store configured");
            Ok(Arc::new(store))
        }
    }
}

pub async fn build_app_state(
    store: Arc<dyn SheetStore>,
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let repository = SheetRepository::new(store);
    repository.initialize().await?;
    tracing::info!("Sheet headers verified");

    let room_repo: Arc<dyn RoomRepository> = Arc::new(repository.clone());
    let booking_repo: Arc<dyn BookingRepository> = Arc::new(repository.clone());
    let rule_repo: Arc<dyn PriceRuleRepository> = Arc::new(repository);

    let room_service = RoomService::new(room_repo.clone(), booking_repo.clone());
    let booking_service =
        BookingService::new(booking_repo.clone(), room_repo.clone(), rule_repo.clone());
    let price_rule_service = PriceRuleService::new(rule_repo.clone(), room_repo.clone());
    let availability_service =
        AvailabilityService::new(room_repo.clone(), booking_repo.clone(), rule_repo);
    let report_service = ReportService::new(room_repo, booking_repo);
    let session_service = SessionService::new(
        config.admin_username.clone(),
        config.admin_password.clone(),
    );

    Ok(AppState {
        room_service,
        booking_service,
        price_rule_service,
        availability_service,
        report_service,
        session_service,
    })
}

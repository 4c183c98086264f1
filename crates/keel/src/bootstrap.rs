use crate::error::{BootstrapError, BootstrapErrorExt};
use crate::services::{
    self, FileStorage, FileStorageInner, MongoDb, MongoDbInner, PostgresDb, PostgresDbInner,
};
use keel_domain::config::SettingsInner;
use keel_domain::features::FeatureSet;
use keel_domain::registry::InitializedSlice;
use keel_kernel::server::ApiState;
use keel_storage::StorageService;
use tracing::info;

/// Initializes the items slice and every optional service whose flag is on.
///
/// # Errors
///
/// Fails on the first service that cannot start: an unknown `STORAGE_TYPE` or
/// `OCR_PROVIDER`, a remote storage backend without bucket, or an unusable storage root.
pub async fn bootstrap(settings: &SettingsInner) -> Result<Vec<InitializedSlice>, BootstrapError> {
    let features = settings.features();
    info!(%features, "Enabled features");

    let mut slices = vec![keel_items::init()?];

    if features.contains(FeatureSet::POSTGRES) {
        let db = services::postgres_builder(settings).connect().await.context("PostgreSQL connector")?;
        info!(url = %db.url(), "PostgreSQL connector initialized");
        slices.push(InitializedSlice::new(PostgresDb::new(PostgresDbInner { db })));
    }

    if features.contains(FeatureSet::MONGO) {
        let db = services::mongo_builder(settings).connect().await.context("MongoDB connector")?;
        info!(url = %db.url(), "MongoDB connector initialized");
        slices.push(InitializedSlice::new(MongoDb::new(MongoDbInner { db })));
    }

    if features.contains(FeatureSet::OCR) {
        slices.push(keel_ocr::init(settings)?);
    }

    if features.contains(FeatureSet::STORAGE) {
        let options = services::storage_options(settings)?;
        let service = StorageService::init(options).await.context("storage service")?;
        info!(kind = %service.kind(), "Storage service initialized");
        slices.push(InitializedSlice::new(FileStorage::new(FileStorageInner { service })));
    }

    Ok(slices)
}

/// Releases closable services. Safe to call more than once.
pub fn shutdown(state: &ApiState) {
    if let Some(postgres) = state.get_slice::<PostgresDb>() {
        postgres.db.close();
    }
    if let Some(mongo) = state.get_slice::<MongoDb>() {
        mongo.db.close();
    }
    info!("Services shut down");
}

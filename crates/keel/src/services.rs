//! Slices wrapping the optional infrastructure services.

use keel_database::Database;
use keel_domain::config::SettingsInner;
use keel_storage::{StorageError, StorageOptions, StorageService};

/// PostgreSQL connector state
#[keel_derive::keel_slice]
pub struct PostgresDb {
    pub db: Database,
}

/// MongoDB connector state
#[keel_derive::keel_slice]
pub struct MongoDb {
    pub db: Database,
}

/// File storage state
#[keel_derive::keel_slice]
pub struct FileStorage {
    pub service: StorageService,
}

pub(crate) fn postgres_builder(settings: &SettingsInner) -> keel_database::DatabaseBuilder {
    Database::postgres()
        .host(&settings.postgres_host)
        .port(settings.postgres_port)
        .credentials(Some(settings.postgres_user.clone()), settings.postgres_password.clone())
        .database(&settings.postgres_db)
        .url(settings.postgres_url.as_deref())
}

pub(crate) fn mongo_builder(settings: &SettingsInner) -> keel_database::DatabaseBuilder {
    Database::mongo()
        .host(&settings.mongo_host)
        .port(settings.mongo_port)
        .credentials(settings.mongo_user.clone(), settings.mongo_password.clone())
        .database(&settings.mongo_db)
        .url(settings.mongo_url.as_deref())
}

pub(crate) fn storage_options(settings: &SettingsInner) -> Result<StorageOptions, StorageError> {
    Ok(StorageOptions {
        kind: settings.storage_type.parse()?,
        path: settings.storage_path.clone(),
        s3_bucket: settings.aws_s3_bucket.clone(),
        aws_region: settings.aws_region.clone(),
        gcs_bucket: settings.gcs_bucket.clone(),
    })
}

//! Storage service selecting a backend from configuration.
//!
//! Only the local backend touches disk. `s3` and `gcs` validate their bucket at
//! startup and report the object location a real upload would produce.

use crate::engine::Storage;
use crate::error::StorageError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Supported backend kinds, as spelled in `STORAGE_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    S3,
    Gcs,
}

impl StorageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
            Self::Gcs => "gcs",
        }
    }
}

impl FromStr for StorageKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            "gcs" => Ok(Self::Gcs),
            _ => Err(StorageError::UnknownBackend { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the storage service.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub kind: StorageKind,
    pub path: PathBuf,
    pub s3_bucket: Option<String>,
    pub aws_region: String,
    pub gcs_bucket: Option<String>,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            kind: StorageKind::Local,
            path: PathBuf::from("./storage"),
            s3_bucket: None,
            aws_region: "us-east-1".to_owned(),
            gcs_bucket: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    Local(Storage),
    S3 { bucket: String, region: String },
    Gcs { bucket: String },
}

/// Handle to the configured storage backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StorageService {
    backend: Backend,
}

impl StorageService {
    /// Initializes the backend named by `options.kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConfiguration`] when a remote backend has no bucket,
    /// and [`StorageError::Io`] when the local root cannot be prepared.
    pub async fn init(options: StorageOptions) -> Result<Self, StorageError> {
        info!(kind = %options.kind, "Initializing storage service");

        let backend = match options.kind {
            StorageKind::Local => {
                Backend::Local(Storage::builder().root(&options.path).connect().await?)
            },
            StorageKind::S3 => {
                warn!("S3 storage is a placeholder; uploads are not performed");
                let bucket = require_bucket(options.s3_bucket, "AWS_S3_BUCKET", "S3")?;
                Backend::S3 { bucket, region: options.aws_region }
            },
            StorageKind::Gcs => {
                warn!("GCS storage is a placeholder; uploads are not performed");
                Backend::Gcs { bucket: require_bucket(options.gcs_bucket, "GCS_BUCKET", "GCS")? }
            },
        };

        info!(location = %Self::describe(&backend), "Storage service initialized");
        Ok(Self { backend })
    }

    #[must_use]
    pub const fn kind(&self) -> StorageKind {
        match self.backend {
            Backend::Local(_) => StorageKind::Local,
            Backend::S3 { .. } => StorageKind::S3,
            Backend::Gcs { .. } => StorageKind::Gcs,
        }
    }

    /// The local sandbox, when the backend is `local`.
    #[must_use]
    pub const fn local(&self) -> Option<&Storage> {
        match &self.backend {
            Backend::Local(storage) => Some(storage),
            _ => None,
        }
    }

    /// Saves `data` under the relative `path` and returns where it lives: the absolute
    /// physical path for `local`, `s3://bucket/path` or `gs://bucket/path` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] for paths escaping the storage root,
    /// and I/O errors from the local backend.
    pub async fn save(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<String, StorageError> {
        let path = path.as_ref();
        match &self.backend {
            Backend::Local(storage) => {
                let saved = storage.write(path, data).await?;
                Ok(saved.display().to_string())
            },
            Backend::S3 { bucket, region } => {
                warn!(%bucket, %region, bytes = data.len(), "S3 upload skipped (placeholder)");
                Ok(format!("s3://{bucket}/{}", object_key(path)?))
            },
            Backend::Gcs { bucket } => {
                warn!(%bucket, bytes = data.len(), "GCS upload skipped (placeholder)");
                Ok(format!("gs://{bucket}/{}", object_key(path)?))
            },
        }
    }

    fn describe(backend: &Backend) -> String {
        match backend {
            Backend::Local(storage) => storage.root().display().to_string(),
            Backend::S3 { bucket, region } => format!("s3://{bucket} ({region})"),
            Backend::Gcs { bucket } => format!("gs://{bucket}"),
        }
    }
}

fn require_bucket(
    bucket: Option<String>,
    variable: &'static str,
    label: &'static str,
) -> Result<String, StorageError> {
    bucket.filter(|b| !b.trim().is_empty()).ok_or_else(|| StorageError::InvalidConfiguration {
        message: format!("{variable} must be set for {label} storage").into(),
        context: None,
    })
}

/// Object keys use forward slashes and must stay relative.
fn object_key(path: &Path) -> Result<String, StorageError> {
    let key = path.to_string_lossy().replace('\\', "/");
    let key = key.trim_start_matches("./");
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|seg| seg == "..") {
        return Err(StorageError::PathTraversalAttempt {
            message: key.to_owned().into(),
            context: Some("Object keys must be relative and must not contain '..'".into()),
        });
    }
    Ok(key.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("S3".parse::<StorageKind>().unwrap(), StorageKind::S3);
        assert_eq!("".parse::<StorageKind>().unwrap(), StorageKind::Local);
        assert!(matches!(
            "ftp".parse::<StorageKind>(),
            Err(StorageError::UnknownBackend { ref name }) if name == "ftp"
        ));
    }

    #[test]
    fn object_keys_stay_relative() {
        assert_eq!(object_key(Path::new("./docs/a.pdf")).unwrap(), "docs/a.pdf");
        assert!(object_key(Path::new("../a.pdf")).is_err());
        assert!(object_key(Path::new("/a.pdf")).is_err());
    }
}

use crate::constants::DEFAULT_APP_VERSION;
use crate::features::FeatureSet;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Deployment environment the process runs in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
    Test,
}

impl Environment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat settings record. Field names match the lowercased environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsInner {
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub debug: bool,

    pub api_v1_prefix: String,
    /// Bind address: an IP literal or a hostname resolved when the server binds.
    pub host: String,
    pub port: u16,

    #[serde(deserialize_with = "list")]
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    #[serde(deserialize_with = "list")]
    pub cors_allow_methods: Vec<String>,
    #[serde(deserialize_with = "list")]
    pub cors_allow_headers: Vec<String>,

    pub enable_db_postgres: bool,
    pub enable_db_mongo: bool,
    pub enable_ocr: bool,
    pub enable_storage: bool,

    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    #[serde(deserialize_with = "optional")]
    pub postgres_password: Option<String>,
    pub postgres_db: String,
    #[serde(deserialize_with = "optional")]
    pub postgres_url: Option<String>,

    pub mongo_host: String,
    pub mongo_port: u16,
    #[serde(deserialize_with = "optional")]
    pub mongo_user: Option<String>,
    #[serde(deserialize_with = "optional")]
    pub mongo_password: Option<String>,
    pub mongo_db: String,
    #[serde(deserialize_with = "optional")]
    pub mongo_url: Option<String>,

    pub ocr_provider: String,
    #[serde(deserialize_with = "optional")]
    pub ocr_api_key: Option<String>,

    pub storage_type: String,
    pub storage_path: PathBuf,
    #[serde(deserialize_with = "optional")]
    pub aws_access_key_id: Option<String>,
    #[serde(deserialize_with = "optional")]
    pub aws_secret_access_key: Option<String>,
    pub aws_region: String,
    #[serde(deserialize_with = "optional")]
    pub aws_s3_bucket: Option<String>,
    #[serde(deserialize_with = "optional")]
    pub gcs_bucket: Option<String>,

    pub log_level: String,
    #[serde(deserialize_with = "optional")]
    pub log_dir: Option<String>,
}

impl SettingsInner {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Optional subsystems switched on by the `ENABLE_*` flags.
    #[must_use]
    pub fn features(&self) -> FeatureSet {
        let mut set = FeatureSet::empty();
        set.set(FeatureSet::POSTGRES, self.enable_db_postgres);
        set.set(FeatureSet::MONGO, self.enable_db_mongo);
        set.set(FeatureSet::OCR, self.enable_ocr);
        set.set(FeatureSet::STORAGE, self.enable_storage);
        set
    }

    #[must_use]
    pub fn is_enabled(&self, feature: FeatureSet) -> bool {
        !feature.is_empty() && self.features().contains(feature)
    }
}

impl Default for SettingsInner {
    fn default() -> Self {
        Self {
            app_name: "Keel".to_owned(),
            app_version: DEFAULT_APP_VERSION.to_owned(),
            environment: Environment::default(),
            debug: false,
            api_v1_prefix: "/api/v1".to_owned(),
            host: "0.0.0.0".to_owned(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_owned(),
                "http://localhost:8080".to_owned(),
            ],
            cors_allow_credentials: true,
            cors_allow_methods: vec!["*".to_owned()],
            cors_allow_headers: vec!["*".to_owned()],
            enable_db_postgres: false,
            enable_db_mongo: false,
            enable_ocr: false,
            enable_storage: false,
            postgres_host: "localhost".to_owned(),
            postgres_port: 5432,
            postgres_user: "postgres".to_owned(),
            postgres_password: None,
            postgres_db: "keel_db".to_owned(),
            postgres_url: None,
            mongo_host: "localhost".to_owned(),
            mongo_port: 27017,
            mongo_user: None,
            mongo_password: None,
            mongo_db: "keel_db".to_owned(),
            mongo_url: None,
            ocr_provider: "tesseract".to_owned(),
            ocr_api_key: None,
            storage_type: "local".to_owned(),
            storage_path: PathBuf::from("./storage"),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_region: "us-east-1".to_owned(),
            aws_s3_bucket: None,
            gcs_bucket: None,
            log_level: "info".to_owned(),
            log_dir: None,
        }
    }
}

/// Thin Arc-wrapped settings for inexpensive cloning into subsystems.
///
/// Settings are immutable once loaded; build a new [`SettingsInner`] to change them.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "SettingsInner")]
pub struct Settings {
    inner: Arc<SettingsInner>,
}

impl Settings {
    #[must_use]
    pub fn new(inner: SettingsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl From<SettingsInner> for Settings {
    fn from(inner: SettingsInner) -> Self {
        Self::new(inner)
    }
}

impl Deref for Settings {
    type Target = SettingsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Accepts either a sequence or a comma-separated string (`"a, b,,c"` -> `[a, b, c]`).
fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list or a comma-separated string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                let item = item.trim();
                if !item.is_empty() {
                    out.push(item.to_owned());
                }
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(ListVisitor)
}

/// Blank values count as unset so that `POSTGRES_URL=` in a `.env` file falls back.
fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

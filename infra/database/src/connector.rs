use crate::error::DatabaseError;
use crate::connection_url::ConnectionUrl;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

/// Database backends with a placeholder connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseKind {
    Postgres,
    Mongo,
}

impl DatabaseKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::Mongo => "MongoDB",
        }
    }

    const fn scheme(self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::Mongo => "mongodb",
        }
    }

    const fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::Mongo => 27017,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct DatabaseInner {
    kind: DatabaseKind,
    url: ConnectionUrl,
    host: String,
    port: u16,
    database: String,
    closed: AtomicBool,
}

impl DatabaseInner {
    #[must_use]
    pub const fn kind(&self) -> DatabaseKind {
        self.kind
    }

    #[must_use]
    pub const fn url(&self) -> &ConnectionUrl {
        &self.url
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Handle to a placeholder database connection.
///
/// No traffic reaches a real server: `connect` resolves the connection string and
/// `close` only flips the lifecycle state. Clones share that state.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Deref for Database {
    type Target = DatabaseInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Database {
    /// Builder preloaded with the PostgreSQL defaults (`localhost:5432`, user `postgres`).
    pub fn postgres() -> DatabaseBuilder {
        DatabaseBuilder::new(DatabaseKind::Postgres).user("postgres")
    }

    /// Builder preloaded with the MongoDB defaults (`localhost:27017`, no credentials).
    pub fn mongo() -> DatabaseBuilder {
        DatabaseBuilder::new(DatabaseKind::Mongo)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }

    /// Fails with [`DatabaseError::NotInitialized`] once the handle is closed.
    pub fn ensure_connected(&self) -> Result<&ConnectionUrl, DatabaseError> {
        if self.is_connected() {
            Ok(&self.url)
        } else {
            Err(DatabaseError::NotInitialized { backend: self.kind.label(), context: None })
        }
    }

    /// Closes the connection. Returns `false` when it was already closed.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        info!(backend = %self.kind, host = %self.host, "Database connection closed");
        true
    }
}

/// Fluent builder for a [`Database`] handle.
///
/// An explicit [`DatabaseBuilder::url`] wins over the individual parts.
#[must_use = "builders do nothing unless you call .connect()"]
#[derive(Debug)]
pub struct DatabaseBuilder {
    kind: DatabaseKind,
    url: Option<String>,
    host: String,
    port: u16,
    user: Option<String>,
    password: Option<String>,
    database: String,
}

impl DatabaseBuilder {
    fn new(kind: DatabaseKind) -> Self {
        Self {
            kind,
            url: None,
            host: "localhost".to_owned(),
            port: kind.default_port(),
            user: None,
            password: None,
            database: "keel_db".to_owned(),
        }
    }

    /// Uses a complete connection string instead of building one.
    pub fn url(mut self, url: Option<impl Into<String>>) -> Self {
        self.url = url.map(Into::into).filter(|u: &String| !u.trim().is_empty());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into()).filter(|u| !u.is_empty());
        self
    }

    /// Sets the user and password, dropping blank values.
    pub fn credentials(mut self, user: Option<String>, password: Option<String>) -> Self {
        self.user = user.filter(|u| !u.is_empty());
        self.password = password.filter(|p| !p.is_empty());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Resolves the connection string without connecting.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Validation`] when the host or database name is blank.
    pub fn connection_url(&self) -> Result<ConnectionUrl, DatabaseError> {
        if let Some(url) = &self.url {
            return Ok(ConnectionUrl::new(url.clone()));
        }
        if self.host.trim().is_empty() {
            return Err(DatabaseError::Validation {
                message: "Host is required".into(),
                context: Some(self.kind.label().into()),
            });
        }
        if self.database.trim().is_empty() {
            return Err(DatabaseError::Validation {
                message: "Database name is required".into(),
                context: Some(self.kind.label().into()),
            });
        }

        let (user, password) = match (self.kind, &self.user, &self.password) {
            (_, Some(user), Some(password)) => (Some(user.as_str()), Some(password.as_str())),
            (DatabaseKind::Postgres, Some(user), None) => (Some(user.as_str()), None),
            _ => (None, None),
        };
        ConnectionUrl::from_parts(
            self.kind.scheme(),
            user,
            password,
            &self.host,
            self.port,
            &self.database,
        )
    }

    /// Produces a connected handle.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Validation`] when the connection parameters are incomplete.
    #[instrument(skip(self), fields(backend = %self.kind, host = %self.host, port = self.port))]
    pub async fn connect(self) -> Result<Database, DatabaseError> {
        let url = self.connection_url()?;

        info!(database = %self.database, "Connecting to {}", self.kind);
        warn!("{} connector is a placeholder; no queries will be executed", self.kind);

        Ok(Database {
            inner: Arc::new(DatabaseInner {
                kind: self.kind,
                url,
                host: self.host,
                port: self.port,
                database: self.database,
                closed: AtomicBool::new(false),
            }),
        })
    }
}

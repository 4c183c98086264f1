use keel_storage::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();

    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(storage.resolve("../etc/passwd").is_err());
    assert!(storage.resolve("foo/../../bar").is_err());
    assert!(storage.resolve("/etc/passwd").is_err());
}

#[tokio::test]
async fn test_write_read_roundtrip() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let saved = storage.write("foo/bar.bin", b"hello world").await.unwrap();
    assert!(saved.is_absolute());
    assert!(saved.starts_with(storage.root()));
    assert!(storage.exists("foo/bar.bin").unwrap());
    assert_eq!(storage.read("foo/bar.bin").await.unwrap(), b"hello world");

    storage.write("foo/bar.bin", b"replaced").await.unwrap();
    assert_eq!(storage.read("foo/bar.bin").await.unwrap(), b"replaced");
}

#[tokio::test]
async fn test_delete_and_exists() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    storage.write("tmp/file.txt", b"x").await.unwrap();
    storage.delete("tmp/file.txt").await.unwrap();
    assert!(!storage.exists("tmp/file.txt").unwrap());

    let err = storage.delete("tmp/file.txt").await.unwrap_err();
    assert!(matches!(err, StorageError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_read_missing_returns_file_not_found() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let err = storage.read("missing.bin").await.expect_err("expected error");
    match err {
        StorageError::FileNotFound { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_root_without_create_fails() {
    let temp = TempDir::new().unwrap();
    let err = Storage::builder()
        .root(temp.path().join("absent"))
        .create(false)
        .connect()
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escape_blocked() {
    let outside = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    std::os::unix::fs::symlink(outside.path(), storage.root().join("link")).unwrap();
    let err = storage.write("link/evil.txt", b"x").await.unwrap_err();
    assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
}

#[tokio::test]
async fn test_local_service_creates_root_and_saves() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("storage");
    let options = StorageOptions { path: root.clone(), ..StorageOptions::default() };

    let service = StorageService::init(options).await.unwrap();
    assert_eq!(service.kind(), StorageKind::Local);
    assert!(root.is_dir());

    let location = service.save("docs/readme.txt", b"content").await.unwrap();
    assert!(location.ends_with("readme.txt"));
    assert_eq!(std::fs::read(&location).unwrap(), b"content");

    assert!(service.save("../escape.txt", b"x").await.is_err());
}

#[tokio::test]
async fn test_s3_requires_bucket() {
    let options = StorageOptions { kind: StorageKind::S3, ..StorageOptions::default() };
    let err = StorageService::init(options).await.unwrap_err();
    assert!(err.to_string().contains("AWS_S3_BUCKET must be set for S3 storage"));
}

#[tokio::test]
async fn test_remote_backends_report_object_urls() {
    let s3 = StorageService::init(StorageOptions {
        kind: StorageKind::S3,
        s3_bucket: Some("media".to_owned()),
        ..StorageOptions::default()
    })
    .await
    .unwrap();
    assert_eq!(s3.save("img/a.png", b"x").await.unwrap(), "s3://media/img/a.png");
    assert!(s3.local().is_none());

    let gcs = StorageService::init(StorageOptions {
        kind: StorageKind::Gcs,
        gcs_bucket: Some("assets".to_owned()),
        ..StorageOptions::default()
    })
    .await
    .unwrap();
    assert_eq!(gcs.save("b.txt", b"x").await.unwrap(), "gs://assets/b.txt");
}

#[tokio::test]
async fn test_gcs_requires_bucket() {
    let options = StorageOptions { kind: StorageKind::Gcs, ..StorageOptions::default() };
    assert!(matches!(
        StorageService::init(options).await,
        Err(StorageError::InvalidConfiguration { .. })
    ));
}

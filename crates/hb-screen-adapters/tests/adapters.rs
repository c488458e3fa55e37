//! Integration tests for image loading and the model store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use hb_screen_adapters::models::MODELS;
use hb_screen_adapters::{sha256_hex, FsImageSource, ModelStore};
use hb_screen_core::{ImageSource, RawImage};
use hb_screen_test_support::SyntheticImageBuilder;

#[test]
fn test_load_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palm.png");
    SyntheticImageBuilder::pink_palm(8, 8).image.save(&path).unwrap();

    let source = FsImageSource::new(Some(path));
    let upload = source.upload().unwrap().expect("should have upload");
    assert!(upload.source.ends_with("palm.png"));

    let raw = RawImage::decode(&upload).expect("should decode PNG");
    assert_eq!((raw.width, raw.height), (8, 8));
}

#[test]
fn test_load_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palm.jpg");
    SyntheticImageBuilder::pale_palm(16, 12).image.save(&path).unwrap();

    let upload = FsImageSource::new(Some(path)).upload().unwrap().unwrap();
    let raw = RawImage::decode(&upload).expect("should decode JPEG");
    assert_eq!((raw.width, raw.height), (16, 12));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsImageSource::new(Some(dir.path().join("absent.jpg")));
    let err = source.upload().unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read image"));
}

#[test]
fn test_corrupt_file_reads_but_fails_decode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not really a png").unwrap();

    let upload = FsImageSource::new(Some(path)).upload().unwrap().unwrap();
    assert!(RawImage::decode(&upload).is_err());
}

#[test]
fn test_install_model() {
    let src_dir = tempfile::tempdir().unwrap();
    let src = src_dir.path().join("trained.safetensors");
    std::fs::write(&src, b"weights").unwrap();

    let store_dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new(store_dir.path().join("models"));
    assert!(store.list().iter().all(|(_, installed)| !installed));

    let (path, digest) = store.install(&src, None).unwrap();
    assert_eq!(path, store.regressor_path());
    assert_eq!(std::fs::read(&path).unwrap(), b"weights");
    assert_eq!(digest, sha256_hex(b"weights"));
    assert_eq!(store.list().len(), MODELS.len());
    assert!(store.list().iter().all(|(_, installed)| *installed));
}

#[test]
fn test_install_verifies_checksum() {
    let src_dir = tempfile::tempdir().unwrap();
    let src = src_dir.path().join("trained.safetensors");
    std::fs::write(&src, b"weights").unwrap();

    let store = ModelStore::new(src_dir.path().join("models"));
    let err = store.install(&src, Some(&"0".repeat(64))).unwrap_err();
    assert!(err.to_string().contains("Checksum mismatch"));
    assert!(!store.regressor_path().exists());

    let good = sha256_hex(b"weights").to_uppercase();
    assert!(store.install(&src, Some(&good)).is_ok());
}

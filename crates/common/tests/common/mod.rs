//! Shared test utilities for bundle integration tests
#![allow(dead_code)]

use common::bundle::{FileBundleStore, KeyBundle};
use common::keyring::KeyRing;
use tempfile::TempDir;

/// A file-backed store in a fresh temp directory
pub fn setup_store() -> (FileBundleStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileBundleStore::new(temp_dir.path().join("keys.json"));
    (store, temp_dir)
}

/// Create, persist and reopen a bundle for `domain`
pub fn setup_ring(domain: &str) -> (KeyRing, FileBundleStore, TempDir) {
    let (store, temp_dir) = setup_store();
    KeyBundle::create(domain, &store).unwrap();
    let ring = KeyRing::open(&store).unwrap();
    (ring, store, temp_dir)
}

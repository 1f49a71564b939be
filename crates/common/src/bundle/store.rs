use super::BundleError;

/// Opaque holder for the serialized key bundle
///
/// A store holds at most one bundle. It is written once and only read
///  afterwards; overwriting an existing bundle is never allowed.
pub trait BundleStore: std::fmt::Debug {
    type Error;

    /// Whether a bundle has already been written
    fn exists(&self) -> Result<bool, BundleError<Self::Error>>;

    /// Read the serialized bundle
    ///
    /// # Returns
    /// * `Ok(Some(contents))` - The stored bundle
    /// * `Ok(None)` - Nothing has been written yet
    fn read(&self) -> Result<Option<String>, BundleError<Self::Error>>;

    /// Write a bundle into an empty store
    ///
    /// Should fail with `Err(BundleError::AlreadyExists)` if the store is
    ///  already populated.
    fn write_new(&self, contents: &str) -> Result<(), BundleError<Self::Error>>;
}

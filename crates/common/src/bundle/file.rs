use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::store::BundleStore;
use super::BundleError;

/// Bundle stored as a JSON file on disk
///
/// The file is created with `create_new` (and mode `0600` on unix), so a
///  concurrent writer that loses the race gets an I/O error instead of
///  silently replacing the keys.
#[derive(Debug, Clone)]
pub struct FileBundleStore {
    path: PathBuf,
}

#[derive(thiserror::Error, Debug)]
pub enum FileBundleStoreError {
    #[error("bundle file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileBundleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> BundleError<FileBundleStoreError> {
        BundleError::Store(FileBundleStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl BundleStore for FileBundleStore {
    type Error = FileBundleStoreError;

    fn exists(&self) -> Result<bool, BundleError<Self::Error>> {
        self.path.try_exists().map_err(|e| self.io_error(e))
    }

    fn read(&self) -> Result<Option<String>, BundleError<Self::Error>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_new(&self, contents: &str) -> Result<(), BundleError<Self::Error>> {
        if self.exists()? {
            return Err(BundleError::AlreadyExists);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.io_error(e))
    }
}

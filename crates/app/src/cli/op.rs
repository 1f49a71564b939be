use std::error::Error;
use std::path::PathBuf;

use common::bundle::{BundleError, FileBundleStore, FileBundleStoreError};
use common::keyring::KeyRing;

pub const APP_DIR_NAME: &str = ".sigil";
pub const BUNDLE_FILE_NAME: &str = "keys.json";

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// Resolve the bundle path.
///
/// Priority: explicit `--bundle` flag (or `SIGIL_BUNDLE`) > `~/.sigil/keys.json`.
pub fn resolve_bundle_path(explicit: Option<PathBuf>) -> Result<PathBuf, ContextError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let home = dirs::home_dir().ok_or(ContextError::NoHomeDirectory)?;
    Ok(home.join(APP_DIR_NAME).join(BUNDLE_FILE_NAME))
}

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Where the key bundle lives
    pub bundle_path: PathBuf,
}

impl OpContext {
    pub fn new(bundle: Option<PathBuf>) -> Result<Self, ContextError> {
        Ok(Self {
            bundle_path: resolve_bundle_path(bundle)?,
        })
    }

    pub fn store(&self) -> FileBundleStore {
        FileBundleStore::new(&self.bundle_path)
    }

    /// Load and apply the bundle
    pub fn key_ring(&self) -> Result<KeyRing, BundleError<FileBundleStoreError>> {
        KeyRing::open(&self.store())
    }
}

pub trait Op {
    type Error: Error + Send + Sync + 'static;
    type Output;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx)
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

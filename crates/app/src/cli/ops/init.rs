use clap::Args;
use rand_core::OsRng;

use common::bundle::{BundleError, FileBundleStoreError, KeyBundle};
use common::crypto::{KeyError, SymmetricKey};
use common::keyring::KeyRing;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Domain the new keys belong to (e.g. acme.io)
    pub domain: String,

    /// Also generate an AES-256 key for encrypting data at rest
    #[arg(long)]
    pub with_secret: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("invalid domain: must not be empty")]
    EmptyDomain,
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
    #[error("failed to generate keys: {0}")]
    Key(#[from] KeyError),
}

impl Op for Init {
    type Error = InitError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let domain = self.domain.trim();
        if domain.is_empty() {
            return Err(InitError::EmptyDomain);
        }

        let store = ctx.store();
        if self.with_secret {
            let secret = SymmetricKey::generate(&mut OsRng)?;
            KeyBundle::generate(domain, &mut OsRng)?
                .with_secret_key(&secret)
                .persist(&store)?;
        } else {
            KeyBundle::create(domain, &store)?;
        }

        let ring = KeyRing::open(&store)?;
        Ok(format!(
            "Initialized keys for {} at {}\n  address: {}",
            ring.domain(),
            ctx.bundle_path.display(),
            ring.address()
        ))
    }
}

pub mod address;
pub mod decrypt;
pub mod encrypt;
pub mod init;
pub mod key;
pub mod show;
pub mod sign;
pub mod verify;
pub mod version;

pub use address::Address;
pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use init::Init;
pub use key::Key;
pub use show::Show;
pub use sign::Sign;
pub use verify::Verify;
pub use version::Version;

pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Address, Decrypt, Encrypt, Init, Key, Show, Sign, Verify, Version};

//! Admin credential hashing.

pub mod password;

pub use password::{PasswordError, PasswordManager};

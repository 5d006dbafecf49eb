//! Secret store adapters
//!
//! References are opaque to the core; each adapter decides what they name.

pub mod env;
pub mod keyring;

pub use env::EnvSecretStore;
pub use self::keyring::KeyringSecretStore;

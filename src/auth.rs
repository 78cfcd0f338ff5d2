//! Credential models: redacted secrets, ES256 client assertions, and token grants.

pub mod assertion;
pub mod grant;
pub mod secret;

pub use assertion::*;
pub use grant::*;
pub use secret::*;

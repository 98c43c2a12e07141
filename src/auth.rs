//! Consumer/access credentials and the redacting secret wrapper they rely on.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;

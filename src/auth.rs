//! Credential handling and the `FX-ACCESS-*` request-signing scheme.

pub mod clock;
pub mod credential;
pub mod signer;

pub use clock::*;
pub use credential::*;
pub use signer::*;

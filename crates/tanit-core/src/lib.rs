//! Tanit Core
//!
//! Primitives shared by the wallet crates: the error type, the `Signer`
//! seam, SHA-256 / base64url helpers and the ES256 key pair.

pub mod crypto;
pub mod error;
pub mod keys;
pub mod traits;
pub mod types;

pub use crypto::*;
pub use error::*;
pub use keys::{verify_with_jwk, Es256KeyPair};
pub use traits::*;
pub use types::*;

//! # CLI Module
//!
//! Entry points called by the binary. There is a single operation, the
//! update run, which chains the other modules:
//!
//! ```text
//! CredentialStore → spotify::auth → spotify::stats → render
//! ```
//!
//! Each run is independent and fully rewrites the output file. Running two
//! updates at the same time is not supported, they race on the credential
//! cache.

mod update;

pub use update::update;

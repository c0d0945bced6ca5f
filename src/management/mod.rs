mod credentials;

pub use credentials::CacheError;
pub use credentials::CredentialStore;

pub mod credentials;
pub mod hasher;

pub use credentials::CredentialService;

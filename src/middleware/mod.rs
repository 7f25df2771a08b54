pub mod credentials;

pub use credentials::RequiredCredentials;

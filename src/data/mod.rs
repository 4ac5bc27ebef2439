//! Remote data access.

pub mod remote;

pub use remote::RemoteClient;

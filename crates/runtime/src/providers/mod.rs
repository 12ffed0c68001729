//! Character provider implementations and the retry policy applied to them.

pub mod catalog;
pub mod remote;
pub mod retry;

pub use catalog::CatalogProvider;
pub use remote::RemoteCatalogProvider;
pub use retry::RetryPolicy;

//! Currency passthrough: a static exchange-rate feed and an HTTP client that
//! republishes it.

pub mod domain;
pub mod errors;
pub mod provider;
pub mod client;
pub mod store;

pub use client::HttpCurrencyClient;
pub use provider::CurrencyProvider;
pub use store::StaticCurrencyStore;

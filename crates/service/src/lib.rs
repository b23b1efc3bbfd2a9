//! Service layer for the customer hub.
//! - Customer workflows on top of the `models` crate, behind a repository trait.
//! - Currency passthrough: a static feed and an HTTP client for it.

pub mod customer;
pub mod currency;
#[cfg(test)]
pub mod test_support;

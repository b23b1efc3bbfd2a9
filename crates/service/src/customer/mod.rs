//! Customer module: three-layer architecture (domain, repository, service).
//!
//! The HTTP adapter in the server crate only talks to [`CustomerService`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CustomerService;

//! Cross-cutting helpers shared by the binaries and the server crate.

pub mod types;
pub mod env;

pub mod utils {
    pub mod logging;
}

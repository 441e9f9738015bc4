//! Top-level facade crate for promhello.
//!
//! Re-exports the metrics core and the server library so users can depend on a single crate.

pub mod core {
    pub use promhello_core::*;
}

pub mod server {
    pub use promhello_server::*;
}

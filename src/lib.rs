//! Polychora - 4D polytope graph builder
//!
//! Library surface of the `polychora` binary; the construction pipeline
//! itself lives in `polychora_core`.

pub mod config;

//! Coset enumeration and polytope graph construction
//!
//! Builds the vertex/edge/face graph of a 4D polytope (or a quotient of
//! one) from a rank-4 Coxeter presentation. The pipeline:
//!
//! 1. [`relations::coxeter_relators`] expands the Coxeter matrix into
//!    relator words.
//! 2. [`Group::enumerate`] runs Todd-Coxeter coset enumeration and
//!    produces the full multiplication table.
//! 3. [`PolytopeGraph::build`] decomposes the group into vertex cosets,
//!    wires up edges and face rings, and embeds everything on the unit
//!    3-sphere.
//!
//! Polytopes are selected through [`PolytopeSpec`], either from a named
//! [`Preset`], a packed selection code, or a RON definition file.

pub mod embedding;
pub mod graph;
pub mod group;
pub mod polytope;
pub mod relations;
pub mod words;

pub use embedding::{build_embedding, Embedding};
pub use graph::PolytopeGraph;
pub use group::{Group, GroupError};
pub use polytope::{
    weights_from_digits, Preset, PolytopeSpec, SpecError, DEFAULT_EDGES, DEFAULT_FACES,
    DEFAULT_WEIGHTS,
};
pub use words::{word_from_digits, word_from_str, Ring, Word, WordError, RANK};

pub use polychora_math::{Mat4, Vec4};

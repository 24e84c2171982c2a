//! Implicit Freudenthal (Kuhn) triangulation of regular integer lattices.
//!
//! The unit n-cube is subdivided into $n!$ simplices once; every lower
//! dimensional simplex shape that can occur in the lattice is catalogued as a
//! canonical "type" anchored at the near corner of its cube. A simplex
//! instance is then just a `(dim, type, corner)` triple and never has to be
//! materialized: face/coface neighbors come from precomputed per-type tables
//! translated by the instance's corner.

extern crate nalgebra as na;

pub mod combo;
pub mod element;
pub mod grid;
pub mod mesh;
pub mod simplex;
pub mod tables;

pub use element::{ElementHandle, ElementId, Elements};
pub use grid::LatticeGrid;
pub use mesh::RegularSimplexMesh;
pub use simplex::UnitSimplex;

pub type Dim = usize;

/// Index of a simplex type within one dimension's catalogue.
pub type TypeIdx = usize;

/// An integer lattice vector: vertex coordinates, cell corners and
/// inter-cube offsets all live on the same lattice.
pub type LatticeCoord = Vec<i32>;

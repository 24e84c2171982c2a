use crate::{
  element::{ElementHandle, ElementId, Elements},
  simplex::UnitSimplex,
  tables::SubdivisionTables,
  Dim, LatticeCoord, TypeIdx,
};

use tracing::debug;

/// A bounded regular lattice carrying the implicit Freudenthal triangulation.
///
/// All combinatorial work happens once at construction: the type catalogues
/// and the face/coface tables of [`SubdivisionTables`] depend only on the
/// lattice dimension. The inclusive bounds `lb`/`ub` select which simplex
/// instances count as valid and are the only mutable state; changing them
/// never rebuilds any table.
#[derive(Debug, Clone)]
pub struct RegularSimplexMesh {
  nd: Dim,
  lb: LatticeCoord,
  ub: LatticeCoord,
  tables: SubdivisionTables,
}

/// constructors
impl RegularSimplexMesh {
  /// Builds the mesh for an `nd`-dimensional lattice. Panics for `nd == 0`.
  ///
  /// Bounds default to the zero-extent box at the origin; set them with
  /// [`Self::set_lb`]/[`Self::set_ub`] before iterating.
  pub fn new(nd: Dim) -> Self {
    assert!(nd >= 1, "lattice dimension must be at least 1");
    let tables = SubdivisionTables::build(nd);
    debug!("built subdivision tables for nd={}", nd);
    Self {
      nd,
      lb: vec![0; nd],
      ub: vec![0; nd],
      tables,
    }
  }

  pub fn new_with_bounds(nd: Dim, lb: &[i32], ub: &[i32]) -> Self {
    let mut mesh = Self::new(nd);
    mesh.set_lb(lb);
    mesh.set_ub(ub);
    mesh
  }
}

/// getters
impl RegularSimplexMesh {
  pub fn nd(&self) -> Dim {
    self.nd
  }
  pub fn ntypes(&self, dim: Dim) -> usize {
    self.tables.ntypes(dim)
  }
  /// The canonical 0/1 vertex pattern of a simplex type.
  pub fn unit_simplex(&self, dim: Dim, typ: TypeIdx) -> &UnitSimplex {
    self.tables.unit_simplex(dim, typ)
  }
  pub fn tables(&self) -> &SubdivisionTables {
    &self.tables
  }

  pub fn lb(&self) -> &[i32] {
    &self.lb
  }
  pub fn ub(&self) -> &[i32] {
    &self.ub
  }
  pub fn lb_at(&self, axis: usize) -> i32 {
    self.lb[axis]
  }
  pub fn ub_at(&self, axis: usize) -> i32 {
    self.ub[axis]
  }
}

/// bounds
impl RegularSimplexMesh {
  /// Sets the inclusive lower bound per axis.
  ///
  /// Copies `min(nd, values.len())` leading entries; any remaining axes keep
  /// their previous bound. A length mismatch is applied partially, never
  /// rejected.
  pub fn set_lb(&mut self, values: &[i32]) {
    let ncopy = self.nd.min(values.len());
    self.lb[..ncopy].copy_from_slice(&values[..ncopy]);
  }

  /// Sets the inclusive upper bound per axis, with the same partial-apply
  /// semantics as [`Self::set_lb`].
  pub fn set_ub(&mut self, values: &[i32]) {
    let ncopy = self.nd.min(values.len());
    self.ub[..ncopy].copy_from_slice(&values[..ncopy]);
  }
}

/// element access
impl RegularSimplexMesh {
  /// Iterates every (corner, type) pair of dimension `dim` within the
  /// bounds. Invalid boundary elements are included; see
  /// [`ElementHandle::valid`].
  pub fn elements(&self, dim: Dim) -> Elements<'_> {
    Elements::new(self, dim)
  }

  /// The number of valid elements of dimension `dim` under the current
  /// bounds.
  pub fn nelements(&self, dim: Dim) -> usize {
    self.elements(dim).filter(|e| e.valid()).count()
  }

  pub fn element(&self, dim: Dim, typ: TypeIdx, corner: LatticeCoord) -> ElementHandle<'_> {
    ElementId::new(dim, typ, corner).handle(self)
  }
}

#[cfg(test)]
mod test {
  use super::RegularSimplexMesh;

  #[test]
  fn bounds_apply_partially() {
    let mut mesh = RegularSimplexMesh::new(3);
    mesh.set_ub(&[4, 5, 6]);
    assert_eq!(mesh.ub(), &[4, 5, 6]);

    // Too short: trailing axes keep their value.
    mesh.set_ub(&[7]);
    assert_eq!(mesh.ub(), &[7, 5, 6]);

    // Too long: excess entries are ignored.
    mesh.set_lb(&[1, 2, 3, 4]);
    assert_eq!(mesh.lb(), &[1, 2, 3]);
  }

  #[test]
  fn square_element_counts() {
    let mesh = RegularSimplexMesh::new_with_bounds(2, &[0, 0], &[1, 1]);
    // A single lattice square: 4 vertices, 5 edges (2 horizontal,
    // 2 vertical, 1 diagonal), 2 triangles.
    assert_eq!(mesh.nelements(0), 4);
    assert_eq!(mesh.nelements(1), 5);
    assert_eq!(mesh.nelements(2), 2);
  }

  #[test]
  fn zero_extent_defaults() {
    let mesh = RegularSimplexMesh::new(2);
    // Only the single vertex at the origin fits in the zero-extent box.
    assert_eq!(mesh.nelements(0), 1);
    assert_eq!(mesh.nelements(1), 0);
    assert_eq!(mesh.nelements(2), 0);
  }

  #[test]
  #[should_panic]
  fn zero_dimension_rejected() {
    let _ = RegularSimplexMesh::new(0);
  }
}

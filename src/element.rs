use crate::{mesh::RegularSimplexMesh, Dim, LatticeCoord, TypeIdx};

use std::cmp::Ordering;
use std::fmt;

/// Plain identifier of one simplex instance in the lattice: its dimension,
/// its catalogue type and the corner of the cube it is anchored in.
///
/// Carries no mesh reference, so it is the right key for external
/// bookkeeping (e.g. a `BTreeSet` visited set during mesh traversal). Turn
/// it into an [`ElementHandle`] to query geometry or adjacency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId {
  pub dim: Dim,
  pub typ: TypeIdx,
  pub corner: LatticeCoord,
}

impl ElementId {
  pub fn new(dim: Dim, typ: TypeIdx, corner: LatticeCoord) -> Self {
    Self { dim, typ, corner }
  }

  pub fn handle(self, mesh: &RegularSimplexMesh) -> ElementHandle<'_> {
    ElementHandle::new(mesh, self)
  }
}

/// Ordered by corner (lexicographically), then type. The dimension is a last
/// tiebreaker so that the order stays total and consistent with [`Eq`] when
/// ids of different dimensions end up in one collection.
impl Ord for ElementId {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .corner
      .cmp(&other.corner)
      .then(self.typ.cmp(&other.typ))
      .then(self.dim.cmp(&other.dim))
  }
}
impl PartialOrd for ElementId {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// A simplex instance bound to its mesh.
///
/// The handle borrows the mesh for table lookups and cannot outlive it.
/// Handles are cheap values; adjacency queries ([`Self::sides`],
/// [`Self::side_of`]) are pure table lookups translated by the corner.
#[derive(Clone)]
pub struct ElementHandle<'m> {
  mesh: &'m RegularSimplexMesh,
  id: ElementId,
}

impl<'m> ElementHandle<'m> {
  /// Panics if the id's dimension, type or corner length do not fit the
  /// mesh. A corner outside the mesh bounds is fine and merely makes the
  /// element invalid.
  pub fn new(mesh: &'m RegularSimplexMesh, id: ElementId) -> Self {
    assert!(id.dim <= mesh.nd(), "element dimension exceeds mesh dimension");
    assert!(
      id.typ < mesh.ntypes(id.dim),
      "element type out of range for its dimension"
    );
    assert_eq!(id.corner.len(), mesh.nd(), "corner length must match mesh dimension");
    Self { mesh, id }
  }

  pub fn mesh(&self) -> &'m RegularSimplexMesh {
    self.mesh
  }
  pub fn id(&self) -> &ElementId {
    &self.id
  }
  pub fn into_id(self) -> ElementId {
    self.id
  }
  pub fn dim(&self) -> Dim {
    self.id.dim
  }
  pub fn typ(&self) -> TypeIdx {
    self.id.typ
  }
  pub fn corner(&self) -> &[i32] {
    &self.id.corner
  }

  /// The element's lattice vertices: the canonical pattern of its type
  /// translated by its corner. Always exactly `dim + 1` vertices.
  pub fn vertices(&self) -> Vec<LatticeCoord> {
    self
      .mesh
      .unit_simplex(self.id.dim, self.id.typ)
      .iter()
      .map(|v| {
        v.iter()
          .zip(&self.id.corner)
          .map(|(a, b)| a + b)
          .collect()
      })
      .collect()
  }

  /// Whether every vertex coordinate lies within the mesh bounds.
  pub fn valid(&self) -> bool {
    self.vertices().iter().all(|v| {
      v.iter()
        .enumerate()
        .all(|(axis, &c)| self.mesh.lb_at(axis) <= c && c <= self.mesh.ub_at(axis))
    })
  }

  /// The (dim-1)-simplices bounding this element. Empty for dimension 0.
  ///
  /// The results carry no validity guarantee: near the lattice boundary some
  /// of them fall outside the bounds, so check [`Self::valid`] before use.
  pub fn sides(&self) -> Vec<ElementHandle<'m>> {
    self
      .mesh
      .tables()
      .sides(self.id.dim, self.id.typ)
      .iter()
      .map(|(typ, offset)| self.translated_neighbor(self.id.dim - 1, *typ, offset))
      .collect()
  }

  /// The (dim+1)-simplices containing this element. Empty for the top
  /// dimension. No validity guarantee, as with [`Self::sides`].
  pub fn side_of(&self) -> Vec<ElementHandle<'m>> {
    self
      .mesh
      .tables()
      .side_of(self.id.dim, self.id.typ)
      .iter()
      .map(|(typ, offset)| self.translated_neighbor(self.id.dim + 1, *typ, offset))
      .collect()
  }

  fn translated_neighbor(&self, dim: Dim, typ: TypeIdx, offset: &[i32]) -> ElementHandle<'m> {
    let corner = self
      .id
      .corner
      .iter()
      .zip(offset)
      .map(|(a, b)| a + b)
      .collect();
    ElementHandle::new(self.mesh, ElementId::new(dim, typ, corner))
  }
}

impl PartialEq for ElementHandle<'_> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.mesh, other.mesh) && self.id == other.id
  }
}
impl Eq for ElementHandle<'_> {}

impl fmt::Debug for ElementHandle<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ElementHandle")
      .field("id", &self.id)
      .field("mesh", &(self.mesh as *const RegularSimplexMesh))
      .finish()
  }
}

impl fmt::Display for ElementHandle<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "dim={},corner={:?},type={},vertices={:?},valid={}",
      self.id.dim,
      self.id.corner,
      self.id.typ,
      self.vertices(),
      self.valid()
    )
  }
}

/// Iterator over every (corner, type) pair of one dimension within the mesh
/// bounds, in (corner-major, type-minor) enumeration order.
///
/// Exhaustion is a tagged state (`None`), never an out-of-range type value.
/// Elements at the far boundary are yielded even when invalid; filter with
/// [`ElementHandle::valid`] as needed.
pub struct Elements<'m> {
  mesh: &'m RegularSimplexMesh,
  dim: Dim,
  state: Option<(LatticeCoord, TypeIdx)>,
}

impl<'m> Elements<'m> {
  pub(crate) fn new(mesh: &'m RegularSimplexMesh, dim: Dim) -> Self {
    assert!(dim <= mesh.nd(), "element dimension exceeds mesh dimension");
    let degenerate = mesh.lb().iter().zip(mesh.ub()).any(|(l, u)| l > u);
    let state = (!degenerate).then(|| (mesh.lb().to_vec(), 0));
    Self { mesh, dim, state }
  }
}

impl<'m> Iterator for Elements<'m> {
  type Item = ElementHandle<'m>;

  fn next(&mut self) -> Option<Self::Item> {
    let (corner, typ) = self.state.take()?;

    if typ + 1 < self.mesh.ntypes(self.dim) {
      self.state = Some((corner.clone(), typ + 1));
    } else if corner != self.mesh.ub() {
      // Carry-increment the corner, resetting an overflowing axis to the
      // configured lower bound so that iteration never leaves the box.
      let mut next = corner.clone();
      for axis in 0..self.mesh.nd() {
        if next[axis] + 1 > self.mesh.ub_at(axis) {
          next[axis] = self.mesh.lb_at(axis);
        } else {
          next[axis] += 1;
          break;
        }
      }
      self.state = Some((next, 0));
    }

    Some(ElementHandle::new(
      self.mesh,
      ElementId::new(self.dim, typ, corner),
    ))
  }
}

#[cfg(test)]
mod test {
  use super::ElementId;
  use crate::mesh::RegularSimplexMesh;

  #[test]
  fn id_ordering() {
    let a = ElementId::new(2, 0, vec![0, 0]);
    let b = ElementId::new(2, 1, vec![0, 0]);
    let c = ElementId::new(2, 0, vec![1, 0]);
    assert!(a < b);
    assert!(b < c);
    assert!(a < c);
    assert_eq!(a, a.clone());
  }

  #[test]
  fn triangle_vertices() {
    let mesh = RegularSimplexMesh::new_with_bounds(2, &[0, 0], &[1, 1]);
    let element = ElementId::new(2, 1, vec![0, 0]).handle(&mesh);
    assert_eq!(
      element.vertices(),
      vec![vec![0, 0], vec![1, 0], vec![1, 1]]
    );
    assert!(element.valid());
  }

  #[test]
  fn validity_at_boundary() {
    let mesh = RegularSimplexMesh::new_with_bounds(2, &[0, 0], &[1, 1]);
    // Triangles anchored at the far corner stick out of the bounds.
    let element = ElementId::new(2, 0, vec![1, 1]).handle(&mesh);
    assert!(!element.valid());
  }

  #[test]
  #[should_panic]
  fn out_of_range_type() {
    let mesh = RegularSimplexMesh::new(2);
    let _ = ElementId::new(2, 2, vec![0, 0]).handle(&mesh);
  }

  #[test]
  fn segment_sides_translate_corner() {
    let mesh = RegularSimplexMesh::new_with_bounds(1, &[0], &[2]);
    let segment = ElementId::new(1, 0, vec![1]).handle(&mesh);
    let endpoints: Vec<_> = segment.sides().into_iter().map(|s| s.into_id()).collect();
    assert_eq!(
      endpoints,
      vec![ElementId::new(0, 0, vec![1]), ElementId::new(0, 0, vec![2])]
    );
  }

  #[test]
  fn vertex_side_of_contains_it() {
    let mesh = RegularSimplexMesh::new_with_bounds(2, &[0, 0], &[2, 2]);
    let vertex = ElementId::new(0, 0, vec![1, 1]).handle(&mesh);
    for parent in vertex.side_of() {
      assert!(parent.vertices().contains(&vec![1, 1]));
    }
  }
}

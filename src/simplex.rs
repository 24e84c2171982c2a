use crate::{Dim, LatticeCoord};

/// A simplex described by 0/1 vertex coordinates inside the unit n-cube.
///
/// The canonical representative of a simplex shape keeps its vertices sorted
/// lexicographically, which makes the vertex lists directly comparable
/// ([`Ord`]) and usable as catalogue keys ([`Hash`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitSimplex(Vec<LatticeCoord>);

/// constructors
impl UnitSimplex {
  pub fn new(vertices: Vec<LatticeCoord>) -> Self {
    Self(vertices)
  }
  pub fn new_sorted(mut vertices: Vec<LatticeCoord>) -> Self {
    vertices.sort();
    Self(vertices)
  }
}

impl UnitSimplex {
  pub fn nvertices(&self) -> usize {
    self.0.len()
  }
  pub fn dim(&self) -> Dim {
    self.nvertices() - 1
  }
  /// Dimension of the ambient lattice, i.e. the length of every vertex.
  pub fn ambient_dim(&self) -> Dim {
    self.0[0].len()
  }

  pub fn vertices(&self) -> &[LatticeCoord] {
    &self.0
  }
  pub fn into_vertices(self) -> Vec<LatticeCoord> {
    self.0
  }
  pub fn iter(&self) -> std::slice::Iter<'_, LatticeCoord> {
    self.0.iter()
  }

  pub fn into_sorted(mut self) -> Self {
    self.0.sort();
    self
  }

  /// Re-anchors the simplex at the near corner of its cube.
  ///
  /// Every axis on which all vertices sit at 1 is zeroed and recorded as a
  /// unit entry of the returned offset: the simplex is then encoded by the
  /// neighboring cube the offset points at. E.g. in the 2-cube the simplex
  /// {(0,1),(1,1)} becomes {(0,0),(1,0)} with offset (0,1).
  ///
  /// Reducing an already reduced simplex returns it unchanged with an
  /// all-zero offset.
  pub fn reduce(&self) -> (Self, LatticeCoord) {
    let mut vertices = self.0.clone();
    let mut offset = vec![0; self.ambient_dim()];
    for axis in 0..self.ambient_dim() {
      let all_one = vertices.iter().all(|v| v[axis] == 1);
      if all_one {
        offset[axis] = 1;
        for v in &mut vertices {
          v[axis] = 0;
        }
      }
    }
    (Self(vertices), offset)
  }
}

/// Subdivides the unit n-cube into its $n!$ Freudenthal (Kuhn) simplices.
///
/// Base case n=1 is the segment {(0),(1)}. For n>1 every (n-1)-simplex of the
/// facet subdivision is lifted once per axis by inserting a 0 coordinate at
/// that axis position, and closed off with the all-ones vertex.
pub fn subdivide_unit_cube(n: Dim) -> Vec<UnitSimplex> {
  assert!(n >= 1);
  if n == 1 {
    return vec![UnitSimplex::new(vec![vec![0], vec![1]])];
  }

  let facet_simplices = subdivide_unit_cube(n - 1);
  let mut simplices = Vec::with_capacity(n * facet_simplices.len());
  for axis in 0..n {
    for facet_simplex in &facet_simplices {
      let mut vertices: Vec<LatticeCoord> = facet_simplex
        .iter()
        .map(|v| {
          let mut v = v.clone();
          v.insert(axis, 0);
          v
        })
        .collect();
      vertices.push(vec![1; n]);
      simplices.push(UnitSimplex::new(vertices));
    }
  }
  simplices
}

#[cfg(test)]
mod test {
  use super::{subdivide_unit_cube, UnitSimplex};
  use crate::combo::factorial;

  #[test]
  fn subdivision_counts() {
    for n in 1..=4 {
      let simplices = subdivide_unit_cube(n);
      assert_eq!(simplices.len(), factorial(n));
      for simplex in &simplices {
        assert_eq!(simplex.nvertices(), n + 1);
        assert_eq!(simplex.ambient_dim(), n);
      }
    }
  }

  #[test]
  fn square_subdivision() {
    let simplices: Vec<_> = subdivide_unit_cube(2)
      .into_iter()
      .map(|s| s.into_sorted())
      .collect();
    assert_eq!(
      simplices,
      vec![
        UnitSimplex::new(vec![vec![0, 0], vec![0, 1], vec![1, 1]]),
        UnitSimplex::new(vec![vec![0, 0], vec![1, 0], vec![1, 1]]),
      ]
    );
  }

  #[test]
  fn reduce_far_edge() {
    let simplex = UnitSimplex::new(vec![vec![0, 1], vec![1, 1]]);
    let (reduced, offset) = simplex.reduce();
    assert_eq!(reduced, UnitSimplex::new(vec![vec![0, 0], vec![1, 0]]));
    assert_eq!(offset, vec![0, 1]);
  }

  #[test]
  fn reduce_is_idempotent() {
    for simplex in subdivide_unit_cube(3) {
      let (reduced, _) = simplex.reduce();
      let (rereduced, offset) = reduced.reduce();
      assert_eq!(rereduced, reduced);
      assert!(offset.iter().all(|&o| o == 0));
    }
  }
}

use crate::{
  simplex::{subdivide_unit_cube, UnitSimplex},
  Dim, LatticeCoord, TypeIdx,
};

use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::BTreeSet;
use tracing::debug;

/// A face/coface table entry: the neighbor's type together with the lattice
/// offset of the cube it is anchored in, relative to the element's corner.
pub type AdjacencyEntry = (TypeIdx, LatticeCoord);

/// The per-dimension simplex type catalogues and adjacency tables of the
/// Freudenthal subdivision of the n-cube lattice.
///
/// Everything here depends only on the lattice dimension, never on the mesh
/// bounds. All tables are built eagerly by [`SubdivisionTables::build`] and
/// immutable afterwards, so they may be shared freely across readers.
#[derive(Debug, Clone)]
pub struct SubdivisionTables {
  nd: Dim,
  /// Catalogue per dimension k=0..=n. Types are inserted in sorted order of
  /// their canonical vertex lists, so the set index is the type id.
  catalogues: Vec<IndexSet<UnitSimplex>>,
  /// `sides[k][t]`: the (k-1)-simplex instances bounding type t. Empty for k=0.
  sides: Vec<Vec<Vec<AdjacencyEntry>>>,
  /// `side_of[k][t]`: the (k+1)-simplex instances containing type t. Empty for k=n.
  side_of: Vec<Vec<Vec<AdjacencyEntry>>>,
}

impl SubdivisionTables {
  pub fn build(nd: Dim) -> Self {
    assert!(nd >= 1, "lattice dimension must be at least 1");

    // Catalogues are derived top-down: dimension k needs the types of k+1.
    let mut catalogues: Vec<IndexSet<UnitSimplex>> = Vec::with_capacity(nd + 1);
    catalogues.push(enumerate_cell_types(nd));
    for k in (0..nd).rev() {
      let parents = catalogues.last().expect("catalogue for dimension k+1");
      catalogues.push(enumerate_facet_types(parents, k));
    }
    catalogues.reverse();
    for (k, catalogue) in catalogues.iter().enumerate() {
      debug!("dim {}: {} simplex types", k, catalogue.len());
    }

    let sides = (0..=nd)
      .map(|k| {
        (0..catalogues[k].len())
          .map(|t| enumerate_sides(&catalogues, k, t))
          .collect()
      })
      .collect();
    let side_of = (0..=nd)
      .map(|k| {
        (0..catalogues[k].len())
          .map(|t| enumerate_side_of(&catalogues, nd, k, t))
          .collect()
      })
      .collect();

    Self {
      nd,
      catalogues,
      sides,
      side_of,
    }
  }

  pub fn nd(&self) -> Dim {
    self.nd
  }
  pub fn ntypes(&self, dim: Dim) -> usize {
    self.catalogues[dim].len()
  }
  /// The canonical vertex pattern of type `typ`. Panics on an out-of-range
  /// dimension or type.
  pub fn unit_simplex(&self, dim: Dim, typ: TypeIdx) -> &UnitSimplex {
    &self.catalogues[dim][typ]
  }
  pub fn sides(&self, dim: Dim, typ: TypeIdx) -> &[AdjacencyEntry] {
    &self.sides[dim][typ]
  }
  pub fn side_of(&self, dim: Dim, typ: TypeIdx) -> &[AdjacencyEntry] {
    &self.side_of[dim][typ]
  }
}

/// Types of top dimension: the cube subdivision itself, canonicalized.
fn enumerate_cell_types(nd: Dim) -> IndexSet<UnitSimplex> {
  let sorted: BTreeSet<UnitSimplex> = subdivide_unit_cube(nd)
    .into_iter()
    .map(UnitSimplex::into_sorted)
    .collect();
  sorted.into_iter().collect()
}

/// Types of dimension k from the catalogue of dimension k+1: every k-facet of
/// every (k+1)-type, re-anchored to its near cube corner and deduplicated.
fn enumerate_facet_types(parents: &IndexSet<UnitSimplex>, k: Dim) -> IndexSet<UnitSimplex> {
  let mut sorted = BTreeSet::new();
  for parent in parents {
    for facet in parent.iter().cloned().combinations(k + 1) {
      let (reduced, _) = UnitSimplex::new(facet).reduce();
      sorted.insert(reduced.into_sorted());
    }
  }
  sorted.into_iter().collect()
}

/// All (k-1)-simplex instances bounding type (k, typ), as (type, offset) pairs.
fn enumerate_sides(catalogues: &[IndexSet<UnitSimplex>], k: Dim, typ: TypeIdx) -> Vec<AdjacencyEntry> {
  if k == 0 {
    return Vec::new();
  }

  let simplex = &catalogues[k][typ];
  let mut entries = BTreeSet::new();
  for facet in simplex.iter().cloned().combinations(k) {
    let (reduced, offset) = UnitSimplex::new(facet).reduce();
    let side_type = catalogues[k - 1]
      .get_index_of(&reduced.into_sorted())
      .expect("facet type missing from catalogue");
    entries.insert((side_type, offset));
  }
  entries.into_iter().collect()
}

/// All (k+1)-simplex instances containing type (k, typ), as (type, corner)
/// pairs. Found by scanning every (k+1)-type over the corner neighborhood
/// {-1,0,1}^n for a vertex superset of the fixed k-simplex.
fn enumerate_side_of(
  catalogues: &[IndexSet<UnitSimplex>],
  nd: Dim,
  k: Dim,
  typ: TypeIdx,
) -> Vec<AdjacencyEntry> {
  if k == nd {
    return Vec::new();
  }

  let simplex = &catalogues[k][typ];
  let mut entries = BTreeSet::new();
  for (parent_type, parent) in catalogues[k + 1].iter().enumerate() {
    for corner in (0..nd).map(|_| -1..=1i32).multi_cartesian_product() {
      let translated: Vec<LatticeCoord> = parent
        .iter()
        .map(|v| v.iter().zip(&corner).map(|(a, b)| a + b).collect())
        .collect();
      if contains_sorted(&translated, simplex.vertices()) {
        entries.insert((parent_type, corner));
      }
    }
  }
  entries.into_iter().collect()
}

/// Whether the sorted vertex list `sup` contains every vertex of the sorted
/// vertex list `sub`.
fn contains_sorted(sup: &[LatticeCoord], sub: &[LatticeCoord]) -> bool {
  let mut sup = sup.iter();
  'next_vertex: for v in sub {
    for w in sup.by_ref() {
      match w.cmp(v) {
        std::cmp::Ordering::Less => continue,
        std::cmp::Ordering::Equal => continue 'next_vertex,
        std::cmp::Ordering::Greater => return false,
      }
    }
    return false;
  }
  true
}

#[cfg(test)]
mod test {
  use super::{contains_sorted, SubdivisionTables};
  use crate::combo::factorial;
  use crate::simplex::UnitSimplex;

  #[test]
  fn top_dimension_type_counts() {
    for n in 1..=4 {
      let tables = SubdivisionTables::build(n);
      assert_eq!(tables.ntypes(n), factorial(n));
    }
  }

  #[test]
  fn plane_type_catalogue() {
    let tables = SubdivisionTables::build(2);
    assert_eq!(tables.ntypes(0), 1);
    assert_eq!(tables.ntypes(1), 3);
    assert_eq!(tables.ntypes(2), 2);

    assert_eq!(
      tables.unit_simplex(0, 0),
      &UnitSimplex::new(vec![vec![0, 0]])
    );
    // The three edge shapes through a lattice point: vertical, horizontal,
    // diagonal, in sorted catalogue order.
    assert_eq!(
      tables.unit_simplex(1, 0),
      &UnitSimplex::new(vec![vec![0, 0], vec![0, 1]])
    );
    assert_eq!(
      tables.unit_simplex(1, 1),
      &UnitSimplex::new(vec![vec![0, 0], vec![1, 0]])
    );
    assert_eq!(
      tables.unit_simplex(1, 2),
      &UnitSimplex::new(vec![vec![0, 0], vec![1, 1]])
    );
  }

  #[test]
  fn space_type_counts() {
    let tables = SubdivisionTables::build(3);
    assert_eq!(tables.ntypes(0), 1);
    assert_eq!(tables.ntypes(1), 7);
    assert_eq!(tables.ntypes(2), 12);
    assert_eq!(tables.ntypes(3), 6);
  }

  #[test]
  fn segment_sides() {
    let tables = SubdivisionTables::build(1);
    assert_eq!(tables.ntypes(0), 1);
    assert_eq!(tables.ntypes(1), 1);
    // The two endpoints of the unit segment: the near corner and the one of
    // the next cube over.
    assert_eq!(tables.sides(1, 0), &[(0, vec![0]), (0, vec![1])]);
    assert!(tables.sides(0, 0).is_empty());
  }

  #[test]
  fn segment_side_of() {
    let tables = SubdivisionTables::build(1);
    assert_eq!(tables.side_of(0, 0), &[(0, vec![-1]), (0, vec![0])]);
    assert!(tables.side_of(1, 0).is_empty());
  }

  #[test]
  fn sorted_superset() {
    let sup = vec![vec![0, 0], vec![0, 1], vec![1, 1]];
    assert!(contains_sorted(&sup, &[vec![0, 0], vec![1, 1]]));
    assert!(contains_sorted(&sup, &sup.clone()));
    assert!(!contains_sorted(&sup, &[vec![1, 0]]));
  }
}

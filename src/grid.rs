//! Dense strided storage over the lattice, for per-vertex field samples that
//! element vertices index into.

use num_traits::Zero;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
  #[error("data length {len} does not match grid volume {volume}")]
  LengthMismatch { len: usize, volume: usize },
}

/// Converts a linear index to a cartesian index, column-major: the first
/// axis varies fastest.
pub fn linear_index2cartesian_index(mut lin_idx: usize, extents: &[usize]) -> na::DVector<usize> {
  let mut cart_idx = na::DVector::zeros(extents.len());
  for (icomp, &extent) in extents.iter().enumerate() {
    cart_idx[icomp] = lin_idx % extent;
    lin_idx /= extent;
  }
  cart_idx
}

/// Converts a cartesian index to a linear index, inverse of
/// [`linear_index2cartesian_index`].
pub fn cartesian_index2linear_index(cart_idx: &na::DVector<usize>, extents: &[usize]) -> usize {
  let mut lin_idx = 0;
  for icomp in (0..extents.len()).rev() {
    lin_idx *= extents[icomp];
    lin_idx += cart_idx[icomp];
  }
  lin_idx
}

/// A dense multidimensional array with column-major strides
/// (`s[0] = 1`, `s[i] = s[i-1] * extents[i-1]`).
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeGrid<T> {
  extents: Vec<usize>,
  strides: Vec<usize>,
  data: Vec<T>,
}

/// constructors
impl<T> LatticeGrid<T> {
  pub fn zeros(extents: &[usize]) -> Self
  where
    T: Zero + Clone,
  {
    Self::from_elem(extents, T::zero())
  }

  pub fn from_elem(extents: &[usize], elem: T) -> Self
  where
    T: Clone,
  {
    let volume = extents.iter().product();
    Self {
      extents: extents.to_vec(),
      strides: strides_for(extents),
      data: vec![elem; volume],
    }
  }

  pub fn from_vec(extents: &[usize], data: Vec<T>) -> Result<Self, GridError> {
    let volume = extents.iter().product();
    if data.len() != volume {
      return Err(GridError::LengthMismatch {
        len: data.len(),
        volume,
      });
    }
    Ok(Self {
      extents: extents.to_vec(),
      strides: strides_for(extents),
      data,
    })
  }
}

impl<T> LatticeGrid<T> {
  pub fn rank(&self) -> usize {
    self.extents.len()
  }
  pub fn extents(&self) -> &[usize] {
    &self.extents
  }
  pub fn len(&self) -> usize {
    self.data.len()
  }
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
  pub fn data(&self) -> &[T] {
    &self.data
  }
  pub fn data_mut(&mut self) -> &mut [T] {
    &mut self.data
  }

  pub fn linear_index(&self, index: &[usize]) -> usize {
    assert_eq!(index.len(), self.rank());
    index.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
  }

  pub fn cartesian_index(&self, lin_idx: usize) -> na::DVector<usize> {
    linear_index2cartesian_index(lin_idx, &self.extents)
  }

  pub fn get(&self, index: &[usize]) -> &T {
    &self.data[self.linear_index(index)]
  }
  pub fn get_mut(&mut self, index: &[usize]) -> &mut T {
    let lin_idx = self.linear_index(index);
    &mut self.data[lin_idx]
  }

  pub fn at(&self, index: &na::DVector<usize>) -> &T {
    self.get(index.as_slice())
  }
  pub fn at_mut(&mut self, index: &na::DVector<usize>) -> &mut T {
    self.get_mut(index.as_slice())
  }
}

impl<T> std::ops::Index<&[usize]> for LatticeGrid<T> {
  type Output = T;
  fn index(&self, index: &[usize]) -> &Self::Output {
    self.get(index)
  }
}
impl<T> std::ops::IndexMut<&[usize]> for LatticeGrid<T> {
  fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
    self.get_mut(index)
  }
}

fn strides_for(extents: &[usize]) -> Vec<usize> {
  let mut strides = Vec::with_capacity(extents.len());
  let mut stride = 1;
  for &extent in extents {
    strides.push(stride);
    stride *= extent;
  }
  strides
}

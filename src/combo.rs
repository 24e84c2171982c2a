pub fn binomial(n: usize, k: usize) -> usize {
  num_integer::binomial(n, k)
}
pub fn factorial(num: usize) -> usize {
  (1..=num).product()
}

#[cfg(test)]
mod test {
  use super::{binomial, factorial};

  #[test]
  fn small_values() {
    assert_eq!(factorial(0), 1);
    assert_eq!(factorial(1), 1);
    assert_eq!(factorial(4), 24);
    assert_eq!(binomial(4, 2), 6);
    assert_eq!(binomial(5, 0), 1);
  }
}

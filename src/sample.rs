//! Sample data to plot: evenly spaced values and seeded random draws.
//!
//! Everything is returned as [`ndarray::Array1`] so that elementwise
//! arithmetic (`&a + &b`, `a.mapv(f64::abs)`,...) is available before
//! plotting.

use std::collections::BTreeMap;
use ndarray::Array1;
use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal, Uniform};
use crate::Error;

/// `n` evenly spaced values from `a` to `b`, both included.
pub fn linspace(a: f64, b: f64, n: usize) -> Array1<f64> {
    Array1::linspace(a, b, n)
}

/// The values 0, 1,..., `n` - 1.
pub fn arange(n: usize) -> Array1<f64> {
    Array1::from_iter((0 .. n).map(|i| i as f64))
}

/// Running sums of `x`.
pub fn cumsum(x: &[f64]) -> Array1<f64> {
    x.iter().scan(0., |s, &v| { *s += v; Some(*s) }).collect()
}

/// Reproducible random number generator.
pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    pub fn seeded(seed: u64) -> Self {
        Sampler { rng: SmallRng::seed_from_u64(seed) }
    }

    /// `n` draws from the standard normal distribution.
    pub fn randn(&mut self, n: usize) -> Array1<f64> {
        Array1::from_iter(
            (0 .. n).map(|_| StandardNormal.sample(&mut self.rng)))
    }

    /// `k` independent datasets of `n` standard normal draws each.
    pub fn randn_sets(&mut self, k: usize, n: usize) -> Vec<Array1<f64>> {
        (0 .. k).map(|_| self.randn(n)).collect()
    }

    /// `n` integers drawn uniformly in `low .. high` (as floats, ready
    /// to plot).
    pub fn randint(&mut self, low: i64, high: i64, n: usize)
                   -> Result<Array1<f64>, Error> {
        if low >= high {
            return Err(Error::InvalidRange { low, high })
        }
        let dist = Uniform::new(low, high);
        Ok(Array1::from_iter(
            (0 .. n).map(|_| dist.sample(&mut self.rng) as f64)))
    }
}

/// Named columns of data, in the manner of a data frame.
///
/// # Example
///
/// ```
/// use quickplot::sample::{arange, Columns};
/// let mut data = Columns::new();
/// data.insert("a", arange(50));
/// assert_eq!(data.column("a")?.len(), 50);
/// assert!(data.column("z").is_err());
/// # Ok::<(), quickplot::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Columns {
    cols: BTreeMap<String, Array1<f64>>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the column `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Array1<f64>)
                  -> &mut Self {
        self.cols.insert(name.into(), values);
        self
    }

    pub fn column(&self, name: &str) -> Result<&Array1<f64>, Error> {
        self.cols.get(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cols.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn evenly_spaced() {
        let x = linspace(0., 2., 5);
        assert_eq!(x.len(), 5);
        assert_abs_diff_eq!(x[1], 0.5);
        assert_abs_diff_eq!(x[4], 2.);
        assert_eq!(arange(4).to_vec(), [0., 1., 2., 3.]);
    }

    #[test]
    fn running_sums() {
        assert_eq!(cumsum(&[1., 2., 3., -1.]).to_vec(), [1., 3., 6., 5.]);
        assert!(cumsum(&[]).is_empty());
    }

    #[test]
    fn same_seed_same_draws() {
        let a = Sampler::seeded(19680801).randn(20);
        let b = Sampler::seeded(19680801).randn(20);
        assert_eq!(a, b);
        let c = Sampler::seeded(1).randn(20);
        assert_ne!(a, c);
    }

    #[test]
    fn normal_draws_are_centered() {
        let x = Sampler::seeded(7).randn(10_000);
        let mean = x.sum() / x.len() as f64;
        let var = x.mapv(|v| (v - mean).powi(2)).sum() / x.len() as f64;
        assert_abs_diff_eq!(mean, 0., epsilon = 0.05);
        assert_abs_diff_eq!(var, 1., epsilon = 0.1);
    }

    #[test]
    fn integers_in_range() -> Result<(), Error> {
        let mut s = Sampler::seeded(3);
        let c = s.randint(0, 50, 200)?;
        assert!(c.iter().all(|&v| (0. .. 50.).contains(&v) && v.fract() == 0.));
        assert!(matches!(s.randint(5, 5, 1),
                         Err(Error::InvalidRange { low: 5, high: 5 })));
        Ok(())
    }

    #[test]
    fn independent_sets() {
        let sets = Sampler::seeded(19680801).randn_sets(4, 100);
        assert_eq!(sets.len(), 4);
        assert!(sets.iter().all(|s| s.len() == 100));
        assert_ne!(sets[0], sets[1]);
    }

    #[test]
    fn named_columns() {
        let mut data = Columns::new();
        data.insert("b", arange(3)).insert("a", linspace(0., 1., 3));
        assert_eq!(data.names().collect::<Vec<_>>(), ["a", "b"]);
        match data.column("c") {
            Err(Error::UnknownColumn(name)) => assert_eq!(name, "c"),
            other => panic!("unexpected {:?}", other),
        }
    }
}

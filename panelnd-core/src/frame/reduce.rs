use super::{IntoAxis, NdFrame};
use crate::dtypes::{Dtype, Unit};
use crate::error::Error;
use crate::storage::StridedArray;

/// Permutes `axis` to the rightmost position, so that the elements reduced with each
/// other are sequential in logical order.
fn permute_for_reduction<E: Unit>(
    values: &StridedArray<E>,
    axis: usize,
) -> Result<StridedArray<E>, Error> {
    let mut perm: Vec<usize> = (0..values.ndim()).filter(|&i| i != axis).collect();
    perm.push(axis);
    values.permute(&perm)
}

impl<E: Unit> NdFrame<E> {
    /// Applies `f` to every group of cells along `axis` (the statistics axis when
    /// `None`) and returns the results as a slicer frame.
    pub fn reduce<O, F>(&self, axis: impl IntoAxis, mut f: F) -> Result<NdFrame<O>, Error>
    where
        O: Unit,
        F: FnMut(&[E]) -> Result<O, Error>,
    {
        let axis = self.resolve_axis(axis)?;
        if self.config.slicer().is_none() {
            return Err(Error::NoSlicer(self.klass_name().to_owned()));
        }
        let group = self.shape()[axis];
        let mut kept: Vec<usize> = self.shape().to_vec();
        kept.remove(axis);
        let n = crate::shapes::num_elements(&kept);

        let permuted = permute_for_reduction(&self.values, axis)?;
        let mut iter = permuted.iter();
        let mut buf = Vec::with_capacity(group);
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            buf.clear();
            buf.extend(iter.by_ref().take(group).copied());
            out.push(f(&buf)?);
        }
        self.lower(axis, StridedArray::from_vec(out, kept)?)
    }

    /// Number of non-NA cells along `axis`.
    pub fn count(&self, axis: impl IntoAxis) -> Result<NdFrame<usize>, Error> {
        self.reduce(axis, |g| Ok(g.iter().filter(|x| !x.is_na()).count()))
    }
}

fn to_f64s<E: Dtype>(group: &[E]) -> Vec<f64> {
    group
        .iter()
        .filter(|x| !x.is_na())
        .filter_map(|x| x.to_f64())
        .collect()
}

fn variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0)
}

fn extreme<E: Dtype>(group: &[E], keep: fn(&E, &E) -> bool) -> Result<E, Error> {
    let mut best: Option<E> = None;
    for x in group.iter().filter(|x| !x.is_na()) {
        best = match best {
            Some(b) if !keep(x, &b) => Some(b),
            _ => Some(*x),
        };
    }
    match best {
        Some(b) => Ok(b),
        None => E::NA.ok_or(Error::MissingValue(E::DTYPE)),
    }
}

fn checked_sum<'a, E: Dtype>(xs: impl Iterator<Item = &'a E>) -> Result<E, Error> {
    xs.filter(|x| !x.is_na()).try_fold(E::zero(), |acc, &x| {
        acc.add_checked(x).ok_or(Error::Overflow(E::DTYPE))
    })
}

impl<E: Dtype> NdFrame<E> {
    /// Sum along `axis`, skipping NA. An all-NA group sums to zero.
    /// An integer total that does not fit fails with [Error::Overflow].
    pub fn sum(&self, axis: impl IntoAxis) -> Result<NdFrame<E>, Error> {
        self.reduce(axis, |g| checked_sum(g.iter()))
    }

    /// Sum over every cell, skipping NA.
    pub fn sum_all(&self) -> Result<E, Error> {
        checked_sum(self.values.iter())
    }

    pub fn mean(&self, axis: impl IntoAxis) -> Result<NdFrame<f64>, Error> {
        self.reduce(axis, |g| {
            let xs = to_f64s(g);
            Ok(if xs.is_empty() {
                f64::NAN
            } else {
                xs.iter().sum::<f64>() / xs.len() as f64
            })
        })
    }

    /// Sample variance (`ddof = 1`).
    pub fn var(&self, axis: impl IntoAxis) -> Result<NdFrame<f64>, Error> {
        self.reduce(axis, |g| Ok(variance(&to_f64s(g))))
    }

    /// Sample standard deviation (`ddof = 1`).
    pub fn std(&self, axis: impl IntoAxis) -> Result<NdFrame<f64>, Error> {
        self.reduce(axis, |g| Ok(variance(&to_f64s(g)).sqrt()))
    }

    pub fn min(&self, axis: impl IntoAxis) -> Result<NdFrame<E>, Error> {
        self.reduce(axis, |g| extreme(g, |a, b| a < b))
    }

    pub fn max(&self, axis: impl IntoAxis) -> Result<NdFrame<E>, Error> {
        self.reduce(axis, |g| extreme(g, |a, b| a > b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Index;
    use crate::tests::*;

    #[test]
    fn test_sum_defaults_to_stat_axis() {
        let p = arange_panel();
        let s = p.sum(None::<usize>).unwrap();
        // major_axis removed: items -> index, minor_axis -> columns
        assert_eq!(s.klass_name(), "DataFrame");
        assert_eq!(s.shape(), &[2, 4]);
        assert_eq!(s.get_value(["i0", "c0"]).unwrap(), 0.0 + 10.0 + 20.0);
        assert_eq!(s.get_value(["i1", "c3"]).unwrap(), 103.0 + 113.0 + 123.0);
        assert_eq!(s, p.sum("major").unwrap());
        assert_eq!(s, p.sum("major_axis").unwrap());
        assert_eq!(s, p.sum(1usize).unwrap());
    }

    #[test]
    fn test_sum_over_outer_axis() {
        let p = arange_panel();
        let s = p.sum("items").unwrap();
        assert_eq!(s.axis("index").unwrap(), p.axis("major").unwrap());
        assert_eq!(s.get_value(["r1", "c2"]).unwrap(), 12.0 + 112.0);
    }

    #[test]
    fn test_reductions_skip_na() {
        let p = arange_panel()
            .reindex("major", Index::new(["r0", "r1", "r2", "gap"]).unwrap())
            .unwrap();
        let n = p.count(None::<usize>).unwrap();
        assert_eq!(n.get_value(["i0", "c0"]).unwrap(), 3);
        let m = p.mean("major").unwrap();
        assert_close!(m.get_value(["i0", "c1"]).unwrap(), 11.0);
        let lo = p.min("major").unwrap();
        let hi = p.max("major").unwrap();
        assert_eq!(lo.get_value(["i1", "c0"]).unwrap(), 100.0);
        assert_eq!(hi.get_value(["i1", "c0"]).unwrap(), 120.0);
    }

    #[test]
    fn test_std_and_var() {
        let p = arange_panel();
        let v = p.var("minor").unwrap();
        // 0, 1, 2, 3 -> sample variance 5/3
        assert_close!(v.get_value(["i0", "r0"]).unwrap(), 5.0 / 3.0);
        let s = p.std("minor").unwrap();
        assert_close!(s.get_value(["i1", "r2"]).unwrap(), (5.0f64 / 3.0).sqrt());

        let one = p.reindex("minor", Index::new(["c0"]).unwrap()).unwrap();
        assert!(one.var("minor").unwrap().values().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_all_na_groups() {
        let p = arange_panel()
            .reindex("items", Index::new(["i0", "none"]).unwrap())
            .unwrap();
        let s = p.sum("major").unwrap();
        assert_eq!(s.get_value(["none", "c0"]).unwrap(), 0.0);
        assert!(p.max("major").unwrap().get_value(["none", "c0"]).unwrap().is_nan());
        assert!(p.mean("major").unwrap().get_value(["none", "c0"]).unwrap().is_nan());

        let empty: NdFrame<i32> = arange_panel()
            .try_to_dtype::<i32>()
            .unwrap()
            .reindex("major", Index::empty())
            .unwrap();
        assert!(matches!(
            empty.max("major"),
            Err(Error::MissingValue(_))
        ));
        assert_eq!(empty.sum("major").unwrap().values().to_vec(), [0; 8]);
    }

    #[test]
    fn test_sum_all_and_no_slicer() {
        let p = arange_panel();
        let expected: f64 = (0..2)
            .flat_map(|i| (0..3).flat_map(move |r| (0..4).map(move |c| (100 * i + 10 * r + c) as f64)))
            .sum();
        assert_eq!(p.sum_all().unwrap(), expected);
        let s = p.get("i0").unwrap().get("r0").unwrap();
        assert_eq!(s.sum_all().unwrap(), 6.0);
        assert!(matches!(s.sum(0usize), Err(Error::NoSlicer(_))));
    }

    #[test]
    fn test_integer_sum_overflow() {
        let p: NdFrame<i32> = arange_panel().try_to_dtype().unwrap();
        let big = p.add_scalar(i32::MAX - 123).unwrap();
        assert!(matches!(big.sum("major"), Err(Error::Overflow(_))));
        assert!(matches!(big.sum_all(), Err(Error::Overflow(_))));
        assert_eq!(p.sum_all().unwrap(), 1476);

        let wide: NdFrame<i64> = big.try_to_dtype().unwrap();
        let s = wide.sum("major").unwrap();
        assert_eq!(
            s.get_value(["i1", "c3"]).unwrap(),
            3 * (i32::MAX as i64 - 123) + 103 + 113 + 123
        );
    }
}

use super::NdFrame;
use crate::dtypes::Dtype;
use crate::error::Error;
use crate::storage::StridedArray;

fn overflow<E: Dtype>(r: Option<E>) -> Result<E, Error> {
    r.ok_or(Error::Overflow(E::DTYPE))
}

fn checked_div<E: Dtype>(a: E, b: E) -> Result<E, Error> {
    if !E::DTYPE.is_float() && b.is_zero() {
        return Err(Error::ZeroDivision(E::DTYPE));
    }
    overflow(a.div_checked(b))
}

impl<E: Dtype> NdFrame<E> {
    /// Aligns both operands on every axis, then combines them cell by cell.
    /// Cells where either side is NA stay NA.
    fn zip_with<F>(&self, other: &Self, mut f: F) -> Result<Self, Error>
    where
        F: FnMut(E, E) -> Result<E, Error>,
    {
        let (left, right) = self.align(other)?;
        let mut data = Vec::with_capacity(left.values.num_elements());
        for (&a, &b) in left.values.iter().zip(right.values.iter()) {
            if a.is_na() {
                data.push(a);
            } else if b.is_na() {
                data.push(b);
            } else {
                data.push(f(a, b)?);
            }
        }
        let values = StridedArray::from_vec(data, left.shape().to_vec())?;
        Self::from_parts(left.config, left.axes, values)
    }

    fn scalar_op<F>(&self, mut f: F) -> Result<Self, Error>
    where
        F: FnMut(E) -> Result<E, Error>,
    {
        let mut data = Vec::with_capacity(self.values.num_elements());
        for &a in self.values.iter() {
            data.push(if a.is_na() { a } else { f(a)? });
        }
        let values = StridedArray::from_vec(data, self.shape().to_vec())?;
        Self::from_parts(self.config.clone(), self.axes.clone(), values)
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, Error> {
        self.zip_with(other, |a, b| overflow(a.add_checked(b)))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, Error> {
        self.zip_with(other, |a, b| overflow(a.sub_checked(b)))
    }

    pub fn try_mul(&self, other: &Self) -> Result<Self, Error> {
        self.zip_with(other, |a, b| overflow(a.mul_checked(b)))
    }

    /// Integer division by zero fails with [Error::ZeroDivision] and an integer result
    /// that does not fit fails with [Error::Overflow]. Floats follow IEEE rules.
    pub fn try_div(&self, other: &Self) -> Result<Self, Error> {
        self.zip_with(other, checked_div)
    }

    pub fn add_scalar(&self, rhs: E) -> Result<Self, Error> {
        self.scalar_op(|a| overflow(a.add_checked(rhs)))
    }

    pub fn sub_scalar(&self, rhs: E) -> Result<Self, Error> {
        self.scalar_op(|a| overflow(a.sub_checked(rhs)))
    }

    pub fn mul_scalar(&self, rhs: E) -> Result<Self, Error> {
        self.scalar_op(|a| overflow(a.mul_checked(rhs)))
    }

    pub fn div_scalar(&self, rhs: E) -> Result<Self, Error> {
        self.scalar_op(|a| checked_div(a, rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtypes::DType;
    use crate::index::Index;
    use crate::tests::*;

    #[test]
    fn test_add_same_axes() {
        let p = arange_panel();
        let q = p.try_add(&p).unwrap();
        assert_eq!(q.get_value(["i1", "r2", "c3"]).unwrap(), 246.0);
        assert_eq!(q, p.mul_scalar(2.0).unwrap());
    }

    #[test]
    fn test_binary_ops_align_with_na() {
        let p = arange_panel();
        let q = p
            .reindex("minor", Index::new(["c1", "extra"]).unwrap())
            .unwrap()
            .fillna(1.0);
        let d = p.try_sub(&q).unwrap();
        assert_eq!(
            d.axis("minor").unwrap(),
            &Index::new(["c0", "c1", "c2", "c3", "extra"]).unwrap()
        );
        assert_eq!(d.get_value(["i0", "r1", "c1"]).unwrap(), 0.0);
        assert!(d.get_value(["i0", "r1", "c0"]).unwrap().is_nan());
        assert!(d.get_value(["i0", "r1", "extra"]).unwrap().is_nan());

        let m = p.try_mul(&q).unwrap();
        assert_eq!(m.get_value(["i1", "r0", "c1"]).unwrap(), 101.0 * 101.0);
        let r = p.try_div(&q).unwrap();
        assert_eq!(r.get_value(["i1", "r0", "c1"]).unwrap(), 1.0);
    }

    #[test]
    fn test_scalar_ops_keep_na() {
        let p = arange_panel()
            .reindex("items", Index::new(["i0", "gap"]).unwrap())
            .unwrap();
        let q = p.add_scalar(1.0).unwrap().sub_scalar(0.5).unwrap();
        assert_eq!(q.get_value(["i0", "r0", "c0"]).unwrap(), 0.5);
        assert!(q.get_value(["gap", "r0", "c0"]).unwrap().is_nan());
        let h = p.div_scalar(2.0).unwrap();
        assert_eq!(h.get_value(["i0", "r2", "c2"]).unwrap(), 11.0);
    }

    #[test]
    fn test_integer_division_by_zero() {
        let p: NdFrame<i64> = arange_panel().try_to_dtype().unwrap();
        assert!(matches!(p.div_scalar(0), Err(Error::ZeroDivision(_))));
        let f = arange_panel().div_scalar(0.0).unwrap();
        assert!(f.get_value(["i0", "r0", "c1"]).unwrap().is_infinite());
    }

    #[test]
    fn test_integer_overflow() {
        let p: NdFrame<i32> = arange_panel().try_to_dtype().unwrap();
        let big = p.add_scalar(i32::MAX - 123).unwrap();
        assert_eq!(big.get_value(["i1", "r2", "c3"]).unwrap(), i32::MAX);
        assert!(matches!(big.add_scalar(1), Err(Error::Overflow(DType::Int32))));
        assert!(matches!(big.try_add(&p), Err(Error::Overflow(_))));
        assert!(matches!(big.mul_scalar(2), Err(Error::Overflow(_))));

        let low = p.sub_scalar(i32::MAX).unwrap().sub_scalar(1).unwrap();
        assert_eq!(low.get_value(["i0", "r0", "c0"]).unwrap(), i32::MIN);
        assert!(matches!(low.div_scalar(-1), Err(Error::Overflow(_))));
        assert!(matches!(low.try_sub(&p.add_scalar(1).unwrap()), Err(Error::Overflow(_))));
        assert_eq!(p.div_scalar(-1).unwrap().get_value(["i1", "r0", "c1"]).unwrap(), -101);

        let u: NdFrame<u8> = arange_panel()
            .reindex("items", Index::new(["i0"]).unwrap())
            .unwrap()
            .try_to_dtype()
            .unwrap();
        assert!(matches!(u.sub_scalar(1), Err(Error::Overflow(DType::UInt8))));
    }

    #[test]
    fn test_mismatched_kinds() {
        let p = arange_panel();
        let df = p.get("i0").unwrap();
        let wrapped = NdFrame::from_parts(
            crate::config::NdConfig::builder("Grid")
                .axis_orders(["index", "columns"])
                .slicer(series_config())
                .build()
                .unwrap(),
            df.axes().to_vec(),
            df.values().clone(),
        )
        .unwrap();
        assert!(matches!(
            df.try_add(&wrapped),
            Err(Error::ConfigMismatch { left, right }) if left == "DataFrame" && right == "Grid"
        ));
    }
}

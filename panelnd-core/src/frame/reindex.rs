use super::{IntoAxis, NdFrame};
use crate::dtypes::Unit;
use crate::error::Error;
use crate::index::Index;

impl<E: Unit> NdFrame<E> {
    /// Conforms one axis to `index`. Labels not present before become NA cells.
    ///
    /// Returns a frame sharing the buffer when `index` already equals the axis.
    pub fn reindex(&self, axis: impl IntoAxis, index: Index) -> Result<Self, Error> {
        let axis = self.resolve_axis(axis)?;
        if self.axes[axis].equals(&index) {
            return Ok(self.clone());
        }
        let indexer = self.axes[axis].get_indexer(&index);
        let missing = indexer.iter().filter(|i| i.is_none()).count();
        let inner: usize = self
            .shape()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &d)| d)
            .product();
        let fill = if missing > 0 && inner > 0 {
            E::NA.ok_or(Error::MissingValue(E::DTYPE))?
        } else {
            E::default()
        };
        tracing::trace!(
            target: "panelnd::align",
            klass = %self.config,
            axis = %self.config.axis_orders()[axis],
            from = self.axes[axis].len(),
            to = index.len(),
            missing,
            "reindex"
        );
        let values = self.values.take(axis, &indexer, fill)?;
        let mut axes = self.axes.clone();
        axes[axis] = index;
        Self::from_parts(self.config.clone(), axes, values)
    }

    /// Conforms every axis of `self` and `other` to the union of their labels.
    pub fn align(&self, other: &Self) -> Result<(Self, Self), Error> {
        if !self.same_kind(other) {
            return Err(Error::ConfigMismatch {
                left: self.klass_name().to_owned(),
                right: other.klass_name().to_owned(),
            });
        }
        let mut left = self.clone();
        let mut right = other.clone();
        for axis in 0..self.ndim() {
            let joined = self.axes[axis].union(&other.axes[axis]);
            left = left.reindex(axis, joined.clone())?;
            right = right.reindex(axis, joined)?;
        }
        tracing::debug!(
            target: "panelnd::align",
            klass = %self.config,
            shape = ?left.shape(),
            "aligned"
        );
        Ok((left, right))
    }

    /// Replaces every NA cell with `value`.
    pub fn fillna(&self, value: E) -> Self {
        self.map(|x| if x.is_na() { value } else { *x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn test_reindex_same_index_shares_buffer() {
        let p = arange_panel();
        let r = p.reindex("major", p.axis(1usize).unwrap().clone()).unwrap();
        assert!(r.values().shares_buffer(p.values()));
    }

    #[test]
    fn test_reindex_subset_reorders() {
        let p = arange_panel();
        let r = p
            .reindex("minor", Index::new(["c3", "c0"]).unwrap())
            .unwrap();
        assert_eq!(r.shape(), &[2, 3, 2]);
        assert_eq!(r.get_value(["i1", "r2", "c3"]).unwrap(), 123.0);
        assert_eq!(r.get_value(["i0", "r1", "c0"]).unwrap(), 10.0);
    }

    #[test]
    fn test_reindex_fills_na() {
        let p = arange_panel();
        let r = p
            .reindex("items", Index::new(["i1", "i9"]).unwrap())
            .unwrap();
        assert!(r.get("i9").unwrap().values().iter().all(|x| x.is_nan()));
        assert_eq!(r.get("i1").unwrap(), p.get("i1").unwrap());
    }

    #[test]
    fn test_reindex_int_needs_no_fill_for_subsets() {
        let p: NdFrame<i32> = arange_panel().try_to_dtype().unwrap();
        assert!(p.reindex("items", Index::new(["i0"]).unwrap()).is_ok());
        assert!(matches!(
            p.reindex("items", Index::new(["x"]).unwrap()),
            Err(Error::MissingValue(_))
        ));
    }

    #[test]
    fn test_align_unions_axes() {
        let p = arange_panel();
        let q = p
            .reindex("major_axis", Index::new(["r1", "r5"]).unwrap())
            .unwrap();
        let (a, b) = p.align(&q).unwrap();
        let expected = Index::new(["r0", "r1", "r2", "r5"]).unwrap();
        assert_eq!(a.axis("major").unwrap(), &expected);
        assert_eq!(b.axis("major").unwrap(), &expected);
        assert!(a.get_value(["i0", "r5", "c0"]).unwrap().is_nan());
        assert!(b.get_value(["i0", "r0", "c0"]).unwrap().is_nan());
        assert_eq!(b.get_value(["i0", "r1", "c2"]).unwrap(), 12.0);
    }

    #[test]
    fn test_align_rejects_other_kinds() {
        let p = arange_panel();
        let df = p.get("i0").unwrap();
        let df3 = NdFrame::from_parts(
            frame_config(),
            df.axes().to_vec(),
            df.values().clone(),
        )
        .unwrap();
        assert!(df.align(&df3).is_ok());
        let s = df.get("r0").unwrap();
        let other = NdFrame::from_parts(series_config(), s.axes().to_vec(), s.values().clone())
            .unwrap();
        let renamed = NdFrame::from_parts(
            crate::config::NdConfig::builder("Other")
                .axis_orders(["index"])
                .build()
                .unwrap(),
            s.axes().to_vec(),
            s.values().clone(),
        )
        .unwrap();
        assert!(s.align(&other).is_ok());
        assert!(matches!(
            s.align(&renamed),
            Err(Error::ConfigMismatch { .. })
        ));
    }

    #[test]
    fn test_fillna() {
        let p = arange_panel()
            .reindex("items", Index::new(["i0", "new"]).unwrap())
            .unwrap();
        let f = p.fillna(-1.0);
        assert!(f.get("new").unwrap().values().iter().all(|&x| x == -1.0));
        assert_eq!(f.get_value(["i0", "r2", "c2"]).unwrap(), 22.0);
    }
}

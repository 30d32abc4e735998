//! The generic labeled container, [NdFrame].
//!
//! An [NdFrame] is a [StridedArray] plus one [Index] per axis, interpreted through an
//! [NdConfig]. Every concrete variant (`Series`, `DataFrame`, `Panel`, `Panel4D`, ...) is
//! an [NdFrame] whose config says how many axes it has and what its slices are.
//!
//! Operations are grouped by concern:
//! - ingestion: [NdFrame::init_data]
//! - alignment: [NdFrame::reindex], [NdFrame::align]
//! - reductions: [NdFrame::sum], [NdFrame::mean], ...
//! - arithmetic: [NdFrame::try_add], [NdFrame::add_scalar], ...

mod arith;
mod init;
mod random;
mod reduce;
mod reindex;

pub use init::{InitArgs, NdData};

use crate::config::NdConfig;
use crate::dtypes::{try_cast_buffer, CastTo, DType, Unit};
use crate::error::Error;
use crate::index::{Index, Label};
use crate::storage::StridedArray;
use std::sync::Arc;

/// Anything that names an axis: a position, a canonical name or an alias.
pub trait IntoAxis {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error>;
}

impl IntoAxis for usize {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error> {
        config.axis_name(*self).map(|_| *self)
    }
}

impl IntoAxis for &str {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error> {
        config.resolve_axis_name(self)
    }
}

impl IntoAxis for String {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error> {
        config.resolve_axis_name(self)
    }
}

impl IntoAxis for &String {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error> {
        config.resolve_axis_name(self)
    }
}

/// `None` names the statistics axis.
impl<A: IntoAxis> IntoAxis for Option<A> {
    fn axis_position(&self, config: &NdConfig) -> Result<usize, Error> {
        match self {
            Some(a) => a.axis_position(config),
            None => Ok(config.stat_axis()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NdFrame<E> {
    pub(crate) config: Arc<NdConfig>,
    pub(crate) axes: Vec<Index>,
    pub(crate) values: StridedArray<E>,
}

impl<E: Unit> NdFrame<E> {
    /// Assembles a frame, checking that there is one index per axis and that each
    /// index matches the length of the data along its axis.
    pub fn from_parts(
        config: Arc<NdConfig>,
        axes: Vec<Index>,
        values: StridedArray<E>,
    ) -> Result<Self, Error> {
        if values.ndim() != config.ndim() {
            return Err(Error::DimensionMismatch {
                expected: config.ndim(),
                actual: values.ndim(),
            });
        }
        if axes.len() != config.ndim() {
            return Err(Error::DimensionMismatch {
                expected: config.ndim(),
                actual: axes.len(),
            });
        }
        for (i, (index, &len)) in axes.iter().zip(values.shape()).enumerate() {
            if index.len() != len {
                return Err(Error::AxisLengthMismatch {
                    axis: config.axis_orders()[i].clone(),
                    expected: len,
                    actual: index.len(),
                });
            }
        }
        Ok(Self {
            config,
            axes,
            values,
        })
    }

    pub fn config(&self) -> &Arc<NdConfig> {
        &self.config
    }

    pub fn klass_name(&self) -> &str {
        self.config.klass_name()
    }

    pub fn ndim(&self) -> usize {
        self.config.ndim()
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Length of the outermost axis.
    pub fn len(&self) -> usize {
        self.axes[0].len()
    }

    /// True when there are no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.num_elements() == 0
    }

    pub fn dtype(&self) -> DType {
        E::DTYPE
    }

    pub fn values(&self) -> &StridedArray<E> {
        &self.values
    }

    pub fn axes(&self) -> &[Index] {
        &self.axes
    }

    pub fn axis_names(&self) -> &[String] {
        self.config.axis_orders()
    }

    pub fn resolve_axis(&self, axis: impl IntoAxis) -> Result<usize, Error> {
        axis.axis_position(&self.config)
    }

    /// The index of an axis given by position, name or alias.
    pub fn axis(&self, axis: impl IntoAxis) -> Result<&Index, Error> {
        let i = self.resolve_axis(axis)?;
        Ok(&self.axes[i])
    }

    /// Whether two frames were built from the same configuration record.
    pub fn same_kind<O>(&self, other: &NdFrame<O>) -> bool {
        Arc::ptr_eq(&self.config, &other.config) || self.config == other.config
    }

    pub(crate) fn loc(&self, axis: usize, label: &Label) -> Result<usize, Error> {
        self.axes[axis]
            .get_loc(label)
            .ok_or_else(|| Error::KeyNotFound {
                axis: self.config.axis_orders()[axis].clone(),
                label: label.clone(),
            })
    }

    /// The slice at `label` along the outermost axis, as an instance of the slicer type.
    pub fn get(&self, label: impl Into<Label>) -> Result<NdFrame<E>, Error> {
        self.xs(label, 0usize)
    }

    /// Cross-section at `label` along any axis. The result is a slicer instance whose
    /// axes are laid out by [NdConfig::slice_layout].
    pub fn xs(&self, label: impl Into<Label>, axis: impl IntoAxis) -> Result<NdFrame<E>, Error> {
        let axis = self.resolve_axis(axis)?;
        if self.config.slicer().is_none() {
            return Err(Error::NoSlicer(self.klass_name().to_owned()));
        }
        let i = self.loc(axis, &label.into())?;
        let values = self.values.select(axis, i)?;
        self.lower(axis, values)
    }

    /// Builds the slicer frame for `values`, whose axes are this frame's axes
    /// with `removed` dropped, in parent order.
    pub(crate) fn lower<O: Unit>(
        &self,
        removed: usize,
        values: StridedArray<O>,
    ) -> Result<NdFrame<O>, Error> {
        let (slicer, layout) = self.config.slice_layout(removed)?;
        let perm: Vec<usize> = layout
            .iter()
            .map(|&p| if p < removed { p } else { p - 1 })
            .collect();
        let axes = layout.iter().map(|&p| self.axes[p].clone()).collect();
        NdFrame::from_parts(slicer, axes, values.permute(&perm)?)
    }

    fn positions<I, L>(&self, labels: I) -> Result<Vec<usize>, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.ndim() {
            return Err(Error::DimensionMismatch {
                expected: self.ndim(),
                actual: labels.len(),
            });
        }
        labels
            .iter()
            .enumerate()
            .map(|(axis, label)| self.loc(axis, label))
            .collect()
    }

    /// The element addressed by one label per axis.
    pub fn get_value<I, L>(&self, labels: I) -> Result<E, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let pos = self.positions(labels)?;
        self.values
            .get(&pos)
            .copied()
            .ok_or(Error::DimensionMismatch {
                expected: self.ndim(),
                actual: pos.len(),
            })
    }

    /// Overwrites the element addressed by one label per axis. Clones the buffer
    /// first if it is shared with another frame.
    pub fn set_value<I, L>(&mut self, labels: I, value: E) -> Result<(), Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let pos = self.positions(labels)?;
        let ndim = self.ndim();
        let cell = self.values.get_mut(&pos).ok_or(Error::DimensionMismatch {
            expected: ndim,
            actual: pos.len(),
        })?;
        *cell = value;
        Ok(())
    }

    /// Inserts or replaces the outer slice at `label`.
    ///
    /// `value` is conformed to this frame's inner axes; cells it does not cover
    /// become NA. Setting into a frame with no outer labels adopts `value`'s axes.
    pub fn set(&mut self, label: impl Into<Label>, value: &NdFrame<E>) -> Result<(), Error> {
        let label = label.into();
        let (slicer, layout) = self.config.slice_layout(0)?;
        if value.ndim() != slicer.ndim() {
            return Err(Error::DimensionMismatch {
                expected: slicer.ndim(),
                actual: value.ndim(),
            });
        }
        crate::panel::check_kind(&slicer, value)?;
        if self.len() == 0 {
            for (slot, &parent) in layout.iter().enumerate() {
                self.axes[parent] = value.axes[slot].clone();
            }
        }
        // value's axes in parent order, conformed to the existing inner indexes
        let mut conformed = value.clone();
        for (slot, &parent) in layout.iter().enumerate() {
            conformed = conformed.reindex(slot, self.axes[parent].clone())?;
        }
        let mut inv = vec![0; layout.len()];
        for (slot, &parent) in layout.iter().enumerate() {
            inv[parent - 1] = slot;
        }
        let slice = conformed.values.permute(&inv)?;

        let inner: Vec<usize> = self.axes[1..].iter().map(Index::len).collect();
        let chunk = crate::shapes::num_elements(&inner);
        let mut data = self.values.to_vec();
        let mut outer = self.axes[0].clone();
        match outer.get_loc(&label) {
            Some(i) => {
                let dst = &mut data[i * chunk..(i + 1) * chunk];
                for (d, s) in dst.iter_mut().zip(slice.iter()) {
                    *d = *s;
                }
            }
            None => {
                outer.push(label)?;
                data.extend(slice.iter().copied());
            }
        }
        let mut shape = Vec::with_capacity(self.ndim());
        shape.push(outer.len());
        shape.extend_from_slice(&inner);
        self.values = StridedArray::from_vec(data, shape)?;
        self.axes[0] = outer;
        Ok(())
    }

    /// `(label, slice)` pairs along the outermost axis.
    pub fn iter_slices(&self) -> impl Iterator<Item = Result<(Label, NdFrame<E>), Error>> + '_ {
        self.axes[0]
            .iter()
            .map(move |label| self.get(label).map(|slice| (label.clone(), slice)))
    }

    /// Swaps two axes: their indexes and the data. Does not copy the buffer.
    pub fn swap_axes(&self, a: impl IntoAxis, b: impl IntoAxis) -> Result<Self, Error> {
        let a = self.resolve_axis(a)?;
        let b = self.resolve_axis(b)?;
        let mut perm: Vec<usize> = (0..self.ndim()).collect();
        perm.swap(a, b);
        let mut axes = self.axes.clone();
        axes.swap(a, b);
        Ok(Self {
            config: self.config.clone(),
            axes,
            values: self.values.permute(&perm)?,
        })
    }

    /// Copies the elements of a frame, converting them to a different dtype.
    /// Fails on the first element that cannot be represented.
    pub fn try_to_dtype<E2: Unit>(&self) -> Result<NdFrame<E2>, Error>
    where
        E: CastTo<E2>,
    {
        Ok(NdFrame {
            config: self.config.clone(),
            axes: self.axes.clone(),
            values: try_cast_buffer(&self.values)?,
        })
    }

    /// Elementwise transform, keeping the axes.
    pub fn map<O: Unit, F: FnMut(&E) -> O>(&self, f: F) -> NdFrame<O> {
        NdFrame {
            config: self.config.clone(),
            axes: self.axes.clone(),
            values: self.values.map(f),
        }
    }

    /// A frame with the same axes whose buffer is a fresh allocation.
    pub fn deep_copy(&self) -> Self {
        Self {
            config: self.config.clone(),
            axes: self.axes.clone(),
            values: self.values.deep_copy(),
        }
    }

    /// Renders with explicit options. [std::fmt::Display] uses the defaults.
    pub fn to_string_with(&self, options: &crate::format::PrintOptions) -> String {
        crate::format::render(self, options)
    }
}

impl<E: Unit> PartialEq for NdFrame<E> {
    /// Same kind, same labels on every axis, and equal elements. NA equals NA.
    fn eq(&self, other: &Self) -> bool {
        self.same_kind(other)
            && self.axes == other.axes
            && self.values.shape() == other.values.shape()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a == b || (a.is_na() && b.is_na()))
    }
}

impl<E: Unit> std::fmt::Display for NdFrame<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::format::render(
            self,
            &crate::format::PrintOptions::default(),
        ))
    }
}

//! [StridedArray], the shared copy-on-write buffer behind every container.
//!
//! Views produced by [StridedArray::select] and [StridedArray::permute] share the
//! parent's buffer. Writing through [StridedArray::get_mut] clones the buffer only
//! when another array still points at it.

use crate::error::Error;
use crate::shapes::{self, NdIndex};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StridedArray<E> {
    pub(crate) data: Arc<Vec<E>>,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,
    pub(crate) offset: usize,
}

impl<E: Clone> StridedArray<E> {
    /// Wraps `data` as a contiguous row-major array of `shape`.
    pub fn from_vec(data: Vec<E>, shape: Vec<usize>) -> Result<Self, Error> {
        Self::from_arc(Arc::new(data), shape)
    }

    /// Like [Self::from_vec], but takes an already shared buffer without copying it.
    pub fn from_arc(data: Arc<Vec<E>>, shape: Vec<usize>) -> Result<Self, Error> {
        let expected = shapes::num_elements(&shape);
        if data.len() != expected {
            return Err(Error::WrongNumElements {
                shape,
                expected,
                actual: data.len(),
            });
        }
        let strides = shapes::strides(&shape);
        Ok(Self {
            data,
            shape,
            strides,
            offset: 0,
        })
    }

    /// An array of `shape` with every element set to `value`.
    pub fn full(shape: Vec<usize>, value: E) -> Self {
        let n = shapes::num_elements(&shape);
        let strides = shapes::strides(&shape);
        Self {
            data: Arc::new(vec![value; n]),
            shape,
            strides,
            offset: 0,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn num_elements(&self) -> usize {
        shapes::num_elements(&self.shape)
    }

    /// Whether both arrays read from the same allocation.
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn is_contiguous(&self) -> bool {
        self.offset == 0
            && self.data.len() == self.num_elements()
            && self.strides == shapes::strides(&self.shape)
    }

    fn physical(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut i = self.offset;
        for ((&idx, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim {
                return None;
            }
            i += idx * stride;
        }
        Some(i)
    }

    /// Element at a multi-dimensional position, `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&E> {
        self.physical(index).map(|i| &self.data[i])
    }

    /// Mutable element access. Clones the buffer first if it is shared.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut E> {
        let i = self.physical(index)?;
        let data = Arc::make_mut(&mut self.data);
        Some(&mut data[i])
    }

    /// Elements in logical row-major order.
    pub fn iter(&self) -> StridedIter<'_, E> {
        StridedIter {
            data: &self.data,
            index: NdIndex::new(&self.shape, &self.strides, self.offset),
        }
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }

    /// A contiguous array with the same logical contents. Shares the buffer when
    /// `self` is already contiguous.
    pub fn to_contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }
        self.deep_copy()
    }

    /// A contiguous array backed by a freshly allocated buffer.
    pub fn deep_copy(&self) -> Self {
        Self {
            data: Arc::new(self.to_vec()),
            shape: self.shape.clone(),
            strides: shapes::strides(&self.shape),
            offset: 0,
        }
    }

    /// View with `axis` fixed at position `i`. The result has one dimension fewer.
    pub fn select(&self, axis: usize, i: usize) -> Result<Self, Error> {
        let dim = self.check_axis(axis)?;
        if i >= dim {
            return Err(Error::IndexOutOfBounds { index: i, len: dim });
        }
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.remove(axis);
        let stride = strides.remove(axis);
        Ok(Self {
            data: self.data.clone(),
            shape,
            strides,
            offset: self.offset + i * stride,
        })
    }

    /// View whose axis `k` is axis `perm[k]` of `self`.
    pub fn permute(&self, perm: &[usize]) -> Result<Self, Error> {
        let n = self.ndim();
        let mut seen = vec![false; n];
        if perm.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: perm.len(),
            });
        }
        for &p in perm {
            if p >= n || seen[p] {
                return Err(Error::UnknownAxis(p.to_string()));
            }
            seen[p] = true;
        }
        Ok(Self {
            data: self.data.clone(),
            shape: perm.iter().map(|&p| self.shape[p]).collect(),
            strides: perm.iter().map(|&p| self.strides[p]).collect(),
            offset: self.offset,
        })
    }

    /// Gathers along `axis`: output position `j` reads input position `indexer[j]`,
    /// or is `fill` when that is `None`.
    pub fn take(&self, axis: usize, indexer: &[Option<usize>], fill: E) -> Result<Self, Error> {
        let dim = self.check_axis(axis)?;
        if let Some(&bad) = indexer.iter().flatten().find(|&&i| i >= dim) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                len: dim,
            });
        }
        let mut shape = self.shape.clone();
        shape[axis] = indexer.len();
        let numel = shapes::num_elements(&shape);
        let mut data = Vec::with_capacity(numel);
        let mut out_index = NdIndex::new(&shape, &shapes::strides(&shape), 0);
        let mut src = vec![0; shape.len()];
        while let Some((_, idx)) = out_index.next_with_idx() {
            src.copy_from_slice(&idx);
            match indexer[idx[axis]] {
                Some(j) => {
                    src[axis] = j;
                    let i = self.physical(&src).ok_or(Error::IndexOutOfBounds {
                        index: j,
                        len: dim,
                    })?;
                    data.push(self.data[i].clone());
                }
                None => data.push(fill.clone()),
            }
        }
        Self::from_vec(data, shape)
    }

    /// Stacks equally shaped arrays along a new leading axis.
    pub fn stack(parts: &[Self], inner: &[usize]) -> Result<Self, Error> {
        let mut data = Vec::with_capacity(parts.len() * shapes::num_elements(inner));
        for part in parts {
            if part.shape() != inner {
                return Err(Error::DimensionMismatch {
                    expected: inner.len(),
                    actual: part.ndim(),
                });
            }
            data.extend(part.iter().cloned());
        }
        let mut shape = Vec::with_capacity(inner.len() + 1);
        shape.push(parts.len());
        shape.extend_from_slice(inner);
        Self::from_vec(data, shape)
    }

    /// Elementwise transform into a new contiguous array.
    pub fn map<O: Clone, F: FnMut(&E) -> O>(&self, f: F) -> StridedArray<O> {
        StridedArray {
            data: Arc::new(self.iter().map(f).collect()),
            shape: self.shape.clone(),
            strides: shapes::strides(&self.shape),
            offset: 0,
        }
    }

    fn check_axis(&self, axis: usize) -> Result<usize, Error> {
        self.shape
            .get(axis)
            .copied()
            .ok_or_else(|| Error::UnknownAxis(axis.to_string()))
    }
}

impl<E: PartialEq + Clone> PartialEq for StridedArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

pub struct StridedIter<'a, E> {
    data: &'a [E],
    index: NdIndex,
}

impl<'a, E> Iterator for StridedIter<'a, E> {
    type Item = &'a E;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.index.next().map(|i| &self.data[i])
    }
}

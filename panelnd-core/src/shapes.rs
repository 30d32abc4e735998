//! Runtime shape helpers: row-major strides and the strided [NdIndex] walker.

/// The number of elements in a shape; the product of all dimensions.
#[inline(always)]
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// The strides of how a contiguous row-major shape is layed out in memory.
pub fn strides(shape: &[usize]) -> Vec<usize> {
    let mut out = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        out[i] = out[i + 1] * shape[i + 1];
    }
    out
}

/// Walks the physical offsets of a strided array in logical (row-major) order.
///
/// A walker is driven either by [NdIndex::next] or by [NdIndex::next_with_idx], never
/// both: the contiguous fast path of `next` does not maintain the coordinates.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct NdIndex {
    shape: Vec<usize>,
    strides: Vec<usize>,
    coords: Vec<usize>,
    offset: usize,
    remaining: usize,
    started: bool,
    contiguous: bool,
}

impl NdIndex {
    pub(crate) fn new(shape: &[usize], strides: &[usize], offset: usize) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            coords: vec![0; shape.len()],
            offset,
            remaining: num_elements(shape),
            started: false,
            contiguous: strides == self::strides(shape).as_slice(),
        }
    }

    /// Odometer step: bumps the innermost coordinate and carries outwards.
    fn step(&mut self) {
        for dim in (0..self.shape.len()).rev() {
            self.coords[dim] += 1;
            self.offset += self.strides[dim];
            if self.coords[dim] < self.shape[dim] {
                return;
            }
            self.offset -= self.coords[dim] * self.strides[dim];
            self.coords[dim] = 0;
        }
    }

    #[inline(always)]
    pub(crate) fn next(&mut self) -> Option<usize> {
        if !self.contiguous {
            return self.next_with_idx().map(|(i, _)| i);
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let i = self.offset;
        self.offset += 1;
        Some(i)
    }

    /// The next physical offset together with its logical coordinates.
    pub(crate) fn next_with_idx(&mut self) -> Option<(usize, &[usize])> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            self.step();
        }
        self.started = true;
        self.remaining -= 1;
        Some((self.offset, &self.coords))
    }
}

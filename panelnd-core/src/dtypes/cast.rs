use super::{Dtype, Unit};
use crate::{error::Error, storage::StridedArray};
use std::any::Any;

/// Fallible element conversion between [Unit]s.
///
/// Numeric conversions go through [num_traits::NumCast], so NaN into an integer
/// type or an out of range value fails instead of wrapping.
pub trait CastTo<E: Unit>: Unit {
    fn try_cast(self) -> Option<E>;
}

impl<A: Dtype, B: Dtype> CastTo<B> for A {
    #[inline(always)]
    fn try_cast(self) -> Option<B> {
        <B as num_traits::NumCast>::from(self)
    }
}

impl CastTo<bool> for bool {
    #[inline(always)]
    fn try_cast(self) -> Option<bool> {
        Some(self)
    }
}

/// Converts every logical element of `array` to `Dst`.
///
/// When `Src` and `Dst` are the same type, the returned array shares the input's buffer.
pub(crate) fn try_cast_buffer<Src: CastTo<Dst>, Dst: Unit>(
    array: &StridedArray<Src>,
) -> Result<StridedArray<Dst>, Error> {
    if let Some(same) = (array as &dyn Any).downcast_ref::<StridedArray<Dst>>() {
        return Ok(same.clone());
    }
    tracing::trace!(target: "panelnd::dtype", from = %Src::DTYPE, to = %Dst::DTYPE, "casting buffer");
    let mut data = Vec::with_capacity(array.num_elements());
    for x in array.iter() {
        match x.try_cast() {
            Some(y) => data.push(y),
            None => {
                return Err(Error::DtypeCoercion {
                    from: Src::DTYPE,
                    to: Dst::DTYPE,
                    value: x.to_string(),
                })
            }
        }
    }
    StridedArray::from_vec(data, array.shape().to_vec())
}

//! Module for data type related traits and structs. Contains things like [Unit], [Dtype], and [DType].
//!
//! Every element stored in a [crate::frame::NdFrame] is a [Unit]. Units carry a runtime
//! [DType] tag, which is what the text renderer and error messages report, and an optional
//! missing-value marker used when alignment has to invent cells.
//!
//! # Conversions
//!
//! [CastTo] is the fallible element conversion used when a constructor is asked to force
//! a dtype, or by [crate::frame::NdFrame::try_to_dtype].

mod cast;

pub use cast::CastTo;
pub(crate) use cast::try_cast_buffer;

/// Runtime tag naming the element type of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl DType {
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_integer(&self) -> bool {
        !self.is_float() && !matches!(self, Self::Bool)
    }

    /// Floats and integers. `bool` is not numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Bool)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a unit type, but no arithmetic.
pub trait Unit:
    'static
    + Copy
    + Clone
    + Default
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + std::marker::Unpin
{
    const DTYPE: DType;
    /// The value used for cells that alignment or reindexing had to invent.
    /// `None` means this type cannot represent a missing value.
    const NA: Option<Self>;

    #[inline(always)]
    fn is_na(&self) -> bool {
        false
    }

    /// Widening view used by the float renderer. `None` for non-numeric units.
    fn as_f64(&self) -> Option<f64>;
}

macro_rules! unit {
    ($type:ty, $dtype:expr) => {
        impl Unit for $type {
            const DTYPE: DType = $dtype;
            const NA: Option<Self> = None;
            #[inline(always)]
            fn as_f64(&self) -> Option<f64> {
                Some(*self as f64)
            }
        }
    };
}

macro_rules! float_unit {
    ($type:ty, $dtype:expr) => {
        impl Unit for $type {
            const DTYPE: DType = $dtype;
            const NA: Option<Self> = Some(<$type>::NAN);
            #[inline(always)]
            fn is_na(&self) -> bool {
                self.is_nan()
            }
            #[inline(always)]
            fn as_f64(&self) -> Option<f64> {
                Some(*self as f64)
            }
        }
    };
}

float_unit!(f32, DType::Float32);
float_unit!(f64, DType::Float64);
unit!(u8, DType::UInt8);
unit!(u16, DType::UInt16);
unit!(u32, DType::UInt32);
unit!(u64, DType::UInt64);
unit!(usize, DType::UInt64);
unit!(i8, DType::Int8);
unit!(i16, DType::Int16);
unit!(i32, DType::Int32);
unit!(i64, DType::Int64);
unit!(isize, DType::Int64);

impl Unit for bool {
    const DTYPE: DType = DType::Bool;
    const NA: Option<Self> = None;
    fn as_f64(&self) -> Option<f64> {
        None
    }
}

/// Represents a data type or element of an array that can have
/// arithmatic operations applied to it. The main difference
/// between [Dtype] and [Unit] is that [`bool`] is [Unit], but
/// not [Dtype].
///
/// The `*_checked` methods return `None` when an integer result does not fit.
/// Floats never fail and follow IEEE rules.
pub trait Dtype:
    Unit
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::Mul<Self, Output = Self>
    + std::ops::Div<Self, Output = Self>
    + std::ops::AddAssign
    + num_traits::Zero
    + num_traits::NumCast
    + num_traits::ToPrimitive
{
    fn add_checked(self, rhs: Self) -> Option<Self>;
    fn sub_checked(self, rhs: Self) -> Option<Self>;
    fn mul_checked(self, rhs: Self) -> Option<Self>;
    /// `None` for a zero integer divisor as well as for `MIN / -1`.
    fn div_checked(self, rhs: Self) -> Option<Self>;
}

macro_rules! float_dtype {
    ($($type:ty),*) => {
        $(
            impl Dtype for $type {
                #[inline(always)]
                fn add_checked(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
                #[inline(always)]
                fn sub_checked(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }
                #[inline(always)]
                fn mul_checked(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }
                #[inline(always)]
                fn div_checked(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }
            }
        )*
    };
}

macro_rules! int_dtype {
    ($($type:ty),*) => {
        $(
            impl Dtype for $type {
                #[inline(always)]
                fn add_checked(self, rhs: Self) -> Option<Self> {
                    num_traits::CheckedAdd::checked_add(&self, &rhs)
                }
                #[inline(always)]
                fn sub_checked(self, rhs: Self) -> Option<Self> {
                    num_traits::CheckedSub::checked_sub(&self, &rhs)
                }
                #[inline(always)]
                fn mul_checked(self, rhs: Self) -> Option<Self> {
                    num_traits::CheckedMul::checked_mul(&self, &rhs)
                }
                #[inline(always)]
                fn div_checked(self, rhs: Self) -> Option<Self> {
                    num_traits::CheckedDiv::checked_div(&self, &rhs)
                }
            }
        )*
    };
}

float_dtype!(f32, f64);
int_dtype!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

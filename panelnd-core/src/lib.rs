//! # panelnd-core
//!
//! The engine behind labeled N-dimensional containers. Every container kind is an
//! [frame::NdFrame] interpreted through an [config::NdConfig]: a declarative record
//! naming the axes, their aliases, the lower-dimensional kind that slices produce,
//! and the default axis for reductions.
//!
//! ```rust
//! # use panelnd_core::prelude::*;
//! let series = NdConfig::builder("Series").axis_orders(["index"]).build().unwrap();
//! let frame = NdConfig::builder("DataFrame")
//!     .axis_orders(["index", "columns"])
//!     .slicer(series)
//!     .build()
//!     .unwrap();
//! let data = NdData::array(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
//! let args = InitArgs::new(Some(data), 2).axis(1, Index::new(["a", "b"]).unwrap());
//! let df = NdFrame::init_data(&frame, args).unwrap();
//! assert_eq!(df.get_value([Label::from(1), Label::from("a")]).unwrap(), 3.0);
//! let col = df.xs("b", "columns").unwrap();
//! assert_eq!(col.klass_name(), "Series");
//! ```
//!
//! # Modules
//!
//! - [dtypes]: element types, their runtime tags and conversions
//! - [index]: labels and the ordered unique [index::Index]
//! - [storage]: the shared copy-on-write strided buffer
//! - [config]: axis configuration records
//! - [frame]: the container and its operations
//! - [format]: console text rendering
//! - [panel]: the trait implemented by declared container types
//! - [error]: the one error type every fallible operation returns

extern crate self as panelnd_core;

pub mod config;
pub mod dtypes;
pub mod error;
pub mod format;
pub mod frame;
pub mod index;
pub mod panel;
pub mod shapes;
pub mod storage;

pub use error::Error;

/// Contains subset of all public exports.
pub mod prelude {
    pub use crate::config::{NdConfig, NdConfigBuilder};
    pub use crate::dtypes::{CastTo, DType, Dtype, Unit};
    pub use crate::error::Error;
    pub use crate::format::{EngFormat, Justify, PrintOptions};
    pub use crate::frame::{InitArgs, IntoAxis, NdData, NdFrame};
    pub use crate::index::{Index, Label};
    pub use crate::panel::NdPanel;
    pub use crate::storage::StridedArray;
}

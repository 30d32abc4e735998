//! # panelnd
//!
//! Labeled N-dimensional containers. Every container type here is a configuration
//! record plus a typed constructor over one generic engine, [NdFrame]:
//!
//! | type | axes | slices into |
//! | --- | --- | --- |
//! | [Series] | `index` | elements |
//! | [DataFrame] | `index`, `columns` | [Series] |
//! | [Panel] | `items`, `major_axis`, `minor_axis` | [DataFrame] |
//! | [Panel4D] | `labels`, `items`, `major_axis`, `minor_axis` | [Panel] |
//!
//! New types are declared with `#[derive(NdPanel)]`; see [panelnd_derives::NdPanel]
//! for the attribute syntax.
//!
//! # Building containers
//!
//! Every type has a fixed-arity `try_new(data, <one Option<Index> per axis>, copy)`.
//! The data is an [NdData]: an array whose dimensions follow the axis order, a list
//! of `(label, slice)` pairs, or a scalar.
//!
//! ```rust
//! # use panelnd::prelude::*;
//! let data = NdData::array((0..12).map(f64::from).collect(), vec![2, 2, 3]).unwrap();
//! let items = Index::new(["a", "b"]).unwrap();
//! let p = Panel::try_new(Some(data), Some(items), None, None, false).unwrap();
//! assert_eq!(p.shape(), [2, 2, 3]);
//!
//! let df: DataFrame<f64> = p.get("b").unwrap();
//! assert_eq!(df.get_value([Label::from(1), Label::from(2)]).unwrap(), 11.0);
//!
//! let p4 = Panel4D::try_new(
//!     Some(NdData::dict([("l0", p.clone().into_frame()), ("l1", p.into_frame())])),
//!     None,
//!     None,
//!     None,
//!     None,
//!     false,
//! )
//! .unwrap();
//! assert_eq!(p4.shape(), [2, 2, 2, 3]);
//! ```
//!
//! # Axes and aliases
//!
//! Any operation taking an axis accepts a position, the canonical name or an alias
//! (see [IntoAxis]). Reductions given `None` use the type's statistics axis.
//!
//! ```rust
//! # use panelnd::prelude::*;
//! let data = NdData::array(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![1, 2, 3]).unwrap();
//! let p = Panel::try_new(Some(data), None, None, None, false).unwrap();
//! let by_alias = p.sum("major").unwrap();
//! assert_eq!(by_alias, p.sum(None::<usize>).unwrap());
//! // rows are the remaining items, columns the minor axis
//! assert_eq!(by_alias.get_value([Label::from(0), Label::from(2)]).unwrap(), 9.0);
//! ```
//!
//! # Logging
//!
//! Ingestion, alignment and dtype conversion emit [tracing] events under the
//! `panelnd::*` targets. No subscriber is installed.

extern crate self as panelnd;

mod dataframe;
pub mod panel;
mod panel4d;
mod series;

pub use dataframe::DataFrame;
pub use panel::Panel;
pub use panel4d::{panel4d_init, Panel4D};
pub use series::Series;

pub use panelnd_core::config::{NdConfig, NdConfigBuilder};
pub use panelnd_core::dtypes::{CastTo, DType, Dtype, Unit};
pub use panelnd_core::format::{Justify, PrintOptions};
pub use panelnd_core::frame::{InitArgs, IntoAxis, NdData, NdFrame};
pub use panelnd_core::index::{Index, Label};
pub use panelnd_core::panel::{check_kind, NdPanel};
pub use panelnd_core::storage::StridedArray;
pub use panelnd_core::{config, dtypes, error, format, frame, index, shapes, storage, Error};
pub use panelnd_derives::NdPanel;

/// Contains subset of all public exports.
pub mod prelude {
    pub use panelnd_core::prelude::*;
    pub use panelnd_derives::NdPanel;

    pub use crate::{DataFrame, Panel, Panel4D, Series};
}

//! The three-dimensional [Panel].

use crate::DataFrame;
use panelnd_core::dtypes::Unit;
use panelnd_core::frame::NdFrame;
use panelnd_derives::NdPanel;

/// A labeled cube of `items` x `major_axis` x `minor_axis`.
///
/// Each item is a [DataFrame] whose index is the major axis and whose columns are
/// the minor axis. Reductions default to the major axis.
#[derive(NdPanel)]
#[panel(
    axis_orders(items, major_axis, minor_axis),
    axis_slices(major_axis = index, minor_axis = columns),
    slicer = DataFrame,
    axis_aliases(major = major_axis, minor = minor_axis),
    stat_axis = 1,
)]
pub struct Panel<E: Unit>(NdFrame<E>);

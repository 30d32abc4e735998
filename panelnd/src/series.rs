use panelnd_core::dtypes::Unit;
use panelnd_core::frame::NdFrame;
use panelnd_derives::NdPanel;

/// One-dimensional labeled array.
///
/// [Series::get] returns the element at a label rather than a slice.
#[derive(NdPanel)]
#[panel(axis_orders(index))]
pub struct Series<E: Unit>(NdFrame<E>);

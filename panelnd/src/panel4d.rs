//! The four-dimensional [Panel4D].

use crate::Panel;
use panelnd_core::config::NdConfig;
use panelnd_core::dtypes::Unit;
use panelnd_core::error::Error;
use panelnd_core::frame::{InitArgs, NdFrame};
use panelnd_derives::NdPanel;
use std::sync::Arc;

/// A labeled hypercube of `labels` x `items` x `major_axis` x `minor_axis`.
///
/// Each label is a [Panel]. Reductions default to the major axis, and `major` and
/// `minor` are accepted wherever an axis is.
///
/// ```rust
/// # use panelnd::prelude::*;
/// let axes = <Panel4D<f64> as NdPanel<f64>>::config().axis_orders();
/// assert_eq!(axes, ["labels", "items", "major_axis", "minor_axis"]);
/// ```
#[derive(NdPanel)]
#[panel(
    axis_orders(labels, items, major_axis, minor_axis),
    axis_slices(
        labels = labels,
        items = items,
        major_axis = major_axis,
        minor_axis = minor_axis,
    ),
    slicer = Panel,
    axis_aliases(major = major_axis, minor = minor_axis),
    stat_axis = 2,
    constructor = panel4d_init,
)]
pub struct Panel4D<E: Unit>(NdFrame<E>);

/// Constructor declared for [Panel4D]. Hands its arguments unchanged to the shared
/// initializer.
pub fn panel4d_init<E: Unit>(
    config: &Arc<NdConfig>,
    args: InitArgs<E>,
) -> Result<NdFrame<E>, Error> {
    tracing::trace!(target: "panelnd::init", klass = config.klass_name(), "panel4d_init");
    NdFrame::init_data(config, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_config_record() {
        let config = <Panel4D<f32> as NdPanel<f32>>::config();
        assert_eq!(config.klass_name(), "Panel4D");
        assert_eq!(config.stat_axis(), 2);
        assert_eq!(config.ndim(), 4);
        assert_eq!(
            config.slicer().map(|s| s.klass_name()),
            Some("Panel")
        );
        assert_eq!(config.resolve_axis_name("minor").unwrap(), 3);
        let slices: Vec<(&str, &str)> = config
            .axis_slices()
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(
            slices,
            [
                ("labels", "labels"),
                ("items", "items"),
                ("major_axis", "major_axis"),
                ("minor_axis", "minor_axis"),
            ]
        );
        // one record, whatever the element type
        assert!(Arc::ptr_eq(
            config,
            <Panel4D<i64> as NdPanel<i64>>::config()
        ));
    }

    #[test]
    fn test_constructor_matches_shared_initializer() {
        let data = NdData::array((0..16).map(f64::from).collect(), vec![2, 2, 2, 2]).unwrap();
        let args = InitArgs::new(Some(data.clone()), 4);
        let direct = panel4d_init(<Panel4D<f64> as NdPanel<f64>>::config(), args).unwrap();
        let shim = Panel4D::try_new(Some(data), None, None, None, None, false).unwrap();
        assert_eq!(shim.frame(), &direct);
    }

    #[test]
    fn test_errors_pass_through() {
        let data = NdData::array(vec![0.0; 8], vec![2, 2, 2]).unwrap();
        assert!(matches!(
            Panel4D::try_new(Some(data), None, None, None, None, false),
            Err(Error::DimensionMismatch { expected: 4, actual: 3 })
        ));
        let data = NdData::array(vec![0.0; 16], vec![2, 2, 2, 2]).unwrap();
        assert!(matches!(
            Panel4D::try_new(Some(data), Some(Index::range(3)), None, None, None, false),
            Err(Error::AxisLengthMismatch { expected: 2, actual: 3, .. })
        ));
    }
}

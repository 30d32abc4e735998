use crate::Series;
use panelnd_core::dtypes::Unit;
use panelnd_core::frame::NdFrame;
use panelnd_derives::NdPanel;

/// Two-dimensional labeled table.
///
/// [DataFrame::get] slices a row along `index`. Columns are cross-sections:
/// `df.xs(label, "columns")`.
#[derive(NdPanel)]
#[panel(axis_orders(index, columns), slicer = Series)]
pub struct DataFrame<E: Unit>(NdFrame<E>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn frame() -> DataFrame<i64> {
        let data = NdData::array(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        DataFrame::try_new(
            Some(data),
            Some(Index::new(["r0", "r1"]).unwrap()),
            Some(Index::new(["a", "b", "c"]).unwrap()),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_row_and_column_slices() {
        let df = frame();
        let row: Series<i64> = df.get("r1").unwrap();
        assert_eq!(row.index(), df.columns());
        assert_eq!(row.get("c").unwrap(), 6);

        let col = Series::from_frame(df.xs("b", "columns").unwrap()).unwrap();
        assert_eq!(col.index(), df.index());
        assert_eq!(col.get("r0").unwrap(), 2);
    }

    #[test]
    fn test_default_reduction_is_over_rows() {
        let df = frame();
        let sums = Series::from_frame(df.sum(None::<usize>).unwrap()).unwrap();
        assert_eq!(sums.index(), df.columns());
        assert_eq!(sums.get("a").unwrap(), 5);
        assert_eq!(sums.get("c").unwrap(), 9);
    }

    #[test]
    fn test_table_rendering() {
        assert_eq!(
            frame().to_string(),
            "    a  b  c\nr0  1  2  3\nr1  4  5  6"
        );
    }
}

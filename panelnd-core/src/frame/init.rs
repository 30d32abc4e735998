use super::NdFrame;
use crate::config::NdConfig;
use crate::dtypes::{try_cast_buffer, CastTo, Unit};
use crate::error::Error;
use crate::index::{Index, Label};
use crate::panel::check_kind;
use crate::storage::StridedArray;
use std::sync::Arc;

/// Raw input accepted by [NdFrame::init_data].
#[derive(Debug, Clone)]
pub enum NdData<E> {
    /// A homogeneous array whose dimensions follow the container's axis order.
    Array(StridedArray<E>),
    /// Outer label to slicer instance, in insertion order.
    Dict(Vec<(Label, NdFrame<E>)>),
    /// One value broadcast to every cell. Every axis must be given.
    Scalar(E),
}

impl<E: Unit> NdData<E> {
    /// Array input from a flat row-major buffer.
    pub fn array(data: Vec<E>, shape: Vec<usize>) -> Result<Self, Error> {
        StridedArray::from_vec(data, shape).map(Self::Array)
    }

    pub fn dict<I, L>(items: I) -> Self
    where
        I: IntoIterator<Item = (L, NdFrame<E>)>,
        L: Into<Label>,
    {
        Self::Dict(items.into_iter().map(|(l, f)| (l.into(), f)).collect())
    }

    /// Converts every element to `E2`. Same-type conversion keeps array buffers shared.
    pub fn try_cast<E2: Unit>(self) -> Result<NdData<E2>, Error>
    where
        E: CastTo<E2>,
    {
        Ok(match self {
            Self::Array(a) => NdData::Array(try_cast_buffer(&a)?),
            Self::Dict(items) => NdData::Dict(
                items
                    .into_iter()
                    .map(|(l, f)| f.try_to_dtype().map(|f| (l, f)))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Scalar(v) => NdData::Scalar(v.try_cast().ok_or_else(|| Error::DtypeCoercion {
                from: E::DTYPE,
                to: E2::DTYPE,
                value: v.to_string(),
            })?),
        })
    }
}

impl<E> From<StridedArray<E>> for NdData<E> {
    fn from(array: StridedArray<E>) -> Self {
        Self::Array(array)
    }
}

/// Arguments of the shared initializer: data, one optional index per axis, and
/// whether array input is copied.
#[derive(Debug, Clone)]
pub struct InitArgs<E> {
    pub data: Option<NdData<E>>,
    pub axes: Vec<Option<Index>>,
    pub copy: bool,
}

impl<E: Unit> InitArgs<E> {
    pub fn new(data: Option<NdData<E>>, ndim: usize) -> Self {
        Self {
            data,
            axes: vec![None; ndim],
            copy: false,
        }
    }

    /// Sets the explicit index of axis `i`. Out of range positions are ignored
    /// here and reported by [NdFrame::init_data] as a dimension mismatch.
    pub fn axis(mut self, i: usize, index: Index) -> Self {
        if i >= self.axes.len() {
            self.axes.resize(i + 1, None);
        }
        self.axes[i] = Some(index);
        self
    }

    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Converts the data to `E2`, keeping the axes and copy flag.
    pub fn try_cast<E2: Unit>(self) -> Result<InitArgs<E2>, Error>
    where
        E: CastTo<E2>,
    {
        Ok(InitArgs {
            data: self.data.map(NdData::try_cast).transpose()?,
            axes: self.axes,
            copy: self.copy,
        })
    }
}

fn na<E: Unit>() -> Result<E, Error> {
    E::NA.ok_or(Error::MissingValue(E::DTYPE))
}

impl<E: Unit> NdFrame<E> {
    /// Initializes a container of kind `config` from data and axis specs.
    ///
    /// Detects which input shape was given, validates axis lengths, builds any
    /// index that was not given, and populates storage. See [NdData] for the
    /// accepted inputs.
    pub fn init_data(config: &Arc<NdConfig>, args: InitArgs<E>) -> Result<Self, Error> {
        if args.axes.len() != config.ndim() {
            return Err(Error::DimensionMismatch {
                expected: config.ndim(),
                actual: args.axes.len(),
            });
        }
        match args.data {
            None => Self::from_axes(config, args.axes),
            Some(NdData::Scalar(v)) => Self::from_scalar(config, args.axes, v),
            Some(NdData::Array(a)) => Self::from_array(config, args.axes, a, args.copy),
            Some(NdData::Dict(d)) => Self::from_dict(config, args.axes, d),
        }
    }

    fn from_axes(config: &Arc<NdConfig>, axes: Vec<Option<Index>>) -> Result<Self, Error> {
        let axes: Vec<Index> = axes.into_iter().map(Option::unwrap_or_default).collect();
        let shape: Vec<usize> = axes.iter().map(Index::len).collect();
        let fill = if crate::shapes::num_elements(&shape) == 0 {
            E::default()
        } else {
            na()?
        };
        tracing::debug!(target: "panelnd::init", klass = %config, ?shape, "init from axes only");
        Self::from_parts(config.clone(), axes, StridedArray::full(shape, fill))
    }

    fn from_scalar(config: &Arc<NdConfig>, axes: Vec<Option<Index>>, v: E) -> Result<Self, Error> {
        let axes = axes
            .into_iter()
            .enumerate()
            .map(|(i, a)| a.ok_or_else(|| Error::MissingAxis(config.axis_orders()[i].clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let shape: Vec<usize> = axes.iter().map(Index::len).collect();
        tracing::debug!(target: "panelnd::init", klass = %config, ?shape, "init from scalar");
        Self::from_parts(config.clone(), axes, StridedArray::full(shape, v))
    }

    fn from_array(
        config: &Arc<NdConfig>,
        axes: Vec<Option<Index>>,
        values: StridedArray<E>,
        copy: bool,
    ) -> Result<Self, Error> {
        if values.ndim() != config.ndim() {
            return Err(Error::DimensionMismatch {
                expected: config.ndim(),
                actual: values.ndim(),
            });
        }
        let mut built = Vec::with_capacity(axes.len());
        for (i, (given, &len)) in axes.into_iter().zip(values.shape()).enumerate() {
            let index = match given {
                Some(index) if index.len() != len => {
                    return Err(Error::AxisLengthMismatch {
                        axis: config.axis_orders()[i].clone(),
                        expected: len,
                        actual: index.len(),
                    })
                }
                Some(index) => index,
                None => Index::range(len),
            };
            built.push(index);
        }
        tracing::debug!(
            target: "panelnd::init",
            klass = %config,
            shape = ?values.shape(),
            copy,
            "init from array"
        );
        let values = if copy { values.deep_copy() } else { values };
        Self::from_parts(config.clone(), built, values)
    }

    fn from_dict(
        config: &Arc<NdConfig>,
        mut axes: Vec<Option<Index>>,
        items: Vec<(Label, NdFrame<E>)>,
    ) -> Result<Self, Error> {
        let (slicer, layout) = config.slice_layout(0)?;
        for (_, value) in &items {
            if value.ndim() != slicer.ndim() {
                return Err(Error::DimensionMismatch {
                    expected: slicer.ndim(),
                    actual: value.ndim(),
                });
            }
            check_kind(&slicer, value)?;
        }
        let keys = Index::from_labels(items.iter().map(|(l, _)| l.clone()).collect())?;
        let outer = axes[0].take().unwrap_or_else(|| keys.clone());

        // inner axes in parent order: given, or the union over every value
        let mut inner: Vec<Index> = Vec::with_capacity(layout.len());
        for parent in 1..config.ndim() {
            let slot = layout
                .iter()
                .position(|&p| p == parent)
                .ok_or(Error::UnknownAxis(parent.to_string()))?;
            let index = match axes[parent].take() {
                Some(index) => index,
                None => {
                    let mut union: Option<Index> = None;
                    for (_, value) in &items {
                        let a = &value.axes[slot];
                        union = Some(match union {
                            Some(u) => u.union(a),
                            None => a.clone(),
                        });
                    }
                    union.unwrap_or_default()
                }
            };
            inner.push(index);
        }

        let inner_shape: Vec<usize> = inner.iter().map(Index::len).collect();
        let chunk = crate::shapes::num_elements(&inner_shape);
        let mut inv = vec![0; layout.len()];
        for (slot, &parent) in layout.iter().enumerate() {
            inv[parent - 1] = slot;
        }

        let mut parts = Vec::with_capacity(outer.len());
        let mut filled = 0usize;
        for label in outer.iter() {
            match keys.get_loc(label) {
                Some(k) => {
                    let mut value = items[k].1.clone();
                    for (slot, &parent) in layout.iter().enumerate() {
                        value = value.reindex(slot, inner[parent - 1].clone())?;
                    }
                    parts.push(value.values.permute(&inv)?);
                }
                None if chunk == 0 => {
                    parts.push(StridedArray::full(inner_shape.clone(), E::default()));
                }
                None => {
                    filled += 1;
                    parts.push(StridedArray::full(inner_shape.clone(), na::<E>()?));
                }
            }
        }
        tracing::debug!(
            target: "panelnd::init",
            klass = %config,
            slices = items.len(),
            filled,
            "init from dict of {}",
            slicer
        );
        let values = StridedArray::stack(&parts, &inner_shape)?;
        let mut all = Vec::with_capacity(config.ndim());
        all.push(outer);
        all.extend(inner);
        Self::from_parts(config.clone(), all, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn test_array_shares_buffer_unless_copied() {
        let cfg = frame_config();
        let a = StridedArray::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        let f = NdFrame::init_data(&cfg, InitArgs::new(Some(NdData::Array(a.clone())), 2)).unwrap();
        assert!(f.values().shares_buffer(&a));
        let f = NdFrame::init_data(&cfg, InitArgs::new(Some(NdData::Array(a.clone())), 2).copy(true))
            .unwrap();
        assert!(!f.values().shares_buffer(&a));
        assert_eq!(f.values(), &a);
    }

    #[test]
    fn test_array_axis_length_mismatch() {
        let cfg = frame_config();
        let data = NdData::array(vec![0i32; 6], vec![2, 3]).unwrap();
        let args = InitArgs::new(Some(data), 2).axis(1, Index::new(["a", "b"]).unwrap());
        let r = NdFrame::init_data(&cfg, args);
        assert!(matches!(
            r,
            Err(Error::AxisLengthMismatch { axis, expected: 3, actual: 2 }) if axis == "columns"
        ));
    }

    #[test]
    fn test_array_wrong_ndim() {
        let cfg = panel_config();
        let data = NdData::array(vec![0.0f32; 6], vec![2, 3]).unwrap();
        let r = NdFrame::init_data(&cfg, InitArgs::new(Some(data), 3));
        assert!(matches!(
            r,
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_default_axes_are_ranges() {
        let cfg = frame_config();
        let data = NdData::array(vec![0u8; 6], vec![2, 3]).unwrap();
        let f = NdFrame::init_data(&cfg, InitArgs::new(Some(data), 2)).unwrap();
        assert_eq!(f.axis("index").unwrap(), &Index::range(2));
        assert_eq!(f.axis("columns").unwrap(), &Index::range(3));
    }

    #[test]
    fn test_scalar_broadcast_requires_axes() {
        let cfg = frame_config();
        let args = InitArgs::new(Some(NdData::Scalar(7i64)), 2).axis(0, Index::range(2));
        assert!(matches!(
            NdFrame::init_data(&cfg, args.clone()),
            Err(Error::MissingAxis(a)) if a == "columns"
        ));
        let f = NdFrame::init_data(&cfg, args.axis(1, Index::range(3))).unwrap();
        assert!(f.values().iter().all(|&x| x == 7));
    }

    #[test]
    fn test_no_data_fills_na() {
        let cfg = frame_config();
        let args = InitArgs::<f64>::new(None, 2)
            .axis(0, Index::range(2))
            .axis(1, Index::range(2));
        let f = NdFrame::init_data(&cfg, args).unwrap();
        assert!(f.values().iter().all(|x| x.is_nan()));

        let args = InitArgs::<i32>::new(None, 2)
            .axis(0, Index::range(2))
            .axis(1, Index::range(2));
        assert!(matches!(
            NdFrame::init_data(&cfg, args),
            Err(Error::MissingValue(_))
        ));

        let empty = NdFrame::init_data(&cfg, InitArgs::<i32>::new(None, 2)).unwrap();
        assert_eq!(empty.shape(), &[0, 0]);
    }

    #[test]
    fn test_dict_keeps_key_order_and_unions_inner_axes() {
        let p = arange_panel();
        let a = p.get("i0").unwrap();
        let b = p
            .get("i1")
            .unwrap()
            .reindex("index", Index::new(["r2", "r9"]).unwrap())
            .unwrap();
        let cfg = p.config().clone();
        let data = NdData::dict([("z", a.clone()), ("a", b)]);
        let f = NdFrame::init_data(&cfg, InitArgs::new(Some(data), 3)).unwrap();
        assert_eq!(f.axis(0usize).unwrap(), &Index::new(["z", "a"]).unwrap());
        assert_eq!(
            f.axis("major").unwrap(),
            &Index::new(["r0", "r1", "r2", "r9"]).unwrap()
        );
        assert_eq!(f.get_value(["a", "r2", "c1"]).unwrap(), 121.0);
        assert!(f.get_value(["a", "r0", "c1"]).unwrap().is_nan());
        assert!(f.get_value(["z", "r9", "c0"]).unwrap().is_nan());
        assert_eq!(f.get_value(["z", "r1", "c2"]).unwrap(), 12.0);
    }

    #[test]
    fn test_dict_with_explicit_outer_index() {
        let p = arange_panel();
        let cfg = p.config().clone();
        let data = NdData::dict([("i0", p.get("i0").unwrap()), ("i1", p.get("i1").unwrap())]);
        let args = InitArgs::new(Some(data), 3).axis(0, Index::new(["i1", "extra"]).unwrap());
        let f = NdFrame::init_data(&cfg, args).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.get("i1").unwrap(), p.get("i1").unwrap());
        assert!(f.get("extra").unwrap().values().iter().all(|x| x.is_nan()));
        assert!(f.get("i0").is_err());
    }

    #[test]
    fn test_dict_rejects_wrong_ndim_and_duplicates() {
        let p = arange_panel();
        let cfg = p.config().clone();
        let data = NdData::dict([("x", p.clone())]);
        assert!(matches!(
            NdFrame::init_data(&cfg, InitArgs::new(Some(data), 3)),
            Err(Error::DimensionMismatch { .. })
        ));
        let df = p.get("i0").unwrap();
        let data = NdData::dict([("x", df.clone()), ("x", df)]);
        assert!(matches!(
            NdFrame::init_data(&cfg, InitArgs::new(Some(data), 3)),
            Err(Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_dict_rejects_other_kinds() {
        let p = arange_panel();
        let df = p.get("i0").unwrap();
        let grid = NdConfig::builder("Grid")
            .axis_orders(["index", "columns"])
            .slicer(series_config())
            .build()
            .unwrap();
        let other = NdFrame::from_parts(grid, df.axes().to_vec(), df.values().clone()).unwrap();
        let data = NdData::dict([("a", df), ("b", other)]);
        assert!(matches!(
            NdFrame::init_data(p.config(), InitArgs::new(Some(data), 3)),
            Err(Error::ConfigMismatch { left, right }) if left == "DataFrame" && right == "Grid"
        ));

        // an equal record built separately is the same kind
        let rebuilt = NdFrame::from_parts(
            frame_config(),
            p.get("i1").unwrap().axes().to_vec(),
            p.get("i1").unwrap().values().clone(),
        )
        .unwrap();
        let data = NdData::dict([("i1", rebuilt)]);
        let f = NdFrame::init_data(p.config(), InitArgs::new(Some(data), 3)).unwrap();
        assert_eq!(f.get("i1").unwrap(), p.get("i1").unwrap());
    }

    #[test]
    fn test_dict_of_int_slices_cannot_fill() {
        let p: NdFrame<i64> = arange_panel().try_to_dtype().unwrap();
        let cfg = p.config().clone();
        let a = p.get("i0").unwrap();
        let b = a.reindex("columns", Index::new(["c0"]).unwrap()).unwrap();
        let data = NdData::dict([("a", a), ("b", b)]);
        assert!(matches!(
            NdFrame::init_data(&cfg, InitArgs::new(Some(data), 3)),
            Err(Error::MissingValue(_))
        ));
    }

    #[test]
    fn test_axis_count_mismatch() {
        let cfg = frame_config();
        let r = NdFrame::init_data(&cfg, InitArgs::<f32>::new(None, 3));
        assert!(matches!(r, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_cast_args() {
        let data = NdData::array(vec![1.5f64, 2.0], vec![2]).unwrap();
        let args = InitArgs::new(Some(data), 1).try_cast::<f32>().unwrap();
        let f = NdFrame::init_data(&series_config(), args).unwrap();
        assert_eq!(f.values().to_vec(), [1.5f32, 2.0]);

        let data = NdData::array(vec![1.5f64, f64::NAN], vec![2]).unwrap();
        let r = InitArgs::new(Some(data), 1).try_cast::<i16>();
        assert!(matches!(r, Err(Error::DtypeCoercion { .. })));
    }
}

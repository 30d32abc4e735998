//! Axis configuration records ([NdConfig]) that define every container variant.
//!
//! A variant is nothing more than a record: its name, its ordered axes, which slicer
//! axis each of its axes maps to when a slice is taken, the lower-dimensional record
//! that slices are instances of, alias names, and the default reduction axis.
//!
//! ```rust
//! # use panelnd_core::config::NdConfig;
//! let series = NdConfig::builder("Series").axis_orders(["index"]).build().unwrap();
//! let frame = NdConfig::builder("DataFrame")
//!     .axis_orders(["index", "columns"])
//!     .slicer(series)
//!     .stat_axis(0)
//!     .build()
//!     .unwrap();
//! assert_eq!(frame.resolve_axis_name("columns").unwrap(), 1);
//! ```

use crate::error::Error;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct NdConfig {
    klass_name: String,
    axis_orders: Vec<String>,
    axis_slices: Vec<(String, String)>,
    slicer: Option<Arc<NdConfig>>,
    axis_aliases: Vec<(String, String)>,
    stat_axis: usize,
}

impl NdConfig {
    pub fn builder(klass_name: impl Into<String>) -> NdConfigBuilder {
        NdConfigBuilder {
            klass_name: klass_name.into(),
            axis_orders: Vec::new(),
            axis_slices: Vec::new(),
            slicer: None,
            axis_aliases: Vec::new(),
            stat_axis: 0,
        }
    }

    pub fn klass_name(&self) -> &str {
        &self.klass_name
    }

    /// Axis names, outermost first.
    pub fn axis_orders(&self) -> &[String] {
        &self.axis_orders
    }

    pub fn ndim(&self) -> usize {
        self.axis_orders.len()
    }

    pub fn slicer(&self) -> Option<&Arc<NdConfig>> {
        self.slicer.as_ref()
    }

    pub fn axis_aliases(&self) -> &[(String, String)] {
        &self.axis_aliases
    }

    pub fn axis_slices(&self) -> &[(String, String)] {
        &self.axis_slices
    }

    /// The slicer axis that `axis` maps to when a slice is taken through another axis.
    pub fn slice_axis(&self, axis: &str) -> Option<&str> {
        self.axis_slices
            .iter()
            .find(|(from, _)| from == axis)
            .map(|(_, to)| to.as_str())
    }

    /// Default axis position for reductions.
    pub fn stat_axis(&self) -> usize {
        self.stat_axis
    }

    /// Position of a canonical axis name or alias.
    pub fn resolve_axis_name(&self, name: &str) -> Result<usize, Error> {
        let canonical = self
            .axis_aliases
            .iter()
            .find(|(alias, _)| alias == name)
            .map_or(name, |(_, target)| target.as_str());
        self.axis_orders
            .iter()
            .position(|a| a == canonical)
            .ok_or_else(|| Error::UnknownAxis(name.to_owned()))
    }

    pub fn axis_name(&self, axis: usize) -> Result<&str, Error> {
        self.axis_orders
            .get(axis)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownAxis(axis.to_string()))
    }

    /// When axis `removed` is dropped, returns the slicer record and, for each
    /// slicer position, the parent axis that fills it.
    ///
    /// The remaining parent axes, in order, take the places of the parent's trailing
    /// axes; each trailing axis name is then translated through `axis_slices` (or kept
    /// as is) to find its slicer position. Names the slicer does not know stay in place.
    pub fn slice_layout(&self, removed: usize) -> Result<(Arc<NdConfig>, Vec<usize>), Error> {
        let slicer = self
            .slicer
            .clone()
            .ok_or_else(|| Error::NoSlicer(self.klass_name.clone()))?;
        if removed >= self.ndim() {
            return Err(Error::UnknownAxis(removed.to_string()));
        }
        let targets = self.slot_targets(&slicer)?;
        let mut layout = vec![0; slicer.ndim()];
        let remaining = (0..self.ndim()).filter(|&i| i != removed);
        for (slot, parent) in remaining.enumerate() {
            layout[targets[slot]] = parent;
        }
        Ok((slicer, layout))
    }

    /// Slicer position of each trailing parent axis.
    fn slot_targets(&self, slicer: &NdConfig) -> Result<Vec<usize>, Error> {
        let mut targets = Vec::with_capacity(slicer.ndim());
        for (slot, name) in self.axis_orders[1..].iter().enumerate() {
            let to = self.slice_axis(name).unwrap_or(name);
            let pos = slicer
                .axis_orders
                .iter()
                .position(|a| a == to)
                .unwrap_or(slot);
            if targets.contains(&pos) {
                return Err(self.invalid(format!(
                    "axis {name} slices onto slicer position {pos} twice"
                )));
            }
            targets.push(pos);
        }
        Ok(targets)
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidConfig {
            klass: self.klass_name.clone(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for NdConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.klass_name)
    }
}

/// Builds and validates an [NdConfig].
#[derive(Debug, Clone)]
pub struct NdConfigBuilder {
    klass_name: String,
    axis_orders: Vec<String>,
    axis_slices: Vec<(String, String)>,
    slicer: Option<Arc<NdConfig>>,
    axis_aliases: Vec<(String, String)>,
    stat_axis: usize,
}

impl NdConfigBuilder {
    pub fn axis_orders<I, S>(mut self, axes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.axis_orders = axes.into_iter().map(Into::into).collect();
        self
    }

    pub fn axis_slices<I, A, B>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.axis_slices = slices
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect();
        self
    }

    pub fn slicer(mut self, slicer: Arc<NdConfig>) -> Self {
        self.slicer = Some(slicer);
        self
    }

    pub fn axis_aliases<I, A, B>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.axis_aliases = aliases
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect();
        self
    }

    pub fn stat_axis(mut self, axis: usize) -> Self {
        self.stat_axis = axis;
        self
    }

    pub fn build(self) -> Result<Arc<NdConfig>, Error> {
        let config = NdConfig {
            klass_name: self.klass_name,
            axis_orders: self.axis_orders,
            axis_slices: self.axis_slices,
            slicer: self.slicer,
            axis_aliases: self.axis_aliases,
            stat_axis: self.stat_axis,
        };
        validate(&config)?;
        tracing::debug!(
            target: "panelnd::config",
            klass = %config.klass_name,
            axes = ?config.axis_orders,
            stat_axis = config.stat_axis,
            "registered container type"
        );
        Ok(Arc::new(config))
    }
}

fn validate(config: &NdConfig) -> Result<(), Error> {
    let axes = &config.axis_orders;
    if axes.is_empty() {
        return Err(config.invalid("at least one axis is required"));
    }
    for (i, a) in axes.iter().enumerate() {
        if a.is_empty() {
            return Err(config.invalid("axis names must not be empty"));
        }
        if axes[..i].contains(a) {
            return Err(config.invalid(format!("axis {a} is declared twice")));
        }
    }
    for (alias, target) in &config.axis_aliases {
        if axes.contains(alias) {
            return Err(config.invalid(format!("alias {alias} shadows an axis")));
        }
        if !axes.contains(target) {
            return Err(config.invalid(format!("alias {alias} targets unknown axis {target}")));
        }
    }
    for (i, (from, to)) in config.axis_slices.iter().enumerate() {
        if !axes.contains(from) {
            return Err(config.invalid(format!("axis_slices names unknown axis {from}")));
        }
        if config.axis_slices[..i].iter().any(|(f, t)| f == from || t == to) {
            return Err(config.invalid(format!("axis_slices repeats {from} -> {to}")));
        }
    }
    if config.stat_axis >= axes.len() {
        return Err(config.invalid(format!(
            "stat_axis {} is out of range for {} axes",
            config.stat_axis,
            axes.len()
        )));
    }
    match &config.slicer {
        Some(slicer) if slicer.ndim() + 1 != axes.len() => Err(config.invalid(format!(
            "slicer {} has {} axes, expected {}",
            slicer.klass_name,
            slicer.ndim(),
            axes.len() - 1
        ))),
        Some(slicer) => config.slot_targets(slicer).map(|_| ()),
        None if axes.len() > 1 => Err(config.invalid("a slicer is required above one axis")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_config() -> Arc<NdConfig> {
        let series = NdConfig::builder("Series")
            .axis_orders(["index"])
            .build()
            .unwrap();
        NdConfig::builder("DataFrame")
            .axis_orders(["index", "columns"])
            .slicer(series)
            .build()
            .unwrap()
    }

    fn panel_config() -> Arc<NdConfig> {
        NdConfig::builder("Panel")
            .axis_orders(["items", "major_axis", "minor_axis"])
            .axis_slices([("major_axis", "index"), ("minor_axis", "columns")])
            .axis_aliases([("major", "major_axis"), ("minor", "minor_axis")])
            .slicer(frame_config())
            .stat_axis(1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_alias() {
        let p = panel_config();
        assert_eq!(p.resolve_axis_name("major").unwrap(), 1);
        assert_eq!(p.resolve_axis_name("major_axis").unwrap(), 1);
        assert_eq!(p.resolve_axis_name("minor").unwrap(), 2);
        assert!(matches!(
            p.resolve_axis_name("cols"),
            Err(Error::UnknownAxis(a)) if a == "cols"
        ));
    }

    #[test]
    fn test_slicer_ndim_checked() {
        let r = NdConfig::builder("Bad")
            .axis_orders(["a", "b", "c"])
            .slicer(frame_config().slicer().unwrap().clone())
            .build();
        assert!(matches!(r, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_missing_slicer_rejected() {
        let r = NdConfig::builder("Bad").axis_orders(["a", "b"]).build();
        assert!(r.is_err());
    }

    #[test]
    fn test_invalid_aliases_and_stat_axis() {
        let series = frame_config().slicer().unwrap().clone();
        let r = NdConfig::builder("S")
            .axis_orders(["index"])
            .axis_aliases([("index", "index")])
            .build();
        assert!(r.is_err());
        let r = NdConfig::builder("S")
            .axis_orders(["index"])
            .axis_aliases([("i", "idx")])
            .build();
        assert!(r.is_err());
        let r = NdConfig::builder("F")
            .axis_orders(["index", "columns"])
            .slicer(series)
            .stat_axis(2)
            .build();
        assert!(r.is_err());
        let r = NdConfig::builder("S").axis_orders(["a", "a"]).build();
        assert!(r.is_err());
    }

    #[test]
    fn test_slice_layout_uses_axis_slices() {
        let p = panel_config();
        let (slicer, layout) = p.slice_layout(0).unwrap();
        assert_eq!(slicer.klass_name(), "DataFrame");
        assert_eq!(layout, [1, 2]);

        let (_, layout) = p.slice_layout(1).unwrap();
        assert_eq!(layout, [0, 2]);

        let (_, layout) = p.slice_layout(2).unwrap();
        assert_eq!(layout, [0, 1]);
    }

    #[test]
    fn test_slice_layout_translates_names() {
        // trailing axes map crosswise onto the slicer
        let frame = frame_config();
        let p = NdConfig::builder("Crossed")
            .axis_orders(["items", "major_axis", "minor_axis"])
            .axis_slices([("major_axis", "columns"), ("minor_axis", "index")])
            .slicer(frame)
            .build()
            .unwrap();
        let (_, layout) = p.slice_layout(0).unwrap();
        assert_eq!(layout, [2, 1]);
    }

    #[test]
    fn test_colliding_axis_slices_rejected() {
        let r = NdConfig::builder("Collide")
            .axis_orders(["items", "major_axis", "minor_axis"])
            .axis_slices([("major_axis", "index"), ("minor_axis", "index")])
            .slicer(frame_config())
            .build();
        assert!(matches!(r, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_slice_layout_without_slicer() {
        let f = frame_config();
        let s = f.slicer().unwrap();
        assert!(matches!(s.slice_layout(0), Err(Error::NoSlicer(_))));
    }
}

//! Console text rendering for frames of any dimensionality.
//!
//! 1-d frames render as a label column and a value column, 2-d frames as a table
//! and 3-d or higher frames as a short summary of their axes. Layout is controlled
//! by [PrintOptions].

mod array;
mod table;

use crate::dtypes::Unit;
use crate::error::Error;
use crate::frame::NdFrame;
use serde::{Deserialize, Serialize};

/// How column headers (and cells) are aligned within their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Left,
    #[default]
    Right,
}

impl Justify {
    pub(crate) fn pad(&self, s: &str, width: usize) -> String {
        match self {
            Self::Left => format!("{s:<width$}"),
            Self::Right => format!("{s:>width$}"),
        }
    }
}

/// Engineering notation for floats: the exponent is a multiple of three and is shown
/// either as `E+06` or, with `use_eng_prefix`, as an SI prefix such as `M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngFormat {
    /// Digits after the decimal point. `None` keeps up to six significant digits.
    pub accuracy: Option<usize>,
    pub use_eng_prefix: bool,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Significant places used for floats.
    pub precision: usize,
    /// Minimum width of each table column.
    pub col_space: Option<usize>,
    /// Cells longer than this are cut and end in `...`.
    pub max_colwidth: Option<usize>,
    pub colheader_justify: Justify,
    /// Text shown for missing values.
    pub na_rep: String,
    /// When set, wide tables are wrapped into blocks no wider than this.
    pub line_width: Option<usize>,
    /// Print the column labels of a table.
    pub header: bool,
    /// Print the row labels of a table.
    pub index: bool,
    /// Replaces the default float formatting when set.
    pub eng_float_format: Option<EngFormat>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 7,
            col_space: None,
            max_colwidth: Some(50),
            colheader_justify: Justify::Right,
            na_rep: "NaN".to_owned(),
            line_width: None,
            header: true,
            index: true,
            eng_float_format: None,
        }
    }
}

impl PrintOptions {
    /// Parses options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Switches floats to engineering notation.
    pub fn with_eng_float_format(mut self, accuracy: Option<usize>, use_eng_prefix: bool) -> Self {
        self.eng_float_format = Some(EngFormat {
            accuracy,
            use_eng_prefix,
        });
        self
    }
}

pub(crate) fn render<E: Unit>(frame: &NdFrame<E>, options: &PrintOptions) -> String {
    match frame.ndim() {
        1 => table::series_to_string(frame, options),
        2 => table::frame_to_string(frame, options),
        _ => summary(frame),
    }
}

/// Joins columns of strings side by side. Every column but the last is padded to its
/// widest entry plus `space`; shorter columns are padded with blank rows.
pub(crate) fn adjoin(space: usize, columns: &[Vec<String>]) -> String {
    let Some((last, init)) = columns.split_last() else {
        return String::new();
    };
    let width = |col: &Vec<String>| col.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let mut widths: Vec<usize> = init.iter().map(|c| width(c) + space).collect();
    widths.push(width(last));
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(rows);
    for r in 0..rows {
        let mut line = String::new();
        for (col, &w) in columns.iter().zip(&widths) {
            let cell = col.get(r).map_or("", String::as_str);
            line.push_str(&Justify::Left.pad(cell, w));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Class line, dimensions, and the first and last label of every axis.
fn summary<E: Unit>(frame: &NdFrame<E>) -> String {
    let mut lines = vec![format!("<class '{}'>", frame.klass_name())];
    let dims: Vec<String> = frame
        .axis_names()
        .iter()
        .zip(frame.shape())
        .map(|(name, len)| format!("{len} ({name})"))
        .collect();
    lines.push(format!("Dimensions: {}", dims.join(" x ")));
    for (name, index) in frame.axis_names().iter().zip(frame.axes()) {
        let name = capitalize(name);
        match (index.first(), index.last()) {
            (Some(first), Some(last)) => lines.push(format!("{name} axis: {first} to {last}")),
            _ => lines.push(format!("{name} axis: None")),
        }
    }
    lines.join("\n")
}

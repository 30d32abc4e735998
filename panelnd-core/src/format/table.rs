use super::array::{format_array, make_fixed_width};
use super::{adjoin, PrintOptions};
use crate::dtypes::Unit;
use crate::frame::NdFrame;
use crate::index::Index;

/// `label   value` lines followed by a `Length: n` footer.
pub(crate) fn series_to_string<E: Unit>(frame: &NdFrame<E>, options: &PrintOptions) -> String {
    if frame.len() == 0 {
        return String::new();
    }
    let labels: Vec<String> = frame.axes[0].iter().map(ToString::to_string).collect();
    let values = format_array(frame.values.iter(), options);
    let maxlen = labels.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let pad = maxlen.min(60);
    let mut lines: Vec<String> = labels
        .iter()
        .zip(&values)
        .map(|(k, v)| format!("{k:<pad$}   {v}"))
        .collect();
    lines.push(format!("Length: {}", frame.len()));
    lines.join("\n")
}

fn list(index: &Index) -> String {
    let labels: Vec<String> = index.iter().map(ToString::to_string).collect();
    format!("[{}]", labels.join(", "))
}

pub(crate) fn frame_to_string<E: Unit>(frame: &NdFrame<E>, options: &PrintOptions) -> String {
    let (index, columns) = (&frame.axes[0], &frame.axes[1]);
    if index.is_empty() || columns.is_empty() {
        return format!(
            "Empty {}\nColumns: {}\nIndex: {}",
            frame.klass_name(),
            list(columns),
            list(index)
        );
    }
    let index_col = options.index.then(|| {
        let header = options.header.then(String::new);
        header
            .into_iter()
            .chain(index.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
    });
    let strcols = str_columns(frame, options);
    match options.line_width {
        None => adjoin(1, &index_col.into_iter().chain(strcols).collect::<Vec<_>>()),
        Some(width) => join_multiline(index_col, strcols, width, index.len()),
    }
}

/// One header cell (unless headers are off) plus the formatted cells of every column.
fn str_columns<E: Unit>(frame: &NdFrame<E>, options: &PrintOptions) -> Vec<Vec<String>> {
    let nrows = frame.axes[0].len();
    let justify = options.colheader_justify;
    frame.axes[1]
        .iter()
        .enumerate()
        .map(|(j, label)| {
            let cells = (0..nrows).filter_map(|i| frame.values.get(&[i, j]));
            let header = if E::DTYPE.is_numeric() {
                format!(" {label}")
            } else {
                label.to_string()
            };
            let header_width = if options.header {
                header.chars().count()
            } else {
                0
            };
            let min_width = options.col_space.unwrap_or(0).max(header_width);
            let cells = make_fixed_width(
                format_array(cells, options),
                justify,
                Some(min_width),
                options.max_colwidth,
            );
            let width = cells
                .iter()
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
                .max(min_width);
            let mut column = Vec::with_capacity(nrows + 1);
            if options.header {
                column.push(justify.pad(&header, width));
            }
            column.extend(cells);
            column
        })
        .collect()
}

/// End positions of consecutive column groups whose widths fit in `width`. A group
/// always holds at least one column.
fn binify(widths: &[usize], width: usize) -> Vec<usize> {
    let mut bins = Vec::new();
    let mut start = 0;
    let mut current = 0;
    for (i, &w) in widths.iter().enumerate() {
        current += w;
        if current + 2 > width && i > start {
            bins.push(i);
            start = i;
            current = w;
        }
    }
    bins.push(widths.len());
    bins
}

/// Splits a table into blocks that fit in `line_width`. Each block repeats the index
/// column and all blocks but the last end with a ` \` continuation marker.
fn join_multiline(
    index: Option<Vec<String>>,
    strcols: Vec<Vec<String>>,
    line_width: usize,
    nrows: usize,
) -> String {
    let index_width = index
        .iter()
        .flatten()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = strcols
        .iter()
        .map(|c| c.iter().map(|s| s.chars().count()).max().unwrap_or(0))
        .collect();
    let bins = binify(&widths, line_width.saturating_sub(index_width));
    let nbins = bins.len();

    let mut blocks = Vec::with_capacity(nbins);
    let mut start = 0;
    for (i, &end) in bins.iter().enumerate() {
        let mut row = Vec::with_capacity(end - start + 2);
        row.extend(index.iter().cloned());
        row.extend(strcols[start..end].iter().cloned());
        if nbins > 1 {
            if i < nbins - 1 {
                let mut marker = vec![" \\".to_owned()];
                marker.extend(std::iter::repeat("  ".to_owned()).take(nrows.saturating_sub(1)));
                row.push(marker);
            } else {
                row.push(vec![" ".to_owned(); nrows]);
            }
        }
        blocks.push(adjoin(1, &row));
        start = end;
    }
    blocks.join("\n\n")
}

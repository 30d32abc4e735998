//! Column formatters: every value of a column rendered to equally wide strings.

use super::{EngFormat, Justify, PrintOptions};
use crate::dtypes::{DType, Unit};

/// Formats `values` by dtype and pads them to a common width.
pub(crate) fn format_array<'a, E: Unit>(
    values: impl Iterator<Item = &'a E>,
    options: &PrintOptions,
) -> Vec<String> {
    let strings = match E::DTYPE {
        d if d.is_float() => {
            let values: Vec<Option<f64>> = values
                .map(|x| if x.is_na() { None } else { x.as_f64() })
                .collect();
            match options.eng_float_format {
                Some(eng) => values
                    .iter()
                    .map(|v| v.map_or_else(|| options.na_rep.clone(), |x| format_eng(x, eng)))
                    .collect(),
                None => format_floats(&values, options.precision, &options.na_rep),
            }
        }
        d if d.is_integer() => values.map(|x| leading_space(x.to_string())).collect(),
        DType::Bool => values
            .map(|x| match x.to_string().as_str() {
                "true" => " True".to_owned(),
                "false" => " False".to_owned(),
                s => format!(" {s}"),
            })
            .collect(),
        _ => values.map(|x| format!(" {x}")).collect(),
    };
    make_fixed_width(strings, Justify::Right, None, options.max_colwidth)
}

/// Emulates the `% d` style: non-negative numbers get a leading space.
fn leading_space(s: String) -> String {
    if s.starts_with('-') {
        s
    } else {
        format!(" {s}")
    }
}

fn fixed(x: f64, decimals: usize) -> String {
    if x.is_infinite() {
        return if x > 0.0 { " inf".into() } else { "-inf".into() };
    }
    leading_space(format!("{x:.decimals$}"))
}

/// Scientific notation with a signed, at least two digit exponent (`1.5e+08`).
fn exponent(x: f64, decimals: usize) -> String {
    if x.is_infinite() {
        return fixed(x, decimals);
    }
    let s = format!("{x:.decimals$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or_default();
            let sign = if exp < 0 { '-' } else { '+' };
            leading_space(format!("{mantissa}e{sign}{:02}", exp.abs()))
        }
        None => leading_space(s),
    }
}

fn format_with(values: &[Option<f64>], na_rep: &str, f: impl Fn(f64) -> String) -> Vec<String> {
    let strings = values
        .iter()
        .map(|v| v.map_or_else(|| na_rep.to_owned(), &f))
        .collect();
    trim_zeros(strings, na_rep)
}

/// `precision` significant places. Switches to scientific notation when the fixed form
/// is too long and holds values above 1e8, or when a nonzero value is below
/// `10^-precision`.
pub(crate) fn format_floats(values: &[Option<f64>], precision: usize, na_rep: &str) -> Vec<String> {
    let decimals = precision.saturating_sub(1);
    let strings = format_with(values, na_rep, |x| fixed(x, decimals));
    let maxlen = strings.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let too_long = maxlen > precision + 5;
    let has_large = values.iter().flatten().any(|v| v.abs() > 1e8);
    let tiny = 10f64.powi(-(precision as i32));
    let has_small = values
        .iter()
        .flatten()
        .any(|v| v.abs() < tiny && v.abs() > 0.0);
    if (too_long && has_large) || has_small {
        format_with(values, na_rep, |x| exponent(x, decimals))
    } else {
        strings
    }
}

const ENG_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "u", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Engineering notation: a mantissa with an exponent that is a multiple of three,
/// clamped to `[-24, 24]`. `format_eng(1e6)` is ` 1.0M` with one digit of accuracy and
/// the SI prefix, or ` 1.0E+06` without it.
pub(crate) fn format_eng(x: f64, eng: EngFormat) -> String {
    if !x.is_finite() {
        return fixed(x, 0);
    }
    // decimal exponent and mantissa of the shortest representation
    let repr = format!("{:e}", x.abs());
    let (digits, exp) = match repr.split_once('e') {
        Some((m, e)) => (m.parse::<f64>().unwrap_or(0.0), e.parse::<i32>().unwrap_or(0)),
        None => (0.0, 0),
    };
    let (pow10, mantissa) = if x == 0.0 {
        (0, 0.0)
    } else {
        let pow10 = (exp.div_euclid(3) * 3).clamp(-24, 24);
        (pow10, digits * 10f64.powi(exp - pow10) * x.signum())
    };

    let suffix = if eng.use_eng_prefix {
        ENG_PREFIXES[((pow10 + 24) / 3) as usize].to_owned()
    } else if pow10 < 0 {
        format!("E-{:02}", -pow10)
    } else {
        format!("E+{pow10:02}")
    };
    let body = match eng.accuracy {
        Some(decimals) => format!("{mantissa:.decimals$}"),
        None => general(mantissa),
    };
    leading_space(body + &suffix)
}

/// Six significant digits without trailing zeros, like `%g`.
fn general(x: f64) -> String {
    if x == 0.0 {
        return "0".to_owned();
    }
    let exp = x.abs().log10().floor() as i32;
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        let s = format!("{x:.decimals$}");
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_owned()
        } else {
            s
        }
    } else {
        let s = exponent(x, 5);
        match s.split_once('e') {
            Some((m, e)) if m.contains('.') => {
                format!("{}e{e}", m.trim_end_matches('0').trim_end_matches('.').trim_start())
            }
            _ => s.trim_start().to_owned(),
        }
    }
}

/// Drops trailing zeros common to every non-NA string, then a trailing decimal point.
pub(crate) fn trim_zeros(mut strings: Vec<String>, na_rep: &str) -> Vec<String> {
    let can_trim = |strings: &[String]| {
        let mut non_na = strings.iter().filter(|s| s.as_str() != na_rep).peekable();
        non_na.peek().is_some() && non_na.all(|s| s.ends_with('0') && !s.contains(['e', 'E']))
    };
    while can_trim(&strings) {
        for s in strings.iter_mut().filter(|s| s.as_str() != na_rep) {
            s.pop();
        }
    }
    for s in strings.iter_mut() {
        if s.as_str() != na_rep && s.ends_with('.') {
            s.pop();
        }
    }
    strings
}

/// Pads every string to the longest one (at least `minimum`). With `max_colwidth` set
/// the width is capped and longer strings are cut to end in `...`.
pub(crate) fn make_fixed_width(
    strings: Vec<String>,
    justify: Justify,
    minimum: Option<usize>,
    max_colwidth: Option<usize>,
) -> Vec<String> {
    if strings.is_empty() {
        return strings;
    }
    let mut width = strings.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    if let Some(m) = minimum {
        width = width.max(m);
    }
    if let Some(cap) = max_colwidth {
        width = width.min(cap);
    }
    strings
        .into_iter()
        .map(|s| {
            let s = match max_colwidth {
                Some(cap) if cap > 3 && s.chars().count() > width => {
                    let mut cut: String = s.chars().take(width - 3).collect();
                    cut.push_str("...");
                    cut
                }
                _ => s,
            };
            justify.pad(&s, width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(values: &[f64]) -> Vec<String> {
        let values: Vec<Option<f64>> = values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect();
        format_floats(&values, 7, "NaN")
    }

    #[test]
    fn test_trailing_zeros_trimmed_together() {
        assert_eq!(floats(&[1.5, 2.0, -3.25]), [" 1.50", " 2.00", "-3.25"]);
        assert_eq!(floats(&[0.0, 10.0]), [" 0", " 10"]);
        assert_eq!(floats(&[1.0, f64::NAN]), [" 1", "NaN"]);
    }

    #[test]
    fn test_switch_to_exponent() {
        assert_eq!(floats(&[1e-10, 1.0]), [" 1.000000e-10", " 1.000000e+00"]);
        assert_eq!(
            floats(&[123456789.5, 0.25]),
            [" 1.234568e+08", " 2.500000e-01"]
        );
        // above 1e8 but short enough to stay fixed
        assert_eq!(floats(&[123456789.0, 1.0]), [" 123456789", " 1"]);
    }

    #[test]
    fn test_precision_option() {
        let values = [Some(1.0 / 3.0)];
        assert_eq!(format_floats(&values, 3, "NaN"), [" 0.33"]);
    }

    #[test]
    fn test_format_array_by_dtype() {
        let opts = PrintOptions::default();
        let ints = [1i64, -20, 300];
        assert_eq!(format_array(ints.iter(), &opts), ["   1", " -20", " 300"]);
        let flags = [true, false];
        assert_eq!(format_array(flags.iter(), &opts), ["  True", " False"]);
        let na = [f64::NAN, 2.5];
        assert_eq!(format_array(na.iter(), &opts), [" NaN", " 2.5"]);
    }

    #[test]
    fn test_eng_format() {
        let eng = |accuracy, use_eng_prefix| EngFormat {
            accuracy,
            use_eng_prefix,
        };
        assert_eq!(format_eng(0.0, eng(Some(0), true)), " 0");
        assert_eq!(format_eng(1e6, eng(Some(1), true)), " 1.0M");
        assert_eq!(format_eng(-1e-6, eng(Some(2), false)), "-1.00E-06");
        assert_eq!(format_eng(0.00012, eng(Some(1), false)), " 120.0E-06");
        assert_eq!(format_eng(1234.5, eng(None, true)), " 1.2345k");
        assert_eq!(format_eng(-25.0, eng(None, false)), "-25E+00");
        // exponents past the largest prefix stay on it
        assert_eq!(format_eng(1e27, eng(None, true)), " 1000Y");
        assert_eq!(format_eng(f64::INFINITY, eng(Some(1), true)), " inf");
    }

    #[test]
    fn test_eng_format_array() {
        let opts = PrintOptions::default().with_eng_float_format(Some(1), true);
        let values = [1500.0, f64::NAN, -0.002];
        assert_eq!(format_array(values.iter(), &opts), [" 1.5k", "  NaN", "-2.0m"]);
        // integers are unaffected
        assert_eq!(format_array([1i32, 20].iter(), &opts), ["  1", " 20"]);
    }

    #[test]
    fn test_fixed_width_truncates() {
        let long = "x".repeat(60);
        let out = make_fixed_width(vec![long, "y".into()], Justify::Right, None, Some(50));
        assert_eq!(out[0].len(), 50);
        assert!(out[0].ends_with("..."));
        assert_eq!(out[1], format!("{}y", " ".repeat(49)));
        let out = make_fixed_width(vec!["ab".into()], Justify::Left, Some(4), None);
        assert_eq!(out, ["ab  "]);
    }
}

use std::num::IntErrorKind;

use itertools::Itertools;

/// Split `input` on `separator`, dropping the empty pieces produced by leading, trailing, or
/// repeated separators.
///
/// # Example
///
/// ```
/// use thekogans_make_util::split::split_filter_empty;
/// let parts: Vec<_> = split_filter_empty("a b  c ", ' ').collect();
/// assert_eq!(parts, vec!["a", "b", "c"]);
/// ```
pub fn split_filter_empty(input: &str, separator: char) -> impl Iterator<Item = &str> {
    input.split(separator).filter(|v| !v.is_empty())
}

/// Join `parts` with `separator`, wrapping the result in `quote_char` when `quote` is set and
/// there is more than one part.
pub fn join_quoted<I, S>(parts: I, separator: char, quote: bool, quote_char: char) -> String
where
    I: IntoIterator<Item = S>,
    I::IntoIter: ExactSizeIterator,
    S: AsRef<str>,
{
    let parts = parts.into_iter();
    let wrap = quote && parts.len() > 1;
    let joined = parts.map(|p| p.as_ref().to_string()).join(&separator.to_string());
    if wrap {
        format!("{quote_char}{joined}{quote_char}")
    } else {
        joined
    }
}

/// `strtol`-style integer parse: optional whitespace, optional sign, then as many decimal digits
/// as are present. Out of range values saturate; anything unparseable yields 0.
pub fn parse_int_lenient(text: &str) -> i64 {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let end = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| sign_len + i);

    match text[..end].parse::<i64>() {
        Ok(v) => v,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// `atof`-style float parse: the longest leading prefix that reads as a float, or 0.0. NaN counts
/// as unparseable, so every result compares equal to itself.
pub fn parse_float_lenient(text: &str) -> f64 {
    let parse = |s: &str| s.parse::<f64>().ok().filter(|v| !v.is_nan());

    let text = text.trim();
    if let Some(v) = parse(text) {
        return v;
    }

    // Back off one character at a time; descriptor values are short.
    let mut end = text.len();
    while end > 0 {
        end -= 1;
        if !text.is_char_boundary(end) {
            continue;
        }
        if let Some(v) = parse(&text[..end]) {
            return v;
        }
    }
    0.0
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filter_empty() {
        let parts: Vec<_> = split_filter_empty("  a b  c", ' ').collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
        assert_eq!(split_filter_empty("", ' ').count(), 0);
        assert_eq!(split_filter_empty(";;;", ';').count(), 0);
    }

    #[test]
    fn quoting_needs_two_parts() {
        assert_eq!(join_quoted(["a", "b"], ',', true, '"'), "\"a,b\"");
        assert_eq!(join_quoted(["a"], ',', true, '"'), "a");
        assert_eq!(join_quoted(["a", "b"], ' ', false, '"'), "a b");
        assert_eq!(join_quoted(Vec::<String>::new(), ' ', true, '"'), "");
    }

    #[test]
    fn lenient_int() {
        assert_eq!(parse_int_lenient("42"), 42);
        assert_eq!(parse_int_lenient("  -7"), -7);
        assert_eq!(parse_int_lenient("+3"), 3);
        assert_eq!(parse_int_lenient("12abc"), 12);
        assert_eq!(parse_int_lenient("abc"), 0);
        assert_eq!(parse_int_lenient(""), 0);
        assert_eq!(parse_int_lenient("1.9"), 1);
        assert_eq!(parse_int_lenient("-"), 0);
    }

    #[test]
    fn lenient_int_extremes() {
        assert_eq!(parse_int_lenient(&i64::MIN.to_string()), i64::MIN);
        assert_eq!(parse_int_lenient(&i64::MAX.to_string()), i64::MAX);
        assert_eq!(parse_int_lenient("99999999999999999999"), i64::MAX);
        assert_eq!(parse_int_lenient("-99999999999999999999x"), i64::MIN);
    }

    #[test]
    fn lenient_float() {
        assert_eq!(parse_float_lenient("1.5"), 1.5);
        assert_eq!(parse_float_lenient("2.5kg"), 2.5);
        assert_eq!(parse_float_lenient("x"), 0.0);
        assert_eq!(parse_float_lenient(""), 0.0);
    }

    #[test]
    fn lenient_float_rejects_nan() {
        assert_eq!(parse_float_lenient("nan"), 0.0);
        assert_eq!(parse_float_lenient("NaN"), 0.0);
        assert_eq!(parse_float_lenient("nanx"), 0.0);
        assert_eq!(parse_float_lenient(&f64::NAN.to_string()), 0.0);
        assert_eq!(parse_float_lenient("inf"), f64::INFINITY);
    }
}

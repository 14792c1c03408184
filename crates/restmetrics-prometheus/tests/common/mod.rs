//! Exposition-text reader shared by the integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

/// Value of the sample `name{labels}` in `text`, if present.
///
/// Matches on the exact metric name and requires exactly the given label
/// pairs (order-insensitive).
pub fn sample(text: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|line| {
            let (series, value) = line.rsplit_once(' ')?;
            let (metric, body) = match series.split_once('{') {
                Some((m, rest)) => (m, rest.trim_end_matches('}')),
                None => (series, ""),
            };
            if metric != name {
                return None;
            }
            if body.matches("=\"").count() != labels.len() {
                return None;
            }
            let all = labels
                .iter()
                .all(|(k, v)| body.contains(&format!("{k}=\"{v}\"")));
            if !all {
                return None;
            }
            Some(value.to_ascii_lowercase().parse::<f64>().expect("sample value"))
        })
}

/// Number of series of `name` in `text`.
pub fn series_count(text: &str, name: &str) -> usize {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .filter(|l| {
            let series = l.rsplit_once(' ').map(|(s, _)| s).unwrap_or(l);
            series.split_once('{').map(|(m, _)| m).unwrap_or(series) == name
        })
        .count()
}

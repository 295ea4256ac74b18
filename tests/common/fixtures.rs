//! Shared fixture data

/// Product ids `first..last` as strings
pub fn ids(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| i.to_string()).collect()
}

use std::collections::BTreeMap;
use std::fmt::Display;

/// Counts `values` per label, seeding every label in `all` with zero.
pub fn tally<T, I>(all: &[T], values: I) -> BTreeMap<String, i64>
where
    T: Display,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<String, i64> = all.iter().map(|label| (label.to_string(), 0)).collect();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Counts occurrences of free-form labels such as skills.
pub fn tally_labels<'a, I>(labels: I) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::incident::Severity;

    #[test]
    fn tally_includes_zero_counts() {
        let counts = tally(&Severity::ALL, vec![Severity::High, Severity::High, Severity::Low]);
        assert_eq!(counts["high"], 2);
        assert_eq!(counts["low"], 1);
        assert_eq!(counts["medium"], 0);
        assert_eq!(counts["critical"], 0);
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn tally_labels_counts_each_label() {
        let skills = vec![
            "first-aid".to_string(),
            "driving".to_string(),
            "first-aid".to_string(),
        ];
        let counts = tally_labels(&skills);
        assert_eq!(counts["first-aid"], 2);
        assert_eq!(counts["driving"], 1);
    }
}

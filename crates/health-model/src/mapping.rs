//! Controlled-vocabulary translation from chronic disease topics to NCHS causes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The six topic -> cause pairs used by the study.
pub const STANDARD_TOPIC_CAUSES: [(&str, &str); 6] = [
    ("Cancer", "Cancer"),
    ("Diabetes", "Diabetes"),
    ("Cardiovascular Disease", "Heart Disease"),
    ("Chronic Kidney Disease", "Kidney Disease"),
    ("Immunization", "Influenza and Pneumonia"),
    ("Chronic Obstructive Pulmonary Disease", "CLRD"),
];

/// Closed lookup table from a chronic disease `Topic` to a mortality `Cause_Name`.
///
/// The table is immutable once built and is handed to the stages that need it.
/// Topics absent from the table have no cause; the pipeline treats that as an
/// allow-list rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicCauseMapping {
    entries: BTreeMap<String, String>,
}

impl TopicCauseMapping {
    /// Builds a mapping from explicit pairs. Later duplicates replace earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(topic, cause)| (topic.into(), cause.into()))
                .collect(),
        }
    }

    /// The study's fixed six-entry table.
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_TOPIC_CAUSES)
    }

    /// Cause label for a topic, exact match.
    pub fn cause_for(&self, topic: &str) -> Option<&str> {
        self.entries.get(topic).map(String::as_str)
    }

    /// Distinct target causes; the cause table is restricted to these.
    pub fn causes(&self) -> BTreeSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Iterates `(topic, cause)` pairs in topic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(topic, cause)| (topic.as_str(), cause.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TopicCauseMapping {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_mapping_has_six_entries() {
        let mapping = TopicCauseMapping::standard();
        assert_eq!(mapping.len(), 6);
        assert_eq!(
            mapping.cause_for("Cardiovascular Disease"),
            Some("Heart Disease")
        );
        assert_eq!(
            mapping.cause_for("Chronic Obstructive Pulmonary Disease"),
            Some("CLRD")
        );
    }

    #[test]
    fn lookup_is_exact() {
        let mapping = TopicCauseMapping::standard();
        assert_eq!(mapping.cause_for("cancer"), None);
        assert_eq!(mapping.cause_for("Arthritis"), None);
    }

    #[test]
    fn causes_are_the_value_set() {
        let mapping = TopicCauseMapping::from_pairs([("A", "X"), ("B", "X"), ("C", "Y")]);
        let causes: Vec<&str> = mapping.causes().into_iter().collect();
        assert_eq!(causes, vec!["X", "Y"]);
    }
}

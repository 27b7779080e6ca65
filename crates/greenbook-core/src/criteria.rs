//! Reporting criteria ("GRI" items) selected into a criteria template.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One externally defined sustainability-reporting guideline item.
/// Uniqueness within a selection is enforced by `gri_id`; any further
/// backend-defined fields ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub gri_id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Criterion {
    pub fn new(gri_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            gri_id: gri_id.into(),
            domain: domain.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Groups a selection by domain, preserving insertion order within each
/// group.
pub fn criteria_by_domain(selection: &[Criterion]) -> BTreeMap<String, Vec<&Criterion>> {
    let mut grouped: BTreeMap<String, Vec<&Criterion>> = BTreeMap::new();
    for criterion in selection {
        grouped
            .entry(criterion.domain.clone())
            .or_default()
            .push(criterion);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_preserves_order_within_domain() {
        let selection = vec![
            Criterion::new("GRI 305-1", "environment"),
            Criterion::new("GRI 401-1", "social"),
            Criterion::new("GRI 305-2", "environment"),
        ];
        let grouped = criteria_by_domain(&selection);
        let env: Vec<&str> = grouped["environment"]
            .iter()
            .map(|c| c.gri_id.as_str())
            .collect();
        assert_eq!(env, vec!["GRI 305-1", "GRI 305-2"]);
        assert_eq!(grouped["social"].len(), 1);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let json = serde_json::json!({
            "gri_id": "GRI 2-1",
            "domain": "governance",
            "title": "Organizational details"
        });
        let criterion: Criterion = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(criterion.extra["title"], "Organizational details");
        assert_eq!(serde_json::to_value(&criterion).unwrap(), json);
    }
}

//! The fourteen runnable algorithms and their descriptions.

use std::fmt;
use std::str::FromStr;

use algoscope_path::PathAlgorithm;
use algoscope_sort::SortAlgorithm;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stable identifier of a runnable algorithm.
///
/// Serialises as the bare snake_case id, e.g. `"merge"` or `"a_star"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmId {
    Sort(SortAlgorithm),
    Path(PathAlgorithm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Sorting,
    PathSearch,
    Tour,
}

/// Catalogue entry served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub title: &'static str,
    pub family: Family,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    pub complexity: &'static str,
}

impl AlgorithmId {
    pub fn all() -> impl Iterator<Item = AlgorithmId> {
        SortAlgorithm::ALL
            .into_iter()
            .map(AlgorithmId::Sort)
            .chain(PathAlgorithm::ALL.into_iter().map(AlgorithmId::Path))
    }

    pub fn id(self) -> &'static str {
        match self {
            AlgorithmId::Sort(a) => a.id(),
            AlgorithmId::Path(a) => a.id(),
        }
    }

    pub fn family(self) -> Family {
        match self {
            AlgorithmId::Sort(_) => Family::Sorting,
            AlgorithmId::Path(a) if a.is_tour() => Family::Tour,
            AlgorithmId::Path(_) => Family::PathSearch,
        }
    }

    /// What kind of input the algorithm runs on.
    pub fn expects(self) -> &'static str {
        match self {
            AlgorithmId::Sort(_) => "sequence",
            AlgorithmId::Path(_) => "graph",
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            AlgorithmId::Sort(a) => AlgorithmInfo {
                id: self,
                title: a.title(),
                family: self.family(),
                stable: Some(a.is_stable()),
                complexity: a.complexity(),
            },
            AlgorithmId::Path(a) => AlgorithmInfo {
                id: self,
                title: a.title(),
                family: self.family(),
                stable: None,
                complexity: a.complexity(),
            },
        }
    }

    pub fn catalogue() -> Vec<AlgorithmInfo> {
        Self::all().map(Self::info).collect()
    }
}

impl From<SortAlgorithm> for AlgorithmId {
    fn from(a: SortAlgorithm) -> Self {
        AlgorithmId::Sort(a)
    }
}

impl From<PathAlgorithm> for AlgorithmId {
    fn from(a: PathAlgorithm) -> Self {
        AlgorithmId::Path(a)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .find(|a| a.id() == s)
            .ok_or_else(|| Error::invalid(format!("unknown algorithm: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourteen_unique_ids() {
        let ids: Vec<_> = AlgorithmId::all().map(AlgorithmId::id).collect();
        assert_eq!(ids.len(), 14);
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 14);
    }

    #[test]
    fn serialises_as_bare_id() {
        let json = serde_json::to_string(&AlgorithmId::Path(PathAlgorithm::AStar)).unwrap();
        assert_eq!(json, r#""a_star""#);
        let id: AlgorithmId = serde_json::from_str(r#""heap""#).unwrap();
        assert_eq!(id, AlgorithmId::Sort(SortAlgorithm::Heap));
        let id: AlgorithmId = serde_json::from_str(r#""farthest_insertion""#).unwrap();
        assert_eq!(id.family(), Family::Tour);
    }

    #[test]
    fn parses_ids() {
        assert_eq!("bfs".parse::<AlgorithmId>().unwrap().family(), Family::PathSearch);
        assert!("bogo".parse::<AlgorithmId>().is_err());
    }

    #[test]
    fn catalogue_marks_stable_sorts() {
        let catalogue = AlgorithmId::catalogue();
        let merge = catalogue.iter().find(|i| i.id.id() == "merge").unwrap();
        assert_eq!(merge.stable, Some(true));
        let quick = catalogue.iter().find(|i| i.id.id() == "quick").unwrap();
        assert_eq!(quick.stable, Some(false));
        let json = serde_json::to_value(catalogue.last().unwrap()).unwrap();
        assert!(json.get("stable").is_none());
    }
}

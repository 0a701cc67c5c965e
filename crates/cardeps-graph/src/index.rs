//! Reverse index (artifact → owning unit) and the raw-text reference matcher.
//!
//! Both are derived once from a finished [`Inventory`] before the dependency
//! scan starts, and are shared read-only by every scan worker.

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ids::{ArtifactName, UnitName};
use crate::inventory::Inventory;

/// Compiled-program budget for the alternation of every artifact name.
const MATCHER_SIZE_LIMIT: usize = 512 * (1 << 20);

/// What to do when two units declare the same artifact name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The unit visited last (lexically greatest) becomes the owner.
    #[default]
    Override,
    /// Abort the run on the first collision.
    Reject,
}

/// A name declared by more than one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub artifact: ArtifactName,
    pub previous: UnitName,
    pub owner: UnitName,
}

/// Artifact name → owning unit.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    owners: FxHashMap<ArtifactName, UnitName>,
    collisions: Vec<Collision>,
}

impl ReverseIndex {
    /// Invert `inventory`, resolving name collisions according to `policy`.
    pub fn build(inventory: &Inventory, policy: CollisionPolicy) -> Result<Self> {
        let mut index = Self::default();

        for (unit, declarations) in inventory.iter() {
            for artifact in declarations {
                let Some(previous) = index.owners.insert(artifact.name.clone(), unit.clone())
                else {
                    continue;
                };
                if previous == *unit {
                    continue;
                }
                if policy == CollisionPolicy::Reject {
                    return Err(Error::ArtifactCollision {
                        artifact: artifact.name.to_string(),
                        first: previous.into_string(),
                        second: unit.to_string(),
                    });
                }
                warn!(
                    artifact = %artifact.name,
                    previous = %previous,
                    owner = %unit,
                    "artifact declared by several units, keeping the last one"
                );
                index.collisions.push(Collision {
                    artifact: artifact.name.clone(),
                    previous,
                    owner: unit.clone(),
                });
            }
        }

        debug!(
            artifacts = index.owners.len(),
            collisions = index.collisions.len(),
            "built reverse index"
        );
        Ok(index)
    }

    /// Owning unit of `artifact`, or `None` for unknown/external names.
    pub fn owner(&self, artifact: &str) -> Option<&UnitName> {
        self.owners.get(artifact)
    }

    pub fn names(&self) -> impl Iterator<Item = &ArtifactName> {
        self.owners.keys()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Raw-text matcher over every known artifact name.
///
/// Structurally blind: a name matches wherever it occurs as a substring,
/// including comments and unrelated attribute values.
#[derive(Debug, Clone)]
pub struct ReferenceMatcher {
    regex: Option<Regex>,
    alternatives: usize,
}

impl ReferenceMatcher {
    /// Compile one alternation of the escaped `names`.
    ///
    /// Names are de-duplicated and ordered longest first, so at any position
    /// the longest known name wins under leftmost-first matching.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a ArtifactName>) -> Result<Self> {
        let mut names: Vec<&str> = names
            .into_iter()
            .map(ArtifactName::as_str)
            .filter(|name| !name.is_empty())
            .collect();
        names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        if names.is_empty() {
            return Ok(Self {
                regex: None,
                alternatives: 0,
            });
        }

        let pattern = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&pattern)
            .size_limit(MATCHER_SIZE_LIMIT)
            .dfa_size_limit(MATCHER_SIZE_LIMIT)
            .build()?;

        Ok(Self {
            regex: Some(regex),
            alternatives: names.len(),
        })
    }

    pub fn from_index(index: &ReverseIndex) -> Result<Self> {
        Self::new(index.names())
    }

    /// Every non-overlapping match in `text`, in order of appearance.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.regex {
            Some(regex) => regex.find_iter(text).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Number of distinct names in the alternation.
    pub fn alternatives(&self) -> usize {
        self.alternatives
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::DeclaredArtifact;

    fn inventory(entries: &[(&str, &str)]) -> Inventory {
        entries
            .iter()
            .map(|(unit, name)| {
                (
                    UnitName::from(*unit),
                    DeclaredArtifact::new(*name, "synapse/sequence"),
                )
            })
            .collect()
    }

    #[test]
    fn test_owner_lookup() {
        let index = ReverseIndex::build(
            &inventory(&[("CarA", "SeqA"), ("CarB", "SeqB")]),
            CollisionPolicy::Override,
        )
        .unwrap();
        assert_eq!(index.owner("SeqA").map(UnitName::as_str), Some("CarA"));
        assert_eq!(index.owner("SeqB").map(UnitName::as_str), Some("CarB"));
        assert!(index.owner("Unknown").is_none());
        assert!(index.collisions().is_empty());
    }

    #[test]
    fn test_override_keeps_lexically_last_unit() {
        let index = ReverseIndex::build(
            &inventory(&[("CarB", "Shared"), ("CarA", "Shared")]),
            CollisionPolicy::Override,
        )
        .unwrap();
        assert_eq!(index.owner("Shared").map(UnitName::as_str), Some("CarB"));
        assert_eq!(index.collisions().len(), 1);
        assert_eq!(index.collisions()[0].previous.as_str(), "CarA");
    }

    #[test]
    fn test_reject_policy_fails() {
        let err = ReverseIndex::build(
            &inventory(&[("CarA", "Shared"), ("CarB", "Shared")]),
            CollisionPolicy::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ArtifactCollision { .. }));
    }

    #[test]
    fn test_same_unit_duplicate_is_not_a_collision() {
        let index = ReverseIndex::build(
            &inventory(&[("CarA", "SeqA"), ("CarA", "SeqA")]),
            CollisionPolicy::Reject,
        )
        .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_matcher_escapes_names() {
        let names = [ArtifactName::from("a.b"), ArtifactName::from("x+y")];
        let matcher = ReferenceMatcher::new(&names).unwrap();
        assert_eq!(matcher.find_all("aXb a.b x+y xxy"), vec!["a.b", "x+y"]);
    }

    #[test]
    fn test_matcher_prefers_longest_name() {
        let names = [ArtifactName::from("Order"), ArtifactName::from("OrderSeq")];
        let matcher = ReferenceMatcher::new(&names).unwrap();
        assert_eq!(matcher.find_all(r#"<sequence key="OrderSeq"/>"#), vec!["OrderSeq"]);
        assert_eq!(matcher.alternatives(), 2);
    }

    #[test]
    fn test_matcher_finds_names_inside_comments() {
        let names = [ArtifactName::from("SeqB")];
        let matcher = ReferenceMatcher::new(&names).unwrap();
        assert_eq!(matcher.find_all("<!-- uses SeqB --><proxy/>"), vec!["SeqB"]);
    }

    #[test]
    fn test_empty_matcher_matches_nothing() {
        let matcher = ReferenceMatcher::new(std::iter::empty::<&ArtifactName>()).unwrap();
        assert!(matcher.is_empty());
        assert!(matcher.find_all("anything at all").is_empty());
    }
}

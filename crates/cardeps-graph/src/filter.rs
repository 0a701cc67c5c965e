//! Output-time unit allow-list.
//!
//! Filtering never affects extraction: graphs are always computed in full and
//! narrowed only when presented.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::{Error, Result};
use crate::ids::UnitName;

/// Predicate over units built from an explicit list and an exclusion pattern.
///
/// A non-empty list allows exactly the listed units and the pattern is
/// ignored. Otherwise every unit is allowed except those the pattern matches
/// anywhere in their name.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    listed: BTreeSet<UnitName>,
    exclude: Option<Regex>,
}

impl UnitFilter {
    pub fn new<I>(units: I, exclude: Option<&str>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<UnitName>,
    {
        let listed: BTreeSet<UnitName> = units
            .into_iter()
            .map(|unit| Into::<UnitName>::into(unit).as_str().trim().to_string())
            .filter(|unit| !unit.is_empty())
            .map(UnitName::new)
            .collect();

        let exclude = match exclude.filter(|pattern| !pattern.is_empty()) {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| Error::InvalidExclusion {
                pattern: pattern.to_string(),
                source,
            })?),
            None => None,
        };

        Ok(Self { listed, exclude })
    }

    /// Filter that allows every unit.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn allows(&self, unit: &str) -> bool {
        if !self.listed.is_empty() {
            return self.listed.contains(unit);
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(unit),
            None => true,
        }
    }

    pub fn allows_edge(&self, from: &str, to: &str) -> bool {
        self.allows(from) && self.allows(to)
    }
}

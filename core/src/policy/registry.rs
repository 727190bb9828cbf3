use std::collections::{BTreeMap, HashMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::Tier;
use crate::error::ContextError;

/// Check-type names grouped by priority tier.
///
/// A name lives in at most one tier. Tiers keep the order they were first
/// registered in and each tier keeps its names in registration order.
#[derive(Debug, Clone, Default)]
pub struct PolicyTierRegistry {
    order: Vec<Tier>,
    checks: HashMap<Tier, Vec<String>>,
    index: HashMap<String, Tier>,
}

impl PolicyTierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `names` under `tier`. The call is all-or-nothing: if any name
    /// is blank or already belongs to another tier, nothing is registered.
    /// Names already present in `tier` are skipped.
    pub fn register<I, S>(&mut self, tier: Tier, names: I) -> Result<usize, ContextError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fresh: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ContextError::InvalidArgument(format!(
                    "blank check name in {tier} tier"
                )));
            }
            match self.index.get(name) {
                Some(existing) if *existing != tier => {
                    return Err(ContextError::DuplicateCheck {
                        check: name.to_string(),
                        existing: *existing,
                        requested: tier,
                    });
                }
                Some(_) => continue,
                None => {}
            }
            if seen.insert(name.to_string()) {
                fresh.push(name.to_string());
            }
        }

        if !self.order.contains(&tier) {
            self.order.push(tier);
        }
        let added = fresh.len();
        for name in fresh {
            self.index.insert(name.clone(), tier);
            self.checks.entry(tier).or_default().push(name);
        }
        Ok(added)
    }

    /// `None` means the check is not registered at all.
    pub fn tier_of(&self, check: &str) -> Option<Tier> {
        self.index.get(check.trim()).copied()
    }

    pub fn checks(&self, tier: Tier) -> &[String] {
        self.checks.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every tier, including empty ones.
    pub fn tier_counts(&self) -> BTreeMap<Tier, usize> {
        Tier::ALL
            .iter()
            .map(|t| (*t, self.checks(*t).len()))
            .collect()
    }

    /// Tiers in first-registration order.
    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &[String])> {
        self.order.iter().map(move |t| (*t, self.checks(*t)))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Serialize for PolicyTierRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (tier, names) in self.tiers() {
            map.serialize_entry(tier.as_str(), names)?;
        }
        map.end()
    }
}

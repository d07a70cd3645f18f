use std::collections::BTreeMap;

use crate::state::UnitId;

/// Units with an intent dispatched but not yet settled by a snapshot refresh.
///
/// At most one outstanding intent per unit; different units are independent.
/// An entry is either in flight or waiting for the local snapshot to reach
/// the version the ledger reported for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingIntents {
    units: BTreeMap<UnitId, Option<u64>>,
}

impl PendingIntents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `unit` as pending. Returns false if it already was.
    pub fn mark(&mut self, unit: UnitId) -> bool {
        if self.units.contains_key(&unit) {
            return false;
        }
        self.units.insert(unit, None);
        true
    }

    /// Returns true if `unit` was pending.
    pub fn release(&mut self, unit: UnitId) -> bool {
        self.units.remove(&unit).is_some()
    }

    /// Keeps `unit` pending until a snapshot at `version` or later is
    /// installed. No effect on units that are not pending.
    pub fn await_version(&mut self, unit: UnitId, version: u64) {
        if let Some(required) = self.units.get_mut(&unit) {
            *required = Some(version);
        }
    }

    /// Releases every unit waiting on `installed` or an earlier version.
    ///
    /// In-flight units are untouched. Returns the released units.
    pub fn release_covered(&mut self, installed: u64) -> Vec<UnitId> {
        let covered: Vec<UnitId> = self
            .units
            .iter()
            .filter(|(_, required)| matches!(required, Some(version) if *version <= installed))
            .map(|(unit, _)| *unit)
            .collect();
        for unit in &covered {
            self.units.remove(unit);
        }
        covered
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.units.contains_key(&unit)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_outstanding_intent_per_unit() {
        let mut pending = PendingIntents::new();
        assert!(pending.mark(UnitId(1)));
        assert!(!pending.mark(UnitId(1)));
        assert!(pending.mark(UnitId(2)));
        assert_eq!(pending.len(), 2);

        assert!(pending.release(UnitId(1)));
        assert!(!pending.release(UnitId(1)));
    }

    #[test]
    fn waiting_units_release_once_covered() {
        let mut pending = PendingIntents::new();
        pending.mark(UnitId(1));
        pending.mark(UnitId(2));
        pending.await_version(UnitId(1), 4);

        assert!(pending.release_covered(3).is_empty());
        assert_eq!(pending.release_covered(4), vec![UnitId(1)]);
        // Still in flight, no version to wait for yet.
        assert!(pending.contains(UnitId(2)));
        assert_eq!(pending.release_covered(u64::MAX), Vec::<UnitId>::new());
    }

    #[test]
    fn awaiting_an_unknown_unit_is_ignored() {
        let mut pending = PendingIntents::new();
        pending.await_version(UnitId(9), 1);
        assert!(pending.is_empty());
    }
}

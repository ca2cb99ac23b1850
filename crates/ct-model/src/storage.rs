//! The storage yard: containers waiting for their departure transporter.

use std::collections::{BTreeMap, BTreeSet};

use ct_core::{Container, ContainerNumber, CraneRef, SimDate, TransportType};

use crate::{ModelError, ModelResult};

/// A container resting in the yard and the storage crane that placed it.
#[derive(Debug, Clone)]
pub struct StoredContainer {
    pub container: Container,
    pub crane:     CraneRef,
    pub stored_at: SimDate,
}

#[derive(Default)]
pub struct Storage {
    stored:   BTreeMap<ContainerNumber, StoredContainer>,
    /// Containers already promised to a pickup transporter.
    reserved: BTreeSet<ContainerNumber>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, container: Container, crane: CraneRef, now: SimDate) -> ModelResult<()> {
        let number = container.number;
        if self.stored.contains_key(&number) {
            return Err(ModelError::AlreadyStored(number));
        }
        self.stored.insert(number, StoredContainer { container, crane, stored_at: now });
        Ok(())
    }

    pub fn get(&self, number: ContainerNumber) -> Option<&StoredContainer> {
        self.stored.get(&number)
    }

    /// Remove `number` from the yard, dropping any reservation on it.
    pub fn take(&mut self, number: ContainerNumber) -> ModelResult<StoredContainer> {
        self.reserved.remove(&number);
        self.stored.remove(&number).ok_or(ModelError::NotInStorage(number))
    }

    /// Unreserved containers whose departure date is before `now`, grouped by
    /// departure type (in [`TransportType::ALL`] order) and sorted by
    /// departure date then number within a group.
    pub fn due_for_departure(&self, now: SimDate) -> Vec<(TransportType, Vec<ContainerNumber>)> {
        let mut groups: [Vec<&Container>; 4] = Default::default();
        for s in self.stored.values() {
            let c = &s.container;
            if c.departure_date < now && !self.reserved.contains(&c.number) {
                groups[c.departure_type.index()].push(c);
            }
        }

        TransportType::ALL
            .into_iter()
            .filter_map(|t| {
                let mut group = std::mem::take(&mut groups[t.index()]);
                if group.is_empty() {
                    return None;
                }
                group.sort_by_key(|c| (c.departure_date, c.number));
                Some((t, group.into_iter().map(|c| c.number).collect()))
            })
            .collect()
    }

    /// Promise `number` to a pickup.  Returns `false` if it was already
    /// promised or is not stored.
    pub fn reserve(&mut self, number: ContainerNumber) -> bool {
        self.stored.contains_key(&number) && self.reserved.insert(number)
    }

    pub fn is_reserved(&self, number: ContainerNumber) -> bool {
        self.reserved.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredContainer> {
        self.stored.values()
    }
}

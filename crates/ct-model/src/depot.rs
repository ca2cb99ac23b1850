//! Depot slots per transport type.
//!
//! A depot holds at most one transporter, from its ARRIVE until its DEPART
//! acknowledgement.  Free slots are always reported lowest index first.

use ct_core::{PerTransport, TransportType, TransporterId};

use crate::{ModelError, ModelResult};

pub struct Depots {
    slots: [Vec<Option<TransporterId>>; 4],
}

impl Depots {
    pub fn new(sizes: &PerTransport<u16>) -> Self {
        let slots = TransportType::ALL.map(|t| vec![None; sizes.get(t) as usize]);
        Self { slots }
    }

    /// Number of depots for `kind`.
    pub fn capacity(&self, kind: TransportType) -> usize {
        self.slots[kind.index()].len()
    }

    /// Empty depot indices for `kind`, ascending.
    pub fn free(&self, kind: TransportType) -> Vec<usize> {
        self.slots[kind.index()]
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    /// Lowest empty depot index for `kind`.
    pub fn first_free(&self, kind: TransportType) -> Option<usize> {
        self.slots[kind.index()].iter().position(Option::is_none)
    }

    pub fn holder(&self, kind: TransportType, index: usize) -> Option<TransporterId> {
        self.slots[kind.index()].get(index).copied().flatten()
    }

    pub fn occupy(&mut self, kind: TransportType, index: usize, transporter: TransporterId) -> ModelResult<()> {
        let slot = self.slots[kind.index()]
            .get_mut(index)
            .ok_or(ModelError::DepotOutOfRange { kind, index })?;
        if let Some(holder) = *slot {
            return Err(ModelError::DepotOccupied { kind, index, holder });
        }
        *slot = Some(transporter);
        Ok(())
    }

    /// Free `index`.  Returns the transporter that held it, if any.
    pub fn release(&mut self, kind: TransportType, index: usize) -> Option<TransporterId> {
        self.slots[kind.index()].get_mut(index).and_then(Option::take)
    }

    /// Every `(kind, index, holder)` triple currently occupied.
    pub fn occupied(&self) -> impl Iterator<Item = (TransportType, usize, TransporterId)> + '_ {
        TransportType::ALL.into_iter().flat_map(move |t| {
            self.slots[t.index()]
                .iter()
                .enumerate()
                .filter_map(move |(i, s)| s.map(|id| (t, i, id)))
        })
    }
}

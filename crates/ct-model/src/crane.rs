//! The static crane pool.
//!
//! Cranes are created once at startup and only ever allocated and released.
//! Ids are dense per kind (`0..n`); storage cranes split evenly between the
//! north and south lanes, the first half working north.

use ct_core::{CraneId, CraneKind, CranePoolSizes, CraneRef, MessageId, Side};

use crate::{ModelError, ModelResult};

#[derive(Debug, Clone)]
pub struct Crane {
    pub id:                 CraneId,
    pub kind:               CraneKind,
    pub side:               Side,
    pub occupied:           bool,
    pub processing_message: Option<MessageId>,
}

impl Crane {
    pub fn reference(&self) -> CraneRef {
        CraneRef::new(self.kind, self.id)
    }

    pub fn is_available(&self) -> bool {
        !self.occupied && self.processing_message.is_none()
    }
}

/// All cranes, one dense `Vec` per kind in [`CraneKind::ALL`] order.
pub struct CranePool {
    by_kind: [Vec<Crane>; 5],
}

impl CranePool {
    pub fn new(sizes: &CranePoolSizes) -> Self {
        let by_kind = CraneKind::ALL.map(|kind| {
            let n = sizes.get(kind);
            (0..n)
                .map(|i| Crane {
                    id: CraneId(i),
                    kind,
                    side: if kind == CraneKind::StorageCrane && i >= n.div_ceil(2) {
                        Side::South
                    } else {
                        Side::North
                    },
                    occupied: false,
                    processing_message: None,
                })
                .collect()
        });
        Self { by_kind }
    }

    /// Exact lookup.  `None` when the kind has no crane with that id.
    pub fn find_crane(&self, kind: CraneKind, id: CraneId) -> Option<&Crane> {
        self.by_kind[kind.index()].get(id.index())
    }

    pub fn get(&self, crane: CraneRef) -> ModelResult<&Crane> {
        self.find_crane(crane.kind, crane.id).ok_or(ModelError::UnknownCrane(crane))
    }

    pub fn get_mut(&mut self, crane: CraneRef) -> ModelResult<&mut Crane> {
        self.by_kind[crane.kind.index()]
            .get_mut(crane.id.index())
            .ok_or(ModelError::UnknownCrane(crane))
    }

    /// First free crane of `kind` in declaration order.
    pub fn find_available_crane(&self, kind: CraneKind) -> Option<CraneRef> {
        self.by_kind[kind.index()]
            .iter()
            .find(|c| c.is_available())
            .map(Crane::reference)
    }

    /// The crane of `kind` whose id equals `preferred` if it is free, else
    /// the first free one.
    pub fn find_preferred_crane(&self, kind: CraneKind, preferred: usize) -> Option<CraneRef> {
        self.by_kind[kind.index()]
            .get(preferred)
            .filter(|c| c.is_available())
            .map(Crane::reference)
            .or_else(|| self.find_available_crane(kind))
    }

    pub fn occupy(&mut self, crane: CraneRef) -> ModelResult<()> {
        self.get_mut(crane)?.occupied = true;
        Ok(())
    }

    /// Mark `crane` free and clear its in-flight message.
    pub fn release(&mut self, crane: CraneRef) -> ModelResult<()> {
        let c = self.get_mut(crane)?;
        c.occupied = false;
        c.processing_message = None;
        Ok(())
    }

    pub fn count(&self, kind: CraneKind) -> usize {
        self.by_kind[kind.index()].len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Crane> {
        self.by_kind.iter().flatten()
    }

    pub fn busy_count(&self) -> usize {
        self.iter().filter(|c| !c.is_available()).count()
    }
}

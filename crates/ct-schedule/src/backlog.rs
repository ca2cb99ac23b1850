//! `ContainerBacklog`: containers waiting for their arrival date.
//!
//! Keyed by arrival date so releasing everything due is a single
//! `split_off`, O(log D) in the number of distinct dates rather than a scan
//! over every pending container.

use std::collections::BTreeMap;

use ct_core::{Container, SimDate};

/// Arrival-ordered queue of containers not yet on any transporter.
#[derive(Default, Debug)]
pub struct ContainerBacklog {
    inner: BTreeMap<SimDate, Vec<Container>>,
    /// Cached container count for O(1) `len()`.
    total: usize,
}

impl ContainerBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `container` under its arrival date.
    pub fn push(&mut self, container: Container) {
        self.inner.entry(container.arrival_date).or_default().push(container);
        self.total += 1;
    }

    /// Remove and return every container whose arrival date is strictly
    /// before `now`.
    ///
    /// A container is returned at most once; later calls never see it again.
    pub fn due(&mut self, now: SimDate) -> Vec<Container> {
        let later = self.inner.split_off(&now);
        let due = std::mem::replace(&mut self.inner, later);

        let out: Vec<Container> = due.into_values().flatten().collect();
        self.total -= out.len();
        out
    }

    /// The earliest pending arrival date, or `None` if empty.
    pub fn next_arrival(&self) -> Option<SimDate> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate pending containers in release order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.inner.values().flatten()
    }
}

impl FromIterator<Container> for ContainerBacklog {
    fn from_iter<I: IntoIterator<Item = Container>>(iter: I) -> Self {
        let mut backlog = Self::new();
        for c in iter {
            backlog.push(c);
        }
        backlog
    }
}

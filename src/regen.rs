//! "Newest request wins" bookkeeping for interactive callers.
//!
//! An editor that regenerates on every parameter change can have several
//! generations in flight. Each request takes a ticket; a finished result is
//! only accepted if no newer ticket has been issued since, so superseded
//! results are dropped instead of being shown over (or merged with) newer ones.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::error::Result;
use crate::params::{OutputSet, TerrainParameters};
use crate::pipeline::{generate, TerrainArtifacts};

/// Identifies one regeneration request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RegenerationGate {
    latest: AtomicU64,
}

impl RegenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `result` through only if `ticket` is still the newest request.
    pub fn accept<T>(&self, ticket: Ticket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!("discarding superseded generation {:?}", ticket);
            None
        }
    }

    /// Take a ticket, run the pipeline, and keep the result only if nothing
    /// newer started meanwhile. `Ok(None)` means the result was superseded.
    pub fn run(&self, params: &TerrainParameters, outputs: OutputSet) -> Result<Option<TerrainArtifacts>> {
        let ticket = self.begin();
        let artifacts = generate(params, outputs)?;
        Ok(self.accept(ticket, artifacts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins() {
        let gate = RegenerationGate::new();
        let first = gate.begin();
        let second = gate.begin();
        assert!(second > first);
        assert_eq!(gate.accept(first, "old"), None);
        assert_eq!(gate.accept(second, "new"), Some("new"));
    }

    #[test]
    fn test_run_without_contention_accepts() {
        let gate = RegenerationGate::new();
        let params = TerrainParameters { width: 8, height: 8, ..Default::default() };
        let result = gate.run(&params, OutputSet::NoiseMap).unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_concurrent_begin_is_unique() {
        let gate = std::sync::Arc::new(RegenerationGate::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || (0..100).map(|_| gate.begin()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<Ticket> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 800);
    }
}

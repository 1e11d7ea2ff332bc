//! Throttling of published snapshots.

use crate::pacing::Pace;

/// Counts algorithmic steps and decides which ones are published.
///
/// Step indices are strictly increasing, so publications come out in step
/// order.
#[derive(Debug, Clone)]
pub struct SnapshotEmitter {
    pace: Pace,
    step: u64,
    emitted: u64,
}

impl SnapshotEmitter {
    pub fn new(pace: Pace) -> Self {
        Self {
            pace,
            step: 0,
            emitted: 0,
        }
    }

    /// Advance by one step. Returns true if this step should be published.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.step += 1;
        let emit = self.pace.should_emit(self.step);
        if emit {
            self.emitted += 1;
        }
        emit
    }

    /// Count a publication made outside the cadence.
    pub fn note_forced(&mut self) {
        self.emitted += 1;
    }

    /// Steps taken so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Snapshots published so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn pace(&self) -> &Pace {
        &self.pace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn emits_every_nth_step() {
        let mut emitter = SnapshotEmitter::new(Pace::new(Duration::ZERO, 3));
        let flags: Vec<bool> = (0..7).map(|_| emitter.advance()).collect();
        assert_eq!(flags, vec![false, false, true, false, false, true, false]);
        assert_eq!(emitter.step(), 7);
        assert_eq!(emitter.emitted(), 2);
    }

    #[test]
    fn cadence_of_one_emits_always() {
        let mut emitter = SnapshotEmitter::new(Pace::new(Duration::ZERO, 1));
        assert!((0..10).all(|_| emitter.advance()));
    }

    #[test]
    fn forced_publications_are_counted() {
        let mut emitter = SnapshotEmitter::new(Pace::new(Duration::ZERO, 100));
        emitter.advance();
        emitter.note_forced();
        assert_eq!(emitter.emitted(), 1);
        assert_eq!(emitter.step(), 1);
    }
}

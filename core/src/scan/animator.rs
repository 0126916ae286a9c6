//! Simulated scan progress shown while an analysis request is in flight.
//!
//! The real duration of a request is unknown, so progress eases toward a
//! ceiling below 100 and only jumps to 100 when the response arrives.

use crate::math::easing::{Approach, EasingHelper};
use log::debug;
use serde::Serialize;

pub const PHASE_LABELS: [&str; 7] = [
    "Initializing System",
    "Calibrating Signals",
    "Extracting Features",
    "Synthesizing Patterns",
    "Running Inference",
    "Aggregating Metrics",
    "Finalizing Report",
];

/// Lower progress bound of each phase, ascending, one per label.
pub const PHASE_THRESHOLDS: [f64; 7] = [0.0, 12.0, 28.0, 46.0, 64.0, 82.0, 95.0];

pub const SCAN_CEILING: f64 = 92.0;
pub const MIN_STEP: f64 = 0.6;
pub const DECAY_FACTOR: f64 = 0.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    Idle,
    Scanning,
    /// Progress has converged on the ceiling but no response has arrived yet.
    Settling,
    Complete,
}

/// Read-only snapshot handed to the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanState {
    pub progress: f64,
    pub phase_index: usize,
    pub target: f64,
    pub status: ScanStatus,
}

impl ScanState {
    fn idle() -> Self {
        Self {
            progress: 0.0,
            phase_index: 0,
            target: SCAN_CEILING,
            status: ScanStatus::Idle,
        }
    }

    pub fn phase_label(&self) -> &'static str {
        PHASE_LABELS
            .get(self.phase_index)
            .copied()
            .unwrap_or("Analyzing")
    }
}

/// Proof of ownership of the current tick loop.
///
/// Returned by [`ScanAnimator::start`] and consumed by `complete` or `cancel`.
/// Starting a new scan invalidates every handle issued before it.
#[derive(Debug, PartialEq, Eq)]
pub struct ScanHandle {
    generation: u64,
}

impl ScanHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct ScanAnimator {
    state: ScanState,
    generation: u64,
    active: Option<u64>,
}

impl ScanAnimator {
    pub fn new() -> Self {
        Self {
            state: ScanState::idle(),
            generation: 0,
            active: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn start(&mut self) -> ScanHandle {
        self.generation += 1;
        self.active = Some(self.generation);
        self.state = ScanState {
            progress: 0.0,
            phase_index: 0,
            target: SCAN_CEILING,
            status: ScanStatus::Scanning,
        };
        debug!("scan {} started", self.generation);
        ScanHandle {
            generation: self.generation,
        }
    }

    /// Advances one animation frame. Returns `false` for a stale handle.
    pub fn tick(&mut self, handle: &ScanHandle) -> bool {
        if !self.owns(handle) {
            return false;
        }

        let next = EasingHelper::approach(
            self.state.progress,
            self.state.target,
            MIN_STEP,
            DECAY_FACTOR,
        );
        if let Approach::Settle(_) = next {
            if self.state.status == ScanStatus::Scanning {
                debug!("scan {} settling near {}", handle.generation, self.state.target);
            }
            self.state.status = ScanStatus::Settling;
        }
        self.state.progress = next.value();
        self.state.phase_index = phase_for(self.state.progress);
        true
    }

    /// Snaps to 100% and the final phase. Stale handles are ignored.
    pub fn complete(&mut self, handle: ScanHandle) {
        if !self.owns(&handle) {
            return;
        }
        self.active = None;
        self.state.progress = 100.0;
        self.state.phase_index = PHASE_LABELS.len() - 1;
        self.state.status = ScanStatus::Complete;
        debug!("scan {} complete", handle.generation);
    }

    /// Tears the scan down without a result.
    pub fn cancel(&mut self, handle: ScanHandle) {
        if !self.owns(&handle) {
            return;
        }
        self.active = None;
        self.state = ScanState::idle();
        debug!("scan {} cancelled", handle.generation);
    }

    fn owns(&self, handle: &ScanHandle) -> bool {
        self.active == Some(handle.generation)
    }
}

impl Default for ScanAnimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the phase band containing `progress`.
pub fn phase_for(progress: f64) -> usize {
    PHASE_THRESHOLDS
        .iter()
        .enumerate()
        .position(|(i, &lower)| {
            let upper = PHASE_THRESHOLDS.get(i + 1).copied().unwrap_or(101.0);
            progress >= lower && progress < upper
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_state() {
        let mut animator = ScanAnimator::new();
        assert_eq!(animator.state().status, ScanStatus::Idle);
        let handle = animator.start();
        let state = animator.state();
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.phase_index, 0);
        assert_eq!(state.target, 92.0);
        assert_eq!(state.status, ScanStatus::Scanning);
        animator.complete(handle);
    }

    #[test]
    fn progress_rises_strictly_and_stays_below_ceiling() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        let mut previous = animator.state().progress;
        let mut scanning_ticks = 0;

        while animator.state().status == ScanStatus::Scanning {
            assert!(animator.tick(&handle));
            let state = animator.state();
            assert!(state.progress > previous);
            assert!(state.progress < SCAN_CEILING);
            previous = state.progress;
            scanning_ticks += 1;
            assert!(scanning_ticks < 1_000, "never left Scanning");
        }

        assert_eq!(animator.state().status, ScanStatus::Settling);
        for _ in 0..10_000 {
            animator.tick(&handle);
            let state = animator.state();
            assert!(state.progress >= previous);
            assert!(state.progress < SCAN_CEILING);
            assert_eq!(state.status, ScanStatus::Settling);
            previous = state.progress;
        }
    }

    #[test]
    fn settling_still_moves_for_a_while() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        while animator.state().status == ScanStatus::Scanning {
            animator.tick(&handle);
        }
        let before = animator.state().progress;
        for _ in 0..5 {
            animator.tick(&handle);
        }
        assert!(animator.state().progress > before);
    }

    #[test]
    fn phase_bands() {
        assert_eq!(phase_for(0.0), 0);
        assert_eq!(phase_for(11.99), 0);
        assert_eq!(phase_for(12.0), 1);
        assert_eq!(phase_for(45.9), 2);
        assert_eq!(phase_for(46.0), 3);
        assert_eq!(phase_for(63.9), 3);
        assert_eq!(phase_for(91.9), 5);
        assert_eq!(phase_for(95.0), 6);
        assert_eq!(phase_for(100.0), 6);
    }

    #[test]
    fn phase_never_decreases_while_ticking() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        let mut phase = 0;
        for _ in 0..400 {
            animator.tick(&handle);
            let next = animator.state().phase_index;
            assert!(next >= phase);
            assert!(next < PHASE_LABELS.len() - 1);
            phase = next;
        }
        assert_eq!(phase, 5);
    }

    #[test]
    fn complete_snaps_regardless_of_progress() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        while animator.state().progress < 10.0 {
            animator.tick(&handle);
        }
        assert!(animator.state().progress < 28.0);
        animator.complete(handle);
        let state = animator.state();
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.phase_index, 6);
        assert_eq!(state.status, ScanStatus::Complete);
        assert_eq!(state.phase_label(), "Finalizing Report");
    }

    #[test]
    fn new_start_invalidates_previous_handle() {
        let mut animator = ScanAnimator::new();
        let first = animator.start();
        for _ in 0..20 {
            animator.tick(&first);
        }
        let second = animator.start();
        assert_eq!(animator.state().progress, 0.0);
        assert!(!animator.tick(&first));
        assert_eq!(animator.state().progress, 0.0);

        animator.complete(first);
        assert_eq!(animator.state().status, ScanStatus::Scanning);

        assert!(animator.tick(&second));
        animator.complete(second);
        assert_eq!(animator.state().status, ScanStatus::Complete);
    }

    #[test]
    fn completed_handle_cannot_tick() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        let generation = handle.generation();
        animator.complete(handle);
        let forged = ScanHandle { generation };
        assert!(!animator.tick(&forged));
        assert_eq!(animator.state().progress, 100.0);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut animator = ScanAnimator::new();
        let handle = animator.start();
        animator.tick(&handle);
        animator.cancel(handle);
        assert_eq!(animator.state().status, ScanStatus::Idle);
        assert_eq!(animator.state().progress, 0.0);
    }
}

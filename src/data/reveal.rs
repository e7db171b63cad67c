//! Progressive reveal of the sorted segment list
//!
//! The animator is a small state machine advanced by elapsed time. Every
//! full period reveals one more segment until the last one is visible.
//! Installing a new segment list goes through [`RevealAnimator::restart`].

use std::time::Duration;

/// Default time between two reveal steps
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Periods shorter than this are raised to it
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// No segments to reveal
    Idle,
    /// Segments `0..=index` are visible and more remain
    Revealing { index: usize },
    /// Every segment is visible; `index` is the last one
    Complete { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealAnimator {
    state: RevealState,
    segment_count: usize,
    period: Duration,
    /// Elapsed time not yet converted into a step
    carry: Duration,
}

impl RevealAnimator {
    pub fn new(period: Duration) -> Self {
        Self {
            state: RevealState::Idle,
            segment_count: 0,
            period: period.max(MIN_TICK),
            carry: Duration::ZERO,
        }
    }

    /// Start over with a new list of `segment_count` segments, showing the first one.
    pub fn restart(&mut self, segment_count: usize) {
        self.segment_count = segment_count;
        self.carry = Duration::ZERO;
        self.state = match segment_count {
            0 => RevealState::Idle,
            1 => RevealState::Complete { index: 0 },
            _ => RevealState::Revealing { index: 0 },
        };
    }

    /// Reveal one more segment. Returns false when there was nothing left to reveal.
    pub fn step(&mut self) -> bool {
        let RevealState::Revealing { index } = self.state else {
            return false;
        };
        let next = index + 1;
        self.state = if next + 1 >= self.segment_count {
            RevealState::Complete { index: next }
        } else {
            RevealState::Revealing { index: next }
        };
        true
    }

    /// Account for `elapsed` wall time, applying one step per full period.
    ///
    /// Returns the number of steps applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.is_revealing() {
            self.carry = Duration::ZERO;
            return 0;
        }

        self.carry += elapsed;
        let mut steps = 0;
        while self.carry >= self.period && self.step() {
            self.carry -= self.period;
            steps += 1;
        }
        if !self.is_revealing() {
            self.carry = Duration::ZERO;
        }
        steps
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Step counter; 0 while idle
    pub fn index(&self) -> usize {
        match self.state {
            RevealState::Idle => 0,
            RevealState::Revealing { index } | RevealState::Complete { index } => index,
        }
    }

    /// Length of the visible prefix of the segment list
    pub fn visible_len(&self) -> usize {
        match self.state {
            RevealState::Idle => 0,
            RevealState::Revealing { index } | RevealState::Complete { index } => index + 1,
        }
    }

    pub fn is_revealing(&self) -> bool {
        matches!(self.state, RevealState::Revealing { .. })
    }

    /// Time left until the next step, or `None` when no step is pending
    pub fn time_until_next_step(&self) -> Option<Duration> {
        self.is_revealing()
            .then(|| self.period.saturating_sub(self.carry))
    }
}

impl Default for RevealAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn test_empty_list_stays_idle() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(0);
        assert_eq!(animator.state(), RevealState::Idle);
        assert_eq!(animator.advance(Duration::from_secs(1)), 0);
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.visible_len(), 0);
        assert_eq!(animator.time_until_next_step(), None);
    }

    #[test]
    fn test_single_segment_is_complete_immediately() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(1);
        assert_eq!(animator.state(), RevealState::Complete { index: 0 });
        assert_eq!(animator.visible_len(), 1);
        assert!(!animator.step());
    }

    #[test]
    fn test_steps_until_complete() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(3);
        assert_eq!(animator.state(), RevealState::Revealing { index: 0 });
        assert_eq!(animator.visible_len(), 1);

        assert!(animator.step());
        assert_eq!(animator.state(), RevealState::Revealing { index: 1 });

        assert!(animator.step());
        assert_eq!(animator.state(), RevealState::Complete { index: 2 });
        assert_eq!(animator.visible_len(), 3);

        assert!(!animator.step());
        assert_eq!(animator.index(), 2);
    }

    #[test]
    fn test_advance_converts_time_into_steps() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(100);

        assert_eq!(animator.advance(Duration::from_millis(4)), 0);
        assert_eq!(
            animator.time_until_next_step(),
            Some(Duration::from_millis(6))
        );
        assert_eq!(animator.advance(Duration::from_millis(6)), 1);
        assert_eq!(animator.advance(Duration::from_millis(35)), 3);
        assert_eq!(animator.index(), 4);
        assert_eq!(
            animator.time_until_next_step(),
            Some(Duration::from_millis(5))
        );
    }

    #[test]
    fn test_index_is_monotonic_and_clamped() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(25);

        let mut previous = animator.index();
        for frame in 0..100 {
            animator.advance(Duration::from_millis(frame % 17));
            let index = animator.index();
            assert!(index >= previous);
            assert!(index <= 24);
            previous = index;
        }
        assert_eq!(animator.state(), RevealState::Complete { index: 24 });
        assert_eq!(animator.visible_len(), 25);
    }

    #[test]
    fn test_large_jump_stops_at_last_segment() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(5);
        assert_eq!(animator.advance(Duration::from_secs(60)), 4);
        assert_eq!(animator.state(), RevealState::Complete { index: 4 });
        assert_eq!(animator.time_until_next_step(), None);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut animator = RevealAnimator::new(TICK);
        animator.restart(10);
        animator.advance(Duration::from_millis(55));
        assert_eq!(animator.index(), 5);

        animator.restart(8);
        assert_eq!(animator.state(), RevealState::Revealing { index: 0 });
        assert_eq!(animator.segment_count(), 8);
        assert_eq!(
            animator.time_until_next_step(),
            Some(Duration::from_millis(10))
        );
    }

    #[test]
    fn test_zero_period_is_raised() {
        let animator = RevealAnimator::new(Duration::ZERO);
        assert_eq!(animator.period(), Duration::from_millis(1));
    }
}

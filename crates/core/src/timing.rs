//! Cooperative timing coordinator.
//!
//! Single-threaded and poll driven: the caller passes the current monotonic
//! time to [`TimingCoordinator::advance`] once per loop iteration and gets
//! back the cues that came due. Nothing runs from an interrupt or a thread.
//!
//! Each timer is `Idle`, `Armed(deadline)` or `Fired`:
//!
//! - **FlashPlayer**: periodic, toggles the player icon
//! - **FlashTarget**: periodic, toggles empty targets
//! - **EndPushAnimation**: one-shot, armed when a box lands on a target
//!
//! Periodic timers re-arm at `now + period` when they fire, so a late poll
//! does not cause a burst of catch-up cues.
//!
//! While paused no cue fires. Resuming shifts every armed deadline and the
//! elapsed-time origin forward by the paused interval, so paused time is
//! invisible to both.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{PLAYER_FLASH_MS, PUSH_ANIMATION_MS, TARGET_FLASH_MS};

/// Something the shell should render because a timer came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    FlashPlayer,
    FlashTarget,
    EndPushAnimation,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::FlashPlayer, Cue::FlashTarget, Cue::EndPushAnimation];

    fn index(self) -> usize {
        match self {
            Cue::FlashPlayer => 0,
            Cue::FlashTarget => 1,
            Cue::EndPushAnimation => 2,
        }
    }
}

/// Cues fired by one `advance` call, in [`Cue::ALL`] order.
pub type Fired = ArrayVec<Cue, 3>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Armed(Instant),
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Periodic,
    OneShot,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    period: Duration,
    repeat: Repeat,
    phase: TimerPhase,
    last_fired: Option<Instant>,
}

impl Timer {
    fn periodic(period: Duration, now: Instant) -> Self {
        Self {
            period,
            repeat: Repeat::Periodic,
            phase: TimerPhase::Armed(now + period),
            last_fired: None,
        }
    }

    fn one_shot(period: Duration) -> Self {
        Self {
            period,
            repeat: Repeat::OneShot,
            phase: TimerPhase::Idle,
            last_fired: None,
        }
    }
}

/// Timer periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub player_flash: Duration,
    pub target_flash: Duration,
    pub push_animation: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            player_flash: Duration::from_millis(PLAYER_FLASH_MS as u64),
            target_flash: Duration::from_millis(TARGET_FLASH_MS as u64),
            push_animation: Duration::from_millis(PUSH_ANIMATION_MS as u64),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimingCoordinator {
    /// Latest time seen by `advance` (never moves backwards).
    now: Instant,
    /// Elapsed-time origin, shifted forward by every pause.
    origin: Instant,
    paused_at: Option<Instant>,
    timers: [Timer; 3],
}

impl TimingCoordinator {
    pub fn new(now: Instant, config: TimingConfig) -> Self {
        Self {
            now,
            origin: now,
            paused_at: None,
            timers: [
                Timer::periodic(config.player_flash, now),
                Timer::periodic(config.target_flash, now),
                Timer::one_shot(config.push_animation),
            ],
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Record `now` and fire every armed timer whose deadline has passed.
    ///
    /// While paused the time is still recorded but nothing fires.
    pub fn advance(&mut self, now: Instant) -> Fired {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;

        let mut fired = Fired::new();
        if self.paused_at.is_some() {
            return fired;
        }

        for cue in Cue::ALL {
            let timer = &mut self.timers[cue.index()];
            let TimerPhase::Armed(deadline) = timer.phase else {
                continue;
            };
            if now < deadline {
                continue;
            }

            timer.last_fired = Some(now);
            timer.phase = match timer.repeat {
                Repeat::Periodic => TimerPhase::Armed(now + timer.period),
                Repeat::OneShot => TimerPhase::Fired,
            };
            fired.push(cue);
        }

        fired
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze the clock at the last advanced time. Returns false if already
    /// paused.
    pub fn pause(&mut self) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(self.now);
        true
    }

    /// Unfreeze, pushing every deadline and the elapsed origin forward by
    /// the paused interval. Returns the interval, or `None` if not paused.
    pub fn resume(&mut self) -> Option<Duration> {
        let paused_at = self.paused_at.take()?;
        let paused_for = self.now.saturating_duration_since(paused_at);

        self.origin += paused_for;
        for timer in &mut self.timers {
            if let TimerPhase::Armed(deadline) = timer.phase {
                timer.phase = TimerPhase::Armed(deadline + paused_for);
            }
        }

        Some(paused_for)
    }

    /// Play time since construction, excluding paused intervals.
    pub fn elapsed(&self) -> Duration {
        let end = self.paused_at.unwrap_or(self.now);
        end.saturating_duration_since(self.origin)
    }

    /// Whole seconds of play time, rounded down.
    pub fn seconds_elapsed(&self) -> u32 {
        u32::try_from(self.elapsed().as_secs()).unwrap_or(u32::MAX)
    }

    /// Start (or restart) the one-shot push animation window.
    pub fn arm_push_animation(&mut self) {
        let timer = &mut self.timers[Cue::EndPushAnimation.index()];
        timer.phase = TimerPhase::Armed(self.now + timer.period);
    }

    /// Restart the player flash cycle from now.
    pub fn restart_player_flash(&mut self) {
        let timer = &mut self.timers[Cue::FlashPlayer.index()];
        timer.phase = TimerPhase::Armed(self.now + timer.period);
    }

    pub fn phase(&self, cue: Cue) -> TimerPhase {
        self.timers[cue.index()].phase
    }

    pub fn deadline(&self, cue: Cue) -> Option<Instant> {
        match self.phase(cue) {
            TimerPhase::Armed(deadline) => Some(deadline),
            TimerPhase::Idle | TimerPhase::Fired => None,
        }
    }

    pub fn last_fired(&self, cue: Cue) -> Option<Instant> {
        self.timers[cue.index()].last_fired
    }
}

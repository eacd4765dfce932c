//! Voting coordinator: the debounce-driven WAITING/VOTING state machine.
//!
//! Every membership change while WAITING restarts a single debounce timer. When the
//! timer fires with more than `vote_threshold` contacts, one contact is drawn at random,
//! the rest are removed, and the survivor stays focused until its finger lifts.

use super::palette::ColorCycle;
use super::random::RandomSource;
use super::registry::{ContactRegistry, MarkerRenderer};
use crate::error::HostError;
use crate::model::{ChooserConfig, ContactId, MidVotePolicy, TouchPoint, VoteState};
use crate::util::{clog, cwarn};

/// One-shot timer owned by the coordinator. The host calls
/// [`VotingCoordinator::on_timer_fired`] when an armed timer expires.
pub trait DebounceTimer {
    type Handle;

    fn arm(&mut self, delay_ms: u32) -> Result<Self::Handle, HostError>;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct VotingCoordinator<R: MarkerRenderer, T: DebounceTimer, G: RandomSource> {
    config: ChooserConfig,
    registry: ContactRegistry<R>,
    timer: T,
    pending: Option<T::Handle>,
    rng: G,
    state: VoteState,
    survivor: Option<ContactId>,
}

impl<R, T, G> VotingCoordinator<R, T, G>
where
    R: MarkerRenderer,
    T: DebounceTimer,
    G: RandomSource,
{
    pub fn new(config: ChooserConfig, renderer: R, timer: T, mut rng: G) -> Self {
        let colors = ColorCycle::new(config.palette.clone(), &mut rng);
        Self {
            registry: ContactRegistry::new(renderer, colors),
            config,
            timer,
            pending: None,
            rng,
            state: VoteState::Waiting,
            survivor: None,
        }
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    /// The drawn contact while VOTING.
    pub fn survivor(&self) -> Option<ContactId> {
        self.survivor
    }

    pub fn registry(&self) -> &ContactRegistry<R> {
        &self.registry
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Handles a touch-begin event's changed touches. Returns how many contacts were added.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) -> usize {
        if self.state == VoteState::Voting && self.config.mid_vote == MidVotePolicy::Suppress {
            return 0;
        }
        let added = touches
            .iter()
            .filter(|t| self.registry.add_contact(t.id, t.x, t.y))
            .count();
        // The whole burst is registered before the debounce is armed once.
        if added > 0 {
            self.reset_vote_timer();
        }
        added
    }

    /// Handles a touch-end (or touch-cancel) event's changed identifiers.
    pub fn on_touch_end(&mut self, ids: &[ContactId]) {
        match self.state {
            VoteState::Waiting => {
                let mut changed = false;
                for &id in ids {
                    changed |= self.registry.remove_contact(id);
                }
                if changed {
                    self.reset_vote_timer();
                }
            }
            VoteState::Voting => {
                for &id in ids {
                    if self.survivor == Some(id) {
                        self.release_survivor(id);
                    } else {
                        // Eliminated ids are already gone; mid-vote arrivals just leave.
                        self.registry.remove_contact(id);
                    }
                }
            }
        }
    }

    /// Runs the draw. Called by the host when the armed debounce timer expires.
    pub fn on_timer_fired(&mut self) {
        self.pending = None;
        if self.state == VoteState::Voting {
            return;
        }
        let ids = self.registry.all_ids();
        if ids.len() <= self.config.vote_threshold {
            clog(&format!("vote skipped: {} contact(s)", ids.len()));
            return;
        }

        let chosen = ids[self.rng.next_index(ids.len())];
        for &id in ids.iter().filter(|&&id| id != chosen) {
            self.registry.remove_contact(id);
        }
        self.state = VoteState::Voting;
        self.survivor = Some(chosen);
        clog(&format!("vote: {} of {} contacts chosen", chosen, ids.len()));

        self.registry
            .set_focus(chosen, Some(self.config.background_color.as_str()));
        if let Some(c) = self.registry.get(chosen) {
            let (x, y, color) = (c.x, c.y, c.color.clone());
            self.registry
                .renderer_mut()
                .set_focus_overlay(true, x, y, &color);
        }
    }

    /// Cancels the timer and removes every marker and the overlay. Safe to call twice.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.registry.clear();
        self.registry.renderer_mut().dispose();
        self.state = VoteState::Waiting;
        self.survivor = None;
    }

    fn release_survivor(&mut self, id: ContactId) {
        self.registry.set_focus(id, None);
        if let Some(c) = self.registry.get(id) {
            let (x, y, color) = (c.x, c.y, c.color.clone());
            self.registry
                .renderer_mut()
                .set_focus_overlay(false, x, y, &color);
        }
        self.registry.remove_contact(id);
        self.survivor = None;
        self.state = VoteState::Waiting;
        clog("vote released");
    }

    fn reset_vote_timer(&mut self) {
        if self.state == VoteState::Voting {
            return;
        }
        self.cancel_pending();
        match self.timer.arm(self.config.stable_ms) {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => cwarn(&e.to_string()),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }
}

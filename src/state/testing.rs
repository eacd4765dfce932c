// Test doubles for the renderer and the debounce timer.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::coordinator::{DebounceTimer, VotingCoordinator};
use super::random::RandomSource;
use super::registry::MarkerRenderer;
use crate::error::HostError;

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerView {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub background: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

#[derive(Default)]
struct RenderLog {
    next_handle: u32,
    markers: BTreeMap<u32, MarkerView>,
    destroyed: usize,
    overlay: Option<OverlayView>,
    disposed: bool,
    fail_next: bool,
}

/// Records renderer calls. Clones share the same log.
#[derive(Clone, Default)]
pub struct FakeRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl FakeRenderer {
    pub fn live_markers(&self) -> usize {
        self.log.borrow().markers.len()
    }

    pub fn marker(&self, handle: u32) -> Option<MarkerView> {
        self.log.borrow().markers.get(&handle).cloned()
    }

    pub fn destroyed(&self) -> usize {
        self.log.borrow().destroyed
    }

    pub fn overlay(&self) -> Option<OverlayView> {
        self.log.borrow().overlay.clone()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay().is_some_and(|o| o.visible)
    }

    pub fn disposed(&self) -> bool {
        self.log.borrow().disposed
    }

    pub fn fail_next_marker(&self) {
        self.log.borrow_mut().fail_next = true;
    }
}

impl MarkerRenderer for FakeRenderer {
    type Handle = u32;

    fn create_marker(&mut self, x: f64, y: f64, color: &str) -> Result<u32, HostError> {
        let mut log = self.log.borrow_mut();
        if std::mem::take(&mut log.fail_next) {
            return Err(HostError::Marker("refused".into()));
        }
        let handle = log.next_handle;
        log.next_handle += 1;
        log.markers.insert(
            handle,
            MarkerView {
                x,
                y,
                color: color.to_string(),
                background: None,
            },
        );
        Ok(handle)
    }

    fn destroy_marker(&mut self, handle: u32) {
        let mut log = self.log.borrow_mut();
        assert!(log.markers.remove(&handle).is_some(), "marker {handle} destroyed twice");
        log.destroyed += 1;
    }

    fn set_marker_background(&mut self, handle: &u32, color: Option<&str>) {
        if let Some(m) = self.log.borrow_mut().markers.get_mut(handle) {
            m.background = color.map(str::to_string);
        }
    }

    fn set_focus_overlay(&mut self, visible: bool, x: f64, y: f64, color: &str) {
        self.log.borrow_mut().overlay = Some(OverlayView {
            visible,
            x,
            y,
            color: color.to_string(),
        });
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed = true;
    }
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u32,
    armed: BTreeMap<u32, u64>,
    arms: usize,
    cancels: usize,
    fail_next: bool,
}

/// Manual clock: timers only fire through [`advance`].
#[derive(Clone, Default)]
pub struct FakeTimer {
    clock: Rc<RefCell<Clock>>,
}

impl FakeTimer {
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn armed(&self) -> usize {
        self.clock.borrow().armed.len()
    }

    pub fn arms(&self) -> usize {
        self.clock.borrow().arms
    }

    pub fn cancels(&self) -> usize {
        self.clock.borrow().cancels
    }

    /// Deadline of the single live timer, if any.
    pub fn deadline(&self) -> Option<u64> {
        self.clock.borrow().armed.values().copied().min()
    }

    pub fn fail_next_arm(&self) {
        self.clock.borrow_mut().fail_next = true;
    }

    fn pop_due(&self, until: u64) -> Option<u64> {
        let mut clock = self.clock.borrow_mut();
        let (id, at) = clock
            .armed
            .iter()
            .filter(|(_, at)| **at <= until)
            .min_by_key(|(_, at)| **at)
            .map(|(id, at)| (*id, *at))?;
        clock.armed.remove(&id);
        clock.now = at;
        Some(at)
    }

    fn set_now(&self, now: u64) {
        self.clock.borrow_mut().now = now;
    }
}

impl DebounceTimer for FakeTimer {
    type Handle = u32;

    fn arm(&mut self, delay_ms: u32) -> Result<u32, HostError> {
        let mut clock = self.clock.borrow_mut();
        if std::mem::take(&mut clock.fail_next) {
            return Err(HostError::Timer("refused".into()));
        }
        let id = clock.next_id;
        clock.next_id += 1;
        let at = clock.now + u64::from(delay_ms);
        clock.armed.insert(id, at);
        clock.arms += 1;
        Ok(id)
    }

    fn cancel(&mut self, handle: u32) {
        let mut clock = self.clock.borrow_mut();
        clock.armed.remove(&handle);
        clock.cancels += 1;
    }
}

/// Moves the clock forward by `ms`, firing due timers in order. Returns the fire times.
pub fn advance<R, G>(
    coordinator: &mut VotingCoordinator<R, FakeTimer, G>,
    timer: &FakeTimer,
    ms: u64,
) -> Vec<u64>
where
    R: MarkerRenderer,
    G: RandomSource,
{
    let until = timer.now() + ms;
    let mut fired = Vec::new();
    while let Some(at) = timer.pop_due(until) {
        fired.push(at);
        coordinator.on_timer_fired();
    }
    timer.set_now(until);
    fired
}

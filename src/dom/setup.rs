use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, EventTarget, HtmlElement, TouchEvent};
use yew::html::NodeRef;

use super::renderer::DomRenderer;
use super::timer::{MathRandom, WindowTimer};
use crate::error::SetupError;
use crate::model::{ChooserConfig, ContactId, TouchPoint};
use crate::state::{RandomSource, SeededRandom, VotingCoordinator};
use crate::util::{clog, cwarn};

type WebCoordinator = VotingCoordinator<DomRenderer, WindowTimer, Box<dyn RandomSource>>;

// touchcancel ends a contact the same way touchend does.
const END_EVENTS: [&str; 2] = ["touchend", "touchcancel"];

/// Attaches the chooser: touch listeners on `listener`, markers and overlay in `container`.
/// The returned [`Teardown`] undoes all of it.
pub fn setup_chooser(
    listener: &NodeRef,
    container: &NodeRef,
    config: ChooserConfig,
) -> Result<Teardown, SetupError> {
    let listener = listener
        .cast::<Element>()
        .map(EventTarget::from)
        .ok_or(SetupError::MissingListener)?;
    let container = container
        .cast::<HtmlElement>()
        .ok_or(SetupError::MissingContainer)?;
    attach_chooser(listener, container, config)
}

fn attach_chooser(
    listener: EventTarget,
    container: HtmlElement,
    config: ChooserConfig,
) -> Result<Teardown, SetupError> {
    let window = web_sys::window().ok_or(SetupError::MissingWindow)?;
    let document = window.document().ok_or(SetupError::MissingDocument)?;

    let renderer = DomRenderer::new(document, container, config.marker_size)?;
    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(MathRandom),
    };

    let coordinator = Rc::new_cyclic(|weak: &Weak<RefCell<WebCoordinator>>| {
        let weak = weak.clone();
        let timer = WindowTimer::new(window.clone(), move || {
            with_coordinator(&weak, |c| c.on_timer_fired());
        });
        RefCell::new(VotingCoordinator::new(config, renderer, timer, rng))
    });

    let on_start = {
        let weak = Rc::downgrade(&coordinator);
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let points = changed_points(&e);
            let mut added = 0;
            with_coordinator(&weak, |c| {
                added = c.on_touch_start(&points);
                clog(&status(c));
            });
            if added > 0 {
                e.prevent_default();
            }
        }) as Box<dyn FnMut(_)>)
    };
    let on_end = {
        let weak = Rc::downgrade(&coordinator);
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let ids: Vec<ContactId> = changed_points(&e).iter().map(|p| p.id).collect();
            with_coordinator(&weak, |c| {
                c.on_touch_end(&ids);
                clog(&status(c));
            });
        }) as Box<dyn FnMut(_)>)
    };

    let mut teardown = Teardown {
        attached: Some(Attached {
            listener,
            coordinator,
            on_start,
            on_end,
        }),
    };
    if let Err(e) = teardown.attach() {
        teardown.run();
        return Err(e);
    }
    clog("chooser attached");
    Ok(teardown)
}

struct Attached {
    listener: EventTarget,
    coordinator: Rc<RefCell<WebCoordinator>>,
    on_start: Closure<dyn FnMut(TouchEvent)>,
    on_end: Closure<dyn FnMut(TouchEvent)>,
}

/// Detaches the chooser. Runs at most once, either explicitly or on drop.
pub struct Teardown {
    attached: Option<Attached>,
}

impl Teardown {
    fn attach(&self) -> Result<(), SetupError> {
        let Some(a) = &self.attached else {
            return Ok(());
        };
        a.listener
            .add_event_listener_with_callback("touchstart", a.on_start.as_ref().unchecked_ref())?;
        for event in END_EVENTS {
            a.listener
                .add_event_listener_with_callback(event, a.on_end.as_ref().unchecked_ref())?;
        }
        Ok(())
    }

    pub fn run(&mut self) {
        let Some(a) = self.attached.take() else {
            return;
        };
        let _ = a
            .listener
            .remove_event_listener_with_callback("touchstart", a.on_start.as_ref().unchecked_ref());
        for event in END_EVENTS {
            let _ = a
                .listener
                .remove_event_listener_with_callback(event, a.on_end.as_ref().unchecked_ref());
        }
        match a.coordinator.try_borrow_mut() {
            Ok(mut c) => c.teardown(),
            Err(_) => cwarn("chooser teardown while busy; markers left in place"),
        };
        clog("chooser detached");
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

fn with_coordinator(weak: &Weak<RefCell<WebCoordinator>>, f: impl FnOnce(&mut WebCoordinator)) {
    let Some(rc) = weak.upgrade() else {
        return;
    };
    match rc.try_borrow_mut() {
        Ok(mut c) => f(&mut *c),
        Err(_) => cwarn("chooser busy; touch event dropped"),
    };
}

fn changed_points(e: &TouchEvent) -> Vec<TouchPoint> {
    let list = e.changed_touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint::new(t.identifier(), t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn status(c: &WebCoordinator) -> String {
    format!(
        "{:?} contacts={} survivor={:?} timer={}",
        c.state(),
        c.registry().len(),
        c.survivor(),
        c.has_pending_timer()
    )
}

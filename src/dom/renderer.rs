use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::error::{HostError, SetupError, js_error_text};
use crate::state::MarkerRenderer;
use crate::util::cwarn;

// Offset of the outer marker box relative to its ring (spin animation headroom).
const MARKER_MARGIN: f64 = 24.0;

/// Draws markers as nested divs inside the container, plus one shared focus overlay.
pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    overlay: HtmlElement,
    marker_size: f64,
}

impl DomRenderer {
    /// Creates the hidden focus overlay and inserts it into `container`.
    pub fn new(
        document: Document,
        container: HtmlElement,
        marker_size: f64,
    ) -> Result<Self, SetupError> {
        let overlay = create_div(&document, "focus-back")?;
        set_styles(
            &overlay,
            &[
                ("position", "absolute"),
                ("width", "100vmax"),
                ("height", "100vmax"),
                ("border-radius", "50%"),
                ("pointer-events", "none"),
                ("transition", "transform 0.6s ease-out"),
            ],
        );
        hide_overlay(&overlay);
        container.append_child(&overlay)?;
        Ok(Self {
            document,
            container,
            overlay,
            marker_size,
        })
    }

    fn build_marker(&self, x: f64, y: f64, color: &str) -> Result<HtmlElement, JsValue> {
        let size = self.marker_size;
        let outer = create_div(&self.document, "fp-outer")?;
        set_styles(
            &outer,
            &[
                ("position", "absolute"),
                ("top", px(y - size / 2.0 - MARKER_MARGIN).as_str()),
                ("left", px(x - size / 2.0 - MARKER_MARGIN).as_str()),
                ("padding", px(MARKER_MARGIN).as_str()),
                ("border-radius", "50%"),
                ("pointer-events", "none"),
            ],
        );

        let ring = create_div(&self.document, "fp")?;
        set_styles(
            &ring,
            &[
                ("width", px(size).as_str()),
                ("height", px(size).as_str()),
                ("padding", px(size / 16.0).as_str()),
                ("border-width", px(size / 8.0).as_str()),
                ("border-style", "solid"),
                ("border-color", "transparent"),
                ("border-left-color", color),
                ("border-top-color", color),
                ("border-radius", "50%"),
                ("box-sizing", "content-box"),
            ],
        );

        let circle = create_div(&self.document, "fp-core")?;
        set_styles(
            &circle,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("border-radius", "50%"),
                ("background-color", color),
            ],
        );

        ring.append_child(&circle)?;
        outer.append_child(&ring)?;
        self.container.append_child(&outer)?;
        Ok(outer)
    }
}

impl MarkerRenderer for DomRenderer {
    type Handle = HtmlElement;

    fn create_marker(&mut self, x: f64, y: f64, color: &str) -> Result<HtmlElement, HostError> {
        self.build_marker(x, y, color)
            .map_err(|e| HostError::Marker(js_error_text(&e)))
    }

    fn destroy_marker(&mut self, handle: HtmlElement) {
        if let Err(e) = self.container.remove_child(&handle) {
            cwarn(&format!("marker left in DOM: {}", js_error_text(&e)));
        }
    }

    fn set_marker_background(&mut self, handle: &HtmlElement, color: Option<&str>) {
        let _ = handle
            .style()
            .set_property("background-color", color.unwrap_or("transparent"));
    }

    fn set_focus_overlay(&mut self, visible: bool, x: f64, y: f64, color: &str) {
        if !visible {
            hide_overlay(&self.overlay);
            return;
        }
        let left = format!("calc({}px - 50vmax)", x);
        let top = format!("calc({}px - 50vmax)", y);
        set_styles(
            &self.overlay,
            &[
                ("visibility", "visible"),
                ("left", left.as_str()),
                ("top", top.as_str()),
                ("background-color", color),
                ("transform", "scale(3)"),
            ],
        );
    }

    fn dispose(&mut self) {
        if let Err(e) = self.container.remove_child(&self.overlay) {
            cwarn(&format!("focus overlay left in DOM: {}", js_error_text(&e)));
        }
    }
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    el.set_class_name(class);
    Ok(el)
}

fn set_styles(el: &HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        style.set_property(name, value).ok();
    }
}

fn hide_overlay(overlay: &HtmlElement) {
    set_styles(overlay, &[("visibility", "hidden"), ("transform", "scale(0)")]);
}

fn px(v: f64) -> String {
    format!("{}px", v)
}

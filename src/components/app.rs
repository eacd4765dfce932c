use crate::dom::setup_chooser;
use crate::model::ChooserConfig;
use crate::util::{clog, cwarn};
use yew::prelude::*;

// Optional JSON override for ChooserConfig, e.g. {"stable_ms": 1500}
const CONFIG_KEY: &str = "fp_config";

fn load_config() -> ChooserConfig {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(CONFIG_KEY) {
                match serde_json::from_str::<ChooserConfig>(&raw) {
                    Ok(cfg) => {
                        clog(&format!("{} loaded", CONFIG_KEY));
                        return cfg;
                    }
                    Err(e) => cwarn(&format!("ignoring {}: {}", CONFIG_KEY, e)),
                }
            }
        }
    }
    ChooserConfig::default()
}

#[function_component(App)]
pub fn app() -> Html {
    let container_ref = use_node_ref();

    // Attach once the container is mounted; detach on unmount.
    {
        let container_ref = container_ref.clone();
        use_effect_with((), move |_| {
            let teardown = match setup_chooser(&container_ref, &container_ref, load_config()) {
                Ok(t) => Some(t),
                Err(e) => {
                    cwarn(&format!("chooser setup failed: {}", e));
                    None
                }
            };
            move || {
                if let Some(mut t) = teardown {
                    t.run();
                }
            }
        });
    }

    html! {
        <div
            id="container"
            ref={container_ref}
            style="position:fixed; inset:0; overflow:hidden; touch-action:none; user-select:none; -webkit-user-select:none; background:#0e1116;"
        ></div>
    }
}

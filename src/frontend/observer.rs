use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::error::EffectResult;

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Intersection observer on a single element. `on_visible` runs for every
/// entry reported as intersecting; it receives the observer so it can stop
/// watching. Dropping the value disconnects the observer.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl VisibilityObserver {
    pub fn observe<F>(element: &Element, threshold: f64, root_margin: Option<&str>, mut on_visible: F) -> EffectResult<Self>
    where
        F: FnMut(&IntersectionObserver, &Element) + 'static,
    {
        let callback = EntriesCallback::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(&observer, &entry.target());
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(root_margin) = root_margin {
            options.set_root_margin(root_margin);
        }

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

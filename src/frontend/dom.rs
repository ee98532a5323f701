use std::{cell::RefCell, rc::Rc};

use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, MouseEvent, Window};

use super::error::{EffectError, EffectResult};
use crate::{
    config::{EffectsConfig, CONFIG_ELEMENT_ID},
    particles::Point,
    pointer::Rect,
};

pub fn browser_window() -> EffectResult<Window> {
    window().ok_or_else(|| EffectError::missing("window"))
}

pub fn document() -> EffectResult<Document> {
    browser_window()?
        .document()
        .ok_or_else(|| EffectError::missing("document"))
}

pub fn body() -> EffectResult<HtmlElement> {
    document()?.body().ok_or_else(|| EffectError::missing("body"))
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn client_point(event: &MouseEvent) -> Point {
    Point {
        x: f64::from(event.client_x()),
        y: f64::from(event.client_y()),
    }
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Elements under `root` matching `selector`, in document order.
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> EffectResult<Vec<T>> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    Defaults,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Defaults => "defaults",
        }
    }
}

/// Reads the optional JSON block the page embeds for tuning the effects.
pub fn load_config() -> (EffectsConfig, ConfigSource) {
    let embedded = document()
        .ok()
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());

    match embedded {
        Some(text) => (EffectsConfig::from_json(&text), ConfigSource::Embedded),
        None => (EffectsConfig::default(), ConfigSource::Defaults),
    }
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Calls `step` on every animation frame until it returns `false`. Dropping
/// the loop cancels the pending frame.
pub struct FrameLoop {
    pending: FrameSlot,
}

impl FrameLoop {
    pub fn start<F>(step: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let pending: FrameSlot = Rc::new(RefCell::new(None));
        schedule_frame(Rc::clone(&pending), Rc::new(RefCell::new(step)));
        Self { pending }
    }
}

fn schedule_frame<F>(pending: FrameSlot, step: Rc<RefCell<F>>)
where
    F: FnMut(f64) -> bool + 'static,
{
    let slot = Rc::clone(&pending);
    let frame = request_animation_frame(move |timestamp| {
        let keep_going = (&mut *step.borrow_mut())(timestamp);
        if keep_going {
            schedule_frame(slot, step);
        } else {
            slot.borrow_mut().take();
        }
    });
    *pending.borrow_mut() = Some(frame);
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.pending.borrow_mut().take();
    }
}

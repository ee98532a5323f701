use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use fastrand::Rng;
use gloo::events::EventListener;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use super::{
    dom::{browser_window, client_point, document, element_rect, prefers_reduced_motion, FrameLoop},
    error::{EffectError, EffectResult},
    use_effects_config,
};
use crate::{
    config::ParticleSettings,
    particles::{ParticleField, Point, Surface},
};

struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.context.begin_path();
        let _ = self.context.arc(center.x, center.y, radius, 0.0, TAU);
        self.context.set_fill_style_str(color);
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) {
        self.context.begin_path();
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(width);
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }
}

struct ParticleScene {
    field: ParticleField,
    surface: CanvasSurface,
}

/// Keeps the loop and listeners alive for as long as the canvas is mounted.
struct ParticleHandles {
    _frames: Option<FrameLoop>,
    _listeners: Vec<EventListener>,
}

/// Matches the backing store to the element's layout size and returns it.
fn fit_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
    canvas.set_width(u32::try_from(canvas.offset_width()).unwrap_or(0));
    canvas.set_height(u32::try_from(canvas.offset_height()).unwrap_or(0));
    (f64::from(canvas.width()), f64::from(canvas.height()))
}

fn mount_particles(canvas: HtmlCanvasElement, settings: ParticleSettings) -> EffectResult<ParticleHandles> {
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| EffectError::missing("canvas 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EffectError::Js("context is not 2d".to_string()))?;

    let (width, height) = fit_canvas(&canvas);
    let mut rng = Rng::with_seed(js_sys::Date::now().to_bits());
    let field = ParticleField::new(width, height, settings, &mut rng);
    info!(count = field.particles().len(), width, height, "particle field created");

    let scene = Rc::new(RefCell::new(ParticleScene {
        field,
        surface: CanvasSurface { context },
    }));
    let reduced_motion = prefers_reduced_motion();

    let window = browser_window()?;
    let document = document()?;
    let mut listeners = Vec::with_capacity(3);

    listeners.push({
        let scene = Rc::clone(&scene);
        let canvas = canvas.clone();
        EventListener::new(&window, "resize", move |_| {
            let (width, height) = fit_canvas(&canvas);
            let mut scene = scene.borrow_mut();
            let ParticleScene { field, surface } = &mut *scene;
            field.resize(width, height);
            if reduced_motion {
                field.render(surface);
            }
            debug!(width, height, "particle surface resized");
        })
    });

    listeners.push({
        let scene = Rc::clone(&scene);
        let canvas = canvas.clone();
        EventListener::new(&document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let local = element_rect(&canvas).offset_of(client_point(event));
            scene.borrow_mut().field.set_pointer(Some(local));
        })
    });

    listeners.push({
        let scene = Rc::clone(&scene);
        EventListener::new(&document, "mouseleave", move |_| {
            scene.borrow_mut().field.set_pointer(None);
        })
    });

    let frames = if reduced_motion {
        let mut scene = scene.borrow_mut();
        let ParticleScene { field, surface } = &mut *scene;
        field.render(surface);
        debug!("reduced motion, particle field drawn once");
        None
    } else {
        Some(FrameLoop::start(move |_| {
            let mut scene = scene.borrow_mut();
            let ParticleScene { field, surface } = &mut *scene;
            field.frame(surface);
            true
        }))
    };

    Ok(ParticleHandles {
        _frames: frames,
        _listeners: listeners,
    })
}

#[function_component(ParticleCanvas)]
pub fn particle_canvas() -> Html {
    let canvas_ref = use_node_ref();
    let config = use_effects_config();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            let handles = canvas_ref
                .cast::<HtmlCanvasElement>()
                .ok_or_else(|| EffectError::missing("#particleCanvas"))
                .and_then(|canvas| mount_particles(canvas, config.particles.clone()));

            let handles = match handles {
                Ok(handles) => Some(handles),
                Err(err) => {
                    debug!(effect = "particles", error = %err, "effect skipped");
                    None
                }
            };

            move || {
                if handles.is_some() {
                    debug!("particle loop stopped");
                }
                drop(handles);
            }
        });
    }

    html! {
        <canvas id="particleCanvas" class="particle-canvas" ref={canvas_ref} aria-hidden="true"></canvas>
    }
}

use std::{cell::RefCell, rc::Rc};

use gloo::timers::callback::Timeout;
use tracing::{debug, info};
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use super::{
    canvas::ParticleCanvas,
    dom::{client_point, element_rect, prefers_reduced_motion, query_all, FrameLoop},
    error::{EffectError, EffectResult},
    interactive::MagneticButton,
    observer::VisibilityObserver,
    use_effects_config,
};
use crate::{
    config::EffectsConfig,
    counters::{CounterAnimation, CounterTarget, OnceGate},
    particles::Point,
    pointer::{parallax_offsets, translate_css},
    typing::Typewriter,
};

const ORB_COUNT: usize = 3;
const STAT_SELECTOR: &str = ".stat-number[data-target]";

#[derive(Clone, PartialEq)]
pub struct Stat {
    pub target: &'static str,
    pub suffix: Option<&'static str>,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub name: AttrValue,
    pub tagline: AttrValue,
    pub stats: Vec<Stat>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let config = use_effects_config();
    let hero_ref = use_node_ref();
    let orb_offsets = use_state(|| None::<Vec<Point>>);

    let onmousemove = {
        let hero_ref = hero_ref.clone();
        let orb_offsets = orb_offsets.clone();
        let step = config.orb_speed_step;
        Callback::from(move |event: MouseEvent| {
            let Some(hero) = hero_ref.cast::<Element>() else {
                return;
            };
            if let Some(offsets) = parallax_offsets(client_point(&event), element_rect(&hero), ORB_COUNT, step) {
                orb_offsets.set(Some(offsets));
            }
        })
    };

    let orbs = (0..ORB_COUNT).map(|index| {
        let style = (*orb_offsets)
            .as_ref()
            .and_then(|offsets| offsets.get(index))
            .map(|offset| format!("transform: {};", translate_css(*offset)));
        html! {
            <div class={classes!("hero-orb", format!("hero-orb-{}", index + 1))} style={style} aria-hidden="true"></div>
        }
    });

    html! {
        <section id="home" class="hero" ref={hero_ref} onmousemove={onmousemove}>
            <ParticleCanvas />
            { for orbs }
            <div class="hero-content">
                <p class="hero-eyebrow">{props.tagline.clone()}</p>
                <h1 class="hero-title">{props.name.clone()}</h1>
                <p class="hero-role">
                    <TypedRole />
                    <span class="typed-cursor" aria-hidden="true">{"|"}</span>
                </p>
                <div class="hero-actions">
                    <MagneticButton href="#projects" class="btn btn-primary">{"Проекты"}</MagneticButton>
                    <MagneticButton href="#contact" class="btn btn-ghost">{"Связаться"}</MagneticButton>
                </div>
                <HeroStats stats={props.stats.clone()} />
            </div>
        </section>
    }
}

type TimerSlot = Rc<RefCell<Option<Timeout>>>;

fn schedule_keystroke(writer: Rc<RefCell<Typewriter>>, text: UseStateHandle<String>, slot: TimerSlot, delay_ms: u32) {
    let next_slot = Rc::clone(&slot);
    let timeout = Timeout::new(delay_ms, move || {
        let tick = writer.borrow_mut().tick();
        text.set(tick.text);
        schedule_keystroke(writer, text, next_slot, tick.delay_ms);
    });
    *slot.borrow_mut() = Some(timeout);
}

#[function_component(TypedRole)]
pub fn typed_role() -> Html {
    let config = use_effects_config();
    let text = use_state(String::new);

    {
        let text = text.clone();
        use_effect_with((), move |_| {
            let slot: TimerSlot = Rc::new(RefCell::new(None));
            match Typewriter::new(&config.roles, config.typing.clone()) {
                Some(writer) => {
                    debug!(roles = config.roles.len(), "typing effect started");
                    schedule_keystroke(Rc::new(RefCell::new(writer)), text, Rc::clone(&slot), 0);
                }
                None => debug!(effect = "typing", "effect skipped, no roles"),
            }

            move || {
                slot.borrow_mut().take();
            }
        });
    }

    html! {
        <span id="typedRole" class="typed-role">{(*text).clone()}</span>
    }
}

#[derive(Properties, PartialEq)]
struct HeroStatsProps {
    stats: Vec<Stat>,
}

struct StatCounter {
    element: HtmlElement,
    animation: CounterAnimation,
}

impl StatCounter {
    fn from_element(element: HtmlElement, duration_ms: f64) -> Self {
        let target = CounterTarget::parse(
            &element.get_attribute("data-target").unwrap_or_default(),
            element.get_attribute("data-suffix").as_deref(),
        );
        Self {
            element,
            animation: CounterAnimation::new(target, duration_ms),
        }
    }
}

fn start_counters(stats: &Element, config: &EffectsConfig, reduced_motion: bool) -> EffectResult<Vec<FrameLoop>> {
    let counters: Vec<StatCounter> = query_all::<HtmlElement>(stats, STAT_SELECTOR)?
        .into_iter()
        .map(|element| StatCounter::from_element(element, config.counter_duration_ms))
        .collect();
    info!(count = counters.len(), "counters fired");

    if reduced_motion {
        for counter in &counters {
            counter.element.set_text_content(Some(&counter.animation.final_text()));
        }
        return Ok(Vec::new());
    }

    Ok(counters
        .into_iter()
        .map(|mut counter| {
            FrameLoop::start(move |now| {
                let frame = counter.animation.frame(now);
                counter.element.set_text_content(Some(&frame.text));
                !frame.finished
            })
        })
        .collect())
}

fn watch_stats(
    stats: Element,
    config: Rc<EffectsConfig>,
    running: Rc<RefCell<Vec<FrameLoop>>>,
) -> EffectResult<VisibilityObserver> {
    let mut gate = OnceGate::default();
    let reduced_motion = prefers_reduced_motion();

    VisibilityObserver::observe(
        &stats,
        config.counter_visibility_threshold,
        None,
        move |observer, target| {
            if !gate.try_fire() {
                return;
            }
            observer.disconnect();
            match start_counters(target, &config, reduced_motion) {
                Ok(loops) => running.borrow_mut().extend(loops),
                Err(err) => debug!(effect = "counters", error = %err, "effect skipped"),
            }
        },
    )
}

#[function_component(HeroStats)]
fn hero_stats(props: &HeroStatsProps) -> Html {
    let config = use_effects_config();
    let stats_ref = use_node_ref();

    {
        let stats_ref = stats_ref.clone();
        use_effect_with((), move |_| {
            let running: Rc<RefCell<Vec<FrameLoop>>> = Rc::new(RefCell::new(Vec::new()));
            let observer = stats_ref
                .cast::<Element>()
                .ok_or_else(|| EffectError::missing(".hero-stats"))
                .and_then(|stats| watch_stats(stats, config, Rc::clone(&running)));

            if let Err(err) = &observer {
                debug!(effect = "counters", error = %err, "effect skipped");
            }

            move || {
                drop(observer);
                running.borrow_mut().clear();
            }
        });
    }

    html! {
        <div class="hero-stats" ref={stats_ref}>
            { for props.stats.iter().map(|stat| html! {
                <div class="stat">
                    <span class="stat-number" data-target={stat.target} data-suffix={stat.suffix}>{"0"}</span>
                    <span class="stat-label">{stat.label}</span>
                </div>
            }) }
        </div>
    }
}

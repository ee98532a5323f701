use std::{cell::RefCell, rc::Rc};

use tracing::debug;
use web_sys::Element;
use yew::prelude::*;

use super::{error::EffectError, observer::VisibilityObserver, use_effects_config};
use crate::scroll::{RevealLatch, VISIBLE_CLASS};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Fades its children in the first time they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let config = use_effects_config();
    let node_ref = use_node_ref();
    let visible = use_state(|| false);

    {
        let node_ref = node_ref.clone();
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let latch = Rc::new(RefCell::new(RevealLatch::default()));
            let root_margin = config.reveal_root_margin();
            let observer = node_ref
                .cast::<Element>()
                .ok_or_else(|| EffectError::missing(".animate-on-scroll"))
                .and_then(|element| {
                    VisibilityObserver::observe(
                        &element,
                        config.reveal_visibility_threshold,
                        Some(root_margin.as_str()),
                        move |observer, target| {
                            if latch.borrow_mut().observe(true) {
                                visible.set(true);
                                observer.unobserve(target);
                            }
                        },
                    )
                });

            if let Err(err) = &observer {
                debug!(effect = "reveal", error = %err, "effect skipped");
            }

            move || drop(observer)
        });
    }

    html! {
        <div
            class={classes!("animate-on-scroll", props.class.clone(), (*visible).then_some(VISIBLE_CLASS))}
            ref={node_ref}
        >
            {props.children.clone()}
        </div>
    }
}

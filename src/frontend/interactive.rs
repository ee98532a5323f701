use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use super::{
    dom::{client_point, element_rect},
    navigation::follow_anchor,
    use_effects_config,
};
use crate::pointer::{magnetic_offset, tilt, translate_css, MAGNETIC_RESET_TRANSFORM, TILT_RESET_TRANSFORM};

#[derive(Properties, PartialEq)]
pub struct TiltCardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[derive(Clone, PartialEq)]
struct ShinePosition {
    x: String,
    y: String,
}

#[function_component(TiltCard)]
pub fn tilt_card(props: &TiltCardProps) -> Html {
    let config = use_effects_config();
    let card_ref = use_node_ref();
    let transform = use_state(|| None::<String>);
    let shine = use_state(|| None::<ShinePosition>);

    let onmousemove = {
        let card_ref = card_ref.clone();
        let transform = transform.clone();
        let shine = shine.clone();
        let max_degrees = config.tilt_max_degrees;
        Callback::from(move |event: MouseEvent| {
            let Some(card) = card_ref.cast::<Element>() else {
                return;
            };
            let Some(tilt) = tilt(client_point(&event), element_rect(&card), max_degrees) else {
                return;
            };
            transform.set(Some(tilt.transform()));
            shine.set(Some(ShinePosition {
                x: tilt.shine_x_css(),
                y: tilt.shine_y_css(),
            }));
        })
    };

    // The shine keeps its last position after the pointer leaves.
    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(Some(TILT_RESET_TRANSFORM.to_string())))
    };

    let inner_style = (*transform)
        .as_ref()
        .map(|transform| format!("transform: {transform};"));
    let shine_style = (*shine)
        .as_ref()
        .map(|shine| format!("--shine-x: {}; --shine-y: {};", shine.x, shine.y));

    html! {
        <article
            class={classes!("tilt-card", props.class.clone())}
            ref={card_ref}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        >
            <div class="tilt-card-inner" style={inner_style}>
                <div class="card-shine" style={shine_style} aria-hidden="true"></div>
                {props.children.clone()}
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct MagneticButtonProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(MagneticButton)]
pub fn magnetic_button(props: &MagneticButtonProps) -> Html {
    let config = use_effects_config();
    let button_ref = use_node_ref();
    let transform = use_state(|| None::<String>);

    let onmousemove = {
        let button_ref = button_ref.clone();
        let transform = transform.clone();
        let strength = config.magnetic_strength;
        Callback::from(move |event: MouseEvent| {
            if let Some(button) = button_ref.cast::<Element>() {
                let offset = magnetic_offset(client_point(&event), element_rect(&button), strength);
                transform.set(Some(translate_css(offset)));
            }
        })
    };

    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(Some(MAGNETIC_RESET_TRANSFORM.to_string())))
    };

    let onclick = {
        let href = props.href.clone();
        Callback::from(move |event: MouseEvent| follow_anchor(&event, &href))
    };

    html! {
        <a
            class={props.class.clone()}
            href={props.href.clone()}
            data-magnetic=""
            ref={button_ref}
            style={(*transform).as_ref().map(|transform| format!("transform: {transform};"))}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
            onclick={onclick}
        >
            {props.children.clone()}
        </a>
    }
}

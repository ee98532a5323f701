use gloo::events::EventListener;
use tracing::debug;
use web_sys::{HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use super::{
    dom::{body, browser_window, document, query_all, scroll_y, set_style},
    error::{EffectError, EffectResult},
    use_effects_config,
};
use crate::scroll::{
    active_section, section_href, Anchor, MenuState, NavbarState, SectionBounds, ACTIVE_CLASS, ACTIVE_LINK_CLASS,
    SCROLLED_CLASS,
};

const SECTION_SELECTOR: &str = "section[id]";

fn scroll_to_section(id: &str) -> EffectResult<()> {
    let target = document()?
        .get_element_by_id(id)
        .ok_or_else(|| EffectError::missing(format!("#{id}")))?;

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

/// Replaces the browser's jump for same-page links with a smooth scroll.
pub fn follow_anchor(event: &MouseEvent, href: &str) {
    let anchor = Anchor::classify(href);
    if !anchor.intercepts() {
        return;
    }
    event.prevent_default();

    if let Anchor::Section(id) = anchor {
        if let Err(err) = scroll_to_section(id) {
            debug!(href, error = %err, "anchor target missing");
        }
    }
}

fn section_bounds() -> EffectResult<Vec<SectionBounds>> {
    let root = document()?
        .document_element()
        .ok_or_else(|| EffectError::missing("html"))?;

    Ok(query_all::<HtmlElement>(&root, SECTION_SELECTOR)?
        .into_iter()
        .map(|section| SectionBounds {
            id: section.id(),
            top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        })
        .collect())
}

fn apply_menu(menu: MenuState) {
    match body() {
        Ok(body) => set_style(&body, "overflow", menu.body_overflow()),
        Err(err) => debug!(effect = "mobile-menu", error = %err, "scroll lock skipped"),
    }
}

#[derive(Properties, PartialEq)]
pub struct SmoothLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(SmoothLink)]
pub fn smooth_link(props: &SmoothLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        let after = props.onclick.clone();
        Callback::from(move |event: MouseEvent| {
            follow_anchor(&event, &href);
            after.emit(());
        })
    };

    html! {
        <a class={props.class.clone()} href={props.href.clone()} onclick={onclick}>
            {props.children.clone()}
        </a>
    }
}

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub section: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub brand: AttrValue,
    pub links: Vec<NavLink>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let config = use_effects_config();
    let scrolled = use_state(|| false);
    let active_id = use_state(|| None::<String>);
    let menu = use_state(MenuState::default);

    {
        let scrolled = scrolled.clone();
        let active_id = active_id.clone();
        use_effect_with((), move |_| {
            let mut navbar_state = NavbarState::default();
            navbar_state.update(scroll_y(), config.navbar_scroll_threshold);
            scrolled.set(navbar_state.is_scrolled());

            let mut last_active: Option<String> = None;
            let listener = browser_window().map(|window| {
                EventListener::new(&window, "scroll", move |_| {
                    let offset = scroll_y();
                    if navbar_state.update(offset, config.navbar_scroll_threshold) {
                        scrolled.set(navbar_state.is_scrolled());
                    }

                    let sections = match section_bounds() {
                        Ok(sections) => sections,
                        Err(err) => {
                            debug!(effect = "active-link", error = %err, "highlight skipped");
                            return;
                        }
                    };
                    let Some(current) = active_section(offset, config.active_link_offset, &sections) else {
                        return;
                    };
                    if last_active.as_deref() != Some(current) {
                        last_active = Some(current.to_string());
                        active_id.set(last_active.clone());
                    }
                })
            });

            if let Err(err) = &listener {
                debug!(effect = "navbar", error = %err, "effect skipped");
            }

            move || drop(listener)
        });
    }

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*menu).toggled();
            apply_menu(next);
            menu.set(next);
        })
    };

    let on_link = {
        let menu = menu.clone();
        Callback::from(move |_: ()| {
            let closed = MenuState::closed();
            apply_menu(closed);
            menu.set(closed);
        })
    };

    let menu_open = menu.is_open().then_some(ACTIVE_CLASS);

    html! {
        <nav id="navbar" class={classes!("navbar", (*scrolled).then_some(SCROLLED_CLASS))}>
            <SmoothLink href="#home" class="nav-brand">{props.brand.clone()}</SmoothLink>
            <button
                id="navToggle"
                class={classes!("nav-toggle", menu_open)}
                type="button"
                aria-label="Меню"
                aria-expanded={menu.is_open().to_string()}
                onclick={on_toggle}
            >
                <span></span>
                <span></span>
                <span></span>
            </button>
            <ul id="navLinks" class={classes!("nav-links", menu_open)}>
                { for props.links.iter().map(|link| {
                    let is_active = active_id.as_deref() == Some(link.section);
                    html! {
                        <li>
                            <SmoothLink
                                href={section_href(link.section)}
                                class={classes!(is_active.then_some(ACTIVE_LINK_CLASS))}
                                onclick={on_link.clone()}
                            >
                                {link.label}
                            </SmoothLink>
                        </li>
                    }
                }) }
            </ul>
        </nav>
    }
}

mod canvas;
mod dom;
mod error;
mod hero;
mod interactive;
mod logging;
mod navigation;
mod observer;
mod reveal;

use std::rc::Rc;

use tracing::info;
use web_sys::window;
use yew::prelude::*;

use crate::config::EffectsConfig;
use hero::{Hero, Stat};
use interactive::{MagneticButton, TiltCard};
use navigation::{NavLink, Navbar};
use reveal::Reveal;

const BRAND: &str = "AREY";
const OWNER_NAME: &str = "Арей Смирнов";
const TAGLINE: &str = "Привет, я";
const CONTACT_EMAIL: &str = "mailto:hello@arey.dev";

#[hook]
fn use_effects_config() -> Rc<EffectsConfig> {
    use_context::<Rc<EffectsConfig>>().unwrap_or_default()
}

fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink {
            section: "home",
            label: "Главная",
        },
        NavLink {
            section: "about",
            label: "Обо мне",
        },
        NavLink {
            section: "projects",
            label: "Проекты",
        },
        NavLink {
            section: "contact",
            label: "Контакты",
        },
    ]
}

fn hero_stats() -> Vec<Stat> {
    vec![
        Stat {
            target: "12",
            suffix: Some("+"),
            label: "лет в AI",
        },
        Stat {
            target: "5000",
            suffix: Some("+"),
            label: "студентов",
        },
        Stat {
            target: "150",
            suffix: None,
            label: "мероприятий",
        },
    ]
}

struct Project {
    title: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
}

const PROJECTS: [Project; 3] = [
    Project {
        title: "AREY Academy",
        description: "Онлайн-школа прикладного искусственного интеллекта для предпринимателей.",
        tags: &["AI", "EdTech"],
    },
    Project {
        title: "AREY Events",
        description: "Конференции и митапы о технологиях и бизнесе.",
        tags: &["Events", "Community"],
    },
    Project {
        title: "AREY Labs",
        description: "Внедрение AI-ассистентов в процессы малого бизнеса.",
        tags: &["Consulting", "Automation"],
    },
];

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<EffectsConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let projects = PROJECTS.iter().map(|project| {
        html! {
            <Reveal class="project-item">
                <TiltCard>
                    <h3 class="project-title">{project.title}</h3>
                    <p class="project-description">{project.description}</p>
                    <ul class="project-tags">
                        { for project.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
                    </ul>
                </TiltCard>
            </Reveal>
        }
    });

    html! {
        <ContextProvider<Rc<EffectsConfig>> context={Rc::clone(&props.config)}>
            <Navbar brand={BRAND} links={nav_links()} />
            <main id="content">
                <Hero name={OWNER_NAME} tagline={TAGLINE} stats={hero_stats()} />

                <section id="about" class="section">
                    <Reveal>
                        <h2 class="section-title">{"Обо мне"}</h2>
                    </Reveal>
                    <Reveal class="about-text">
                        <p>{"Строю продукты на стыке искусственного интеллекта, образования и предпринимательства."}</p>
                    </Reveal>
                </section>

                <section id="projects" class="section">
                    <Reveal>
                        <h2 class="section-title">{"Проекты"}</h2>
                    </Reveal>
                    <div class="projects-grid">
                        { for projects }
                    </div>
                </section>

                <section id="contact" class="section">
                    <Reveal>
                        <h2 class="section-title">{"Контакты"}</h2>
                        <p>{"Открыт к партнёрствам, выступлениям и новым проектам."}</p>
                        <MagneticButton href={CONTACT_EMAIL} class="btn btn-primary">{"Написать"}</MagneticButton>
                    </Reveal>
                </section>
            </main>
            <footer class="footer">
                <p class="muted">{"© AREY"}</p>
            </footer>
        </ContextProvider<Rc<EffectsConfig>>>
    }
}

pub fn run() {
    let (config, source) = dom::load_config();
    logging::init(config.log_level);
    info!(source = source.as_str(), log_level = config.log_level.as_str(), "effects config loaded");

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
    info!("portfolio effects mounted");
}

use serde::Deserialize;
use serde_json::Value;

pub const CONFIG_ELEMENT_ID: &str = "effects-config";

const DEFAULT_PARTICLE_MAX_COUNT: usize = 80;
const DEFAULT_PARTICLE_AREA_PER_PARTICLE: f64 = 12_000.0;
const DEFAULT_PARTICLE_REPULSION_RADIUS: f64 = 150.0;
const DEFAULT_PARTICLE_REPULSION_STRENGTH: f64 = 0.01;
const DEFAULT_PARTICLE_LINK_DISTANCE: f64 = 120.0;
const DEFAULT_PARTICLE_LINK_MAX_OPACITY: f64 = 0.12;
const DEFAULT_TYPING_TYPE_DELAY_MS: u32 = 75;
const DEFAULT_TYPING_DELETE_DELAY_MS: u32 = 35;
const DEFAULT_TYPING_FULL_PAUSE_MS: u32 = 2_200;
const DEFAULT_TYPING_EMPTY_PAUSE_MS: u32 = 350;
const DEFAULT_COUNTER_DURATION_MS: f64 = 2_000.0;
const DEFAULT_COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;
const DEFAULT_REVEAL_VISIBILITY_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_BOTTOM_MARGIN: f64 = 30.0;
const DEFAULT_NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;
const DEFAULT_ACTIVE_LINK_OFFSET: f64 = 120.0;
const DEFAULT_TILT_MAX_DEGREES: f64 = 6.0;
const DEFAULT_MAGNETIC_STRENGTH: f64 = 0.2;
const DEFAULT_ORB_SPEED_STEP: f64 = 15.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const DEFAULT_ROLES: [&str; 6] = [
    "AI Эксперт",
    "Предприниматель",
    "Визионер",
    "Преподаватель",
    "Event-организатор",
    "Основатель AREY",
];

const PARTICLE_MAX_COUNT_BOUNDS: (usize, usize) = (0, 500);
const PARTICLE_AREA_PER_PARTICLE_BOUNDS: (f64, f64) = (1_000.0, 1_000_000.0);
const PARTICLE_RADIUS_BOUNDS: (f64, f64) = (1.0, 1_000.0);
const PARTICLE_REPULSION_STRENGTH_BOUNDS: (f64, f64) = (0.0, 1.0);
const PARTICLE_LINK_MAX_OPACITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const TYPING_DELAY_MS_BOUNDS: (u32, u32) = (1, 60_000);
const COUNTER_DURATION_MS_BOUNDS: (f64, f64) = (1.0, 60_000.0);
const VISIBILITY_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const PIXEL_OFFSET_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const TILT_MAX_DEGREES_BOUNDS: (f64, f64) = (0.0, 90.0);
const MAGNETIC_STRENGTH_BOUNDS: (f64, f64) = (0.0, 1.0);
const ORB_SPEED_STEP_BOUNDS: (f64, f64) = (0.0, 500.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSettings {
    pub max_count: usize,
    pub area_per_particle: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub link_distance: f64,
    pub link_max_opacity: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_PARTICLE_MAX_COUNT,
            area_per_particle: DEFAULT_PARTICLE_AREA_PER_PARTICLE,
            repulsion_radius: DEFAULT_PARTICLE_REPULSION_RADIUS,
            repulsion_strength: DEFAULT_PARTICLE_REPULSION_STRENGTH,
            link_distance: DEFAULT_PARTICLE_LINK_DISTANCE,
            link_max_opacity: DEFAULT_PARTICLE_LINK_MAX_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingSettings {
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub full_pause_ms: u32,
    pub empty_pause_ms: u32,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            type_delay_ms: DEFAULT_TYPING_TYPE_DELAY_MS,
            delete_delay_ms: DEFAULT_TYPING_DELETE_DELAY_MS,
            full_pause_ms: DEFAULT_TYPING_FULL_PAUSE_MS,
            empty_pause_ms: DEFAULT_TYPING_EMPTY_PAUSE_MS,
        }
    }
}

/// Tunables for every effect on the page.
///
/// Built from [`EffectsConfig::default`] or from the JSON document embedded in
/// the page. Each field is validated on its own, so one bad value never
/// discards the rest of the document.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub particles: ParticleSettings,
    pub typing: TypingSettings,
    pub roles: Vec<String>,
    pub counter_duration_ms: f64,
    pub counter_visibility_threshold: f64,
    pub reveal_visibility_threshold: f64,
    pub reveal_bottom_margin: f64,
    pub navbar_scroll_threshold: f64,
    pub active_link_offset: f64,
    pub tilt_max_degrees: f64,
    pub magnetic_strength: f64,
    pub orb_speed_step: f64,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            particles: ParticleSettings::default(),
            typing: TypingSettings::default(),
            roles: DEFAULT_ROLES.iter().map(ToString::to_string).collect(),
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            counter_visibility_threshold: DEFAULT_COUNTER_VISIBILITY_THRESHOLD,
            reveal_visibility_threshold: DEFAULT_REVEAL_VISIBILITY_THRESHOLD,
            reveal_bottom_margin: DEFAULT_REVEAL_BOTTOM_MARGIN,
            navbar_scroll_threshold: DEFAULT_NAVBAR_SCROLL_THRESHOLD,
            active_link_offset: DEFAULT_ACTIVE_LINK_OFFSET,
            tilt_max_degrees: DEFAULT_TILT_MAX_DEGREES,
            magnetic_strength: DEFAULT_MAGNETIC_STRENGTH,
            orb_speed_step: DEFAULT_ORB_SPEED_STEP,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Raw shape of the embedded document. Values stay untyped so a field with the
/// wrong type falls back to its default instead of failing the whole parse.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEffectsConfig {
    particle_max_count: Option<Value>,
    particle_area_per_particle: Option<Value>,
    particle_repulsion_radius: Option<Value>,
    particle_repulsion_strength: Option<Value>,
    particle_link_distance: Option<Value>,
    particle_link_max_opacity: Option<Value>,
    typing_type_delay_ms: Option<Value>,
    typing_delete_delay_ms: Option<Value>,
    typing_full_pause_ms: Option<Value>,
    typing_empty_pause_ms: Option<Value>,
    roles: Option<Value>,
    counter_duration_ms: Option<Value>,
    counter_visibility_threshold: Option<Value>,
    reveal_visibility_threshold: Option<Value>,
    reveal_bottom_margin: Option<Value>,
    navbar_scroll_threshold: Option<Value>,
    active_link_offset: Option<Value>,
    tilt_max_degrees: Option<Value>,
    magnetic_strength: Option<Value>,
    orb_speed_step: Option<Value>,
    log_level: Option<Value>,
}

impl EffectsConfig {
    /// Parses the embedded JSON document. A document that is not a JSON object
    /// yields the defaults.
    pub fn from_json(source: &str) -> Self {
        let raw = serde_json::from_str::<RawEffectsConfig>(source).unwrap_or_default();
        let defaults = Self::default();

        let particles = ParticleSettings {
            max_count: usize_with_bounds(
                raw.particle_max_count.as_ref(),
                defaults.particles.max_count,
                PARTICLE_MAX_COUNT_BOUNDS,
            ),
            area_per_particle: f64_with_bounds(
                raw.particle_area_per_particle.as_ref(),
                defaults.particles.area_per_particle,
                PARTICLE_AREA_PER_PARTICLE_BOUNDS,
            ),
            repulsion_radius: f64_with_bounds(
                raw.particle_repulsion_radius.as_ref(),
                defaults.particles.repulsion_radius,
                PARTICLE_RADIUS_BOUNDS,
            ),
            repulsion_strength: f64_with_bounds(
                raw.particle_repulsion_strength.as_ref(),
                defaults.particles.repulsion_strength,
                PARTICLE_REPULSION_STRENGTH_BOUNDS,
            ),
            link_distance: f64_with_bounds(
                raw.particle_link_distance.as_ref(),
                defaults.particles.link_distance,
                PARTICLE_RADIUS_BOUNDS,
            ),
            link_max_opacity: f64_with_bounds(
                raw.particle_link_max_opacity.as_ref(),
                defaults.particles.link_max_opacity,
                PARTICLE_LINK_MAX_OPACITY_BOUNDS,
            ),
        };

        let typing = TypingSettings {
            type_delay_ms: u32_with_bounds(
                raw.typing_type_delay_ms.as_ref(),
                defaults.typing.type_delay_ms,
                TYPING_DELAY_MS_BOUNDS,
            ),
            delete_delay_ms: u32_with_bounds(
                raw.typing_delete_delay_ms.as_ref(),
                defaults.typing.delete_delay_ms,
                TYPING_DELAY_MS_BOUNDS,
            ),
            full_pause_ms: u32_with_bounds(
                raw.typing_full_pause_ms.as_ref(),
                defaults.typing.full_pause_ms,
                TYPING_DELAY_MS_BOUNDS,
            ),
            empty_pause_ms: u32_with_bounds(
                raw.typing_empty_pause_ms.as_ref(),
                defaults.typing.empty_pause_ms,
                TYPING_DELAY_MS_BOUNDS,
            ),
        };

        Self {
            particles,
            typing,
            roles: parse_roles(raw.roles.as_ref()).unwrap_or(defaults.roles),
            counter_duration_ms: f64_with_bounds(
                raw.counter_duration_ms.as_ref(),
                defaults.counter_duration_ms,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            counter_visibility_threshold: f64_with_bounds(
                raw.counter_visibility_threshold.as_ref(),
                defaults.counter_visibility_threshold,
                VISIBILITY_THRESHOLD_BOUNDS,
            ),
            reveal_visibility_threshold: f64_with_bounds(
                raw.reveal_visibility_threshold.as_ref(),
                defaults.reveal_visibility_threshold,
                VISIBILITY_THRESHOLD_BOUNDS,
            ),
            reveal_bottom_margin: f64_with_bounds(
                raw.reveal_bottom_margin.as_ref(),
                defaults.reveal_bottom_margin,
                PIXEL_OFFSET_BOUNDS,
            ),
            navbar_scroll_threshold: f64_with_bounds(
                raw.navbar_scroll_threshold.as_ref(),
                defaults.navbar_scroll_threshold,
                PIXEL_OFFSET_BOUNDS,
            ),
            active_link_offset: f64_with_bounds(
                raw.active_link_offset.as_ref(),
                defaults.active_link_offset,
                PIXEL_OFFSET_BOUNDS,
            ),
            tilt_max_degrees: f64_with_bounds(
                raw.tilt_max_degrees.as_ref(),
                defaults.tilt_max_degrees,
                TILT_MAX_DEGREES_BOUNDS,
            ),
            magnetic_strength: f64_with_bounds(
                raw.magnetic_strength.as_ref(),
                defaults.magnetic_strength,
                MAGNETIC_STRENGTH_BOUNDS,
            ),
            orb_speed_step: f64_with_bounds(
                raw.orb_speed_step.as_ref(),
                defaults.orb_speed_step,
                ORB_SPEED_STEP_BOUNDS,
            ),
            log_level: raw
                .log_level
                .as_ref()
                .and_then(Value::as_str)
                .and_then(LogLevel::parse)
                .unwrap_or(defaults.log_level),
        }
    }

    /// Root margin string for the reveal observer, shrinking the bottom edge.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin)
    }
}

fn f64_with_bounds(value: Option<&Value>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn usize_with_bounds(value: Option<&Value>, default: usize, bounds: (usize, usize)) -> usize {
    value
        .and_then(Value::as_u64)
        .and_then(|value| usize::try_from(value).ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn u32_with_bounds(value: Option<&Value>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_roles(value: Option<&Value>) -> Option<Vec<String>> {
    let roles: Vec<String> = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(ToString::to_string)
        .collect();

    (!roles.is_empty()).then_some(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(EffectsConfig::from_json("{}"), EffectsConfig::default());
    }

    #[test]
    fn malformed_document_yields_defaults() {
        assert_eq!(EffectsConfig::from_json("not json"), EffectsConfig::default());
        assert_eq!(EffectsConfig::from_json("42"), EffectsConfig::default());
    }

    #[test]
    fn in_bounds_values_override_defaults() {
        let config = EffectsConfig::from_json(
            r#"{"particleMaxCount": 40, "typingFullPauseMs": 1000, "logLevel": "DEBUG"}"#,
        );

        assert_eq!(config.particles.max_count, 40);
        assert_eq!(config.typing.full_pause_ms, 1_000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.typing.type_delay_ms, DEFAULT_TYPING_TYPE_DELAY_MS);
    }

    #[test]
    fn out_of_bounds_or_mistyped_values_fall_back_individually() {
        let config = EffectsConfig::from_json(
            r#"{"particleMaxCount": 100000, "counterDurationMs": "fast", "magneticStrength": 0.5}"#,
        );

        assert_eq!(config.particles.max_count, DEFAULT_PARTICLE_MAX_COUNT);
        assert_eq!(config.counter_duration_ms, DEFAULT_COUNTER_DURATION_MS);
        assert_eq!(config.magnetic_strength, 0.5);
    }

    #[test]
    fn roles_drop_blank_entries_and_reject_empty_lists() {
        let config = EffectsConfig::from_json(r#"{"roles": ["Engineer", "  ", 7, "Writer"]}"#);
        assert_eq!(config.roles, vec!["Engineer".to_string(), "Writer".to_string()]);

        let config = EffectsConfig::from_json(r#"{"roles": ["", " "]}"#);
        assert_eq!(config.roles.len(), DEFAULT_ROLES.len());
    }

    #[test]
    fn reveal_root_margin_shrinks_bottom_edge() {
        assert_eq!(EffectsConfig::default().reveal_root_margin(), "0px 0px -30px 0px");
    }

    #[test]
    fn log_levels_are_ordered_by_verbosity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert_eq!(LogLevel::Warn.as_str(), "warn");
    }
}

use fastrand::Rng;

use crate::config::ParticleSettings;

const LINK_LINE_WIDTH: f64 = 0.5;
const LINK_HUE: Hue = Hue::Violet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    Violet,
    Cyan,
}

const HUE_TABLE: [(Hue, Rgb); 2] = [
    (Hue::Violet, Rgb(124, 92, 252)),
    (Hue::Cyan, Rgb(0, 212, 255)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Hue {
    pub fn rgb(self) -> Rgb {
        HUE_TABLE
            .iter()
            .find(|(hue, _)| *hue == self)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(Rgb(255, 255, 255))
    }

    pub fn rgba(self, alpha: f64) -> String {
        let Rgb(r, g, b) = self.rgb();
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    fn random(rng: &mut Rng) -> Self {
        if rng.bool() {
            Self::Violet
        } else {
            Self::Cyan
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Drawing operations the field needs from a 2D surface.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub size: f64,
    pub opacity: f64,
    pub hue: Hue,
}

impl Particle {
    pub fn spawn(width: f64, height: f64, rng: &mut Rng) -> Self {
        let mut particle = Self {
            x: 0.0,
            y: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            size: 0.0,
            opacity: 0.0,
            hue: Hue::Violet,
        };
        particle.reset(width, height, rng);
        particle
    }

    pub fn reset(&mut self, width: f64, height: f64, rng: &mut Rng) {
        self.x = rng.f64() * width;
        self.y = rng.f64() * height;
        self.size = rng.f64() * 2.0 + 0.5;
        self.speed_x = (rng.f64() - 0.5) * 0.4;
        self.speed_y = (rng.f64() - 0.5) * 0.4;
        self.opacity = rng.f64() * 0.5 + 0.1;
        self.hue = Hue::random(rng);
    }

    pub fn update(&mut self, pointer: Option<Point>, width: f64, height: f64, settings: &ParticleSettings) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        if let Some(pointer) = pointer {
            let dx = self.x - pointer.x;
            let dy = self.y - pointer.y;
            let distance = dx.hypot(dy);
            if distance < settings.repulsion_radius {
                let force = (settings.repulsion_radius - distance) / settings.repulsion_radius;
                self.x += dx * force * settings.repulsion_strength;
                self.y += dy * force * settings.repulsion_strength;
            }
        }

        // Pinned to the edge with velocity pointing back inside.
        if self.x < 0.0 {
            self.x = 0.0;
            self.speed_x = self.speed_x.abs();
        } else if self.x > width {
            self.x = width;
            self.speed_x = -self.speed_x.abs();
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.speed_y = self.speed_y.abs();
        } else if self.y > height {
            self.y = height;
            self.speed_y = -self.speed_y.abs();
        }
    }

    pub fn position(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.position(), self.size, &self.hue.rgba(self.opacity));
    }
}

/// Number of particles for a surface, fixed at creation.
pub fn particle_count(width: f64, height: f64, settings: &ParticleSettings) -> usize {
    let by_area = (width.max(0.0) * height.max(0.0) / settings.area_per_particle).floor();
    (by_area as usize).min(settings.max_count)
}

/// Stroke opacity for a link between two particles, `None` when they are too
/// far apart to be linked.
pub fn connection_opacity(distance: f64, settings: &ParticleSettings) -> Option<f64> {
    (distance < settings.link_distance).then(|| {
        ((settings.link_distance - distance) / settings.link_distance) * settings.link_max_opacity
    })
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    pointer: Option<Point>,
    settings: ParticleSettings,
}

impl ParticleField {
    pub fn new(width: f64, height: f64, settings: ParticleSettings, rng: &mut Rng) -> Self {
        let count = particle_count(width, height, &settings);
        let particles = (0..count)
            .map(|_| Particle::spawn(width, height, rng))
            .collect();

        Self {
            particles,
            width,
            height,
            pointer: None,
            settings,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Updates the drawable area. The particle count is left as created.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// One animation tick: clear, move and draw every particle, then link
    /// close pairs.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);

        for particle in &mut self.particles {
            particle.update(self.pointer, self.width, self.height, &self.settings);
            particle.draw(surface);
        }

        self.draw_connections(surface);
    }

    /// Draws the current state without moving anything.
    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        for particle in &self.particles {
            particle.draw(surface);
        }
        self.draw_connections(surface);
    }

    fn draw_connections(&self, surface: &mut impl Surface) {
        for (index, first) in self.particles.iter().enumerate() {
            for second in &self.particles[index + 1..] {
                let distance = (first.x - second.x).hypot(first.y - second.y);
                if let Some(opacity) = connection_opacity(distance, &self.settings) {
                    surface.stroke_line(
                        first.position(),
                        second.position(),
                        &LINK_HUE.rgba(opacity),
                        LINK_LINE_WIDTH,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(Point, f64, String)>,
        lines: Vec<(Point, Point, String)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
            self.circles.clear();
            self.lines.clear();
        }

        fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
            self.circles.push((center, radius, color.to_string()));
        }

        fn stroke_line(&mut self, from: Point, to: Point, color: &str, _width: f64) {
            self.lines.push((from, to, color.to_string()));
        }
    }

    fn particle_at(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
        Particle {
            x,
            y,
            speed_x,
            speed_y,
            size: 1.0,
            opacity: 0.5,
            hue: Hue::Cyan,
        }
    }

    #[test]
    fn count_scales_with_area_and_is_capped() {
        let settings = ParticleSettings::default();

        assert_eq!(particle_count(800.0, 600.0, &settings), 40);
        assert_eq!(particle_count(1920.0, 1080.0, &settings), 80);
        assert_eq!(particle_count(100.0, 100.0, &settings), 0);
        assert_eq!(particle_count(0.0, 600.0, &settings), 0);
    }

    #[test]
    fn field_uses_count_from_creation_even_after_resize() {
        let mut rng = Rng::with_seed(7);
        let mut field = ParticleField::new(800.0, 600.0, ParticleSettings::default(), &mut rng);
        assert_eq!(field.particles().len(), 40);

        field.resize(1920.0, 1080.0);
        assert_eq!(field.particles().len(), 40);
        assert_eq!(field.size(), (1920.0, 1080.0));
    }

    #[test]
    fn spawned_particles_respect_their_ranges() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..500 {
            let particle = Particle::spawn(300.0, 200.0, &mut rng);
            assert!((0.0..300.0).contains(&particle.x));
            assert!((0.0..200.0).contains(&particle.y));
            assert!((0.5..2.5).contains(&particle.size));
            assert!((0.1..0.6).contains(&particle.opacity));
            assert!(particle.speed_x.abs() <= 0.2);
            assert!(particle.speed_y.abs() <= 0.2);
        }
    }

    #[test]
    fn positions_stay_inside_the_surface() {
        let mut rng = Rng::with_seed(3);
        let mut field = ParticleField::new(400.0, 300.0, ParticleSettings::default(), &mut rng);
        let mut surface = RecordingSurface::default();
        field.set_pointer(Some(Point { x: 10.0, y: 10.0 }));

        for frame in 0..5_000 {
            if frame == 2_500 {
                field.set_pointer(Some(Point { x: 390.0, y: 290.0 }));
            }
            field.frame(&mut surface);
            for particle in field.particles() {
                assert!((0.0..=400.0).contains(&particle.x), "x escaped: {}", particle.x);
                assert!((0.0..=300.0).contains(&particle.y), "y escaped: {}", particle.y);
            }
        }
    }

    #[test]
    fn crossing_an_edge_reverses_velocity() {
        let settings = ParticleSettings::default();
        let mut particle = particle_at(0.1, 50.0, -0.2, 0.0);

        particle.update(None, 100.0, 100.0, &settings);

        assert_eq!(particle.x, 0.0);
        assert!(particle.speed_x > 0.0);

        let mut particle = particle_at(50.0, 99.9, 0.0, 0.2);
        particle.update(None, 100.0, 100.0, &settings);
        assert_eq!(particle.y, 100.0);
        assert!(particle.speed_y < 0.0);
    }

    #[test]
    fn pointer_pushes_nearby_particles_away() {
        let settings = ParticleSettings::default();
        let pointer = Some(Point { x: 50.0, y: 50.0 });

        let mut near = particle_at(60.0, 50.0, 0.0, 0.0);
        near.update(pointer, 200.0, 200.0, &settings);
        // distance 10 -> force 140/150, displacement 10 * force * 0.01
        let expected = 60.0 + 10.0 * (140.0 / 150.0) * 0.01;
        assert!((near.x - expected).abs() < 1e-9);
        assert_eq!(near.y, 50.0);

        let mut far = particle_at(60.0, 50.0, 0.0, 0.0);
        far.update(Some(Point { x: 60.0, y: 200.0 }), 200.0, 200.0, &settings);
        assert_eq!(far.position(), Point { x: 60.0, y: 50.0 });
    }

    #[test]
    fn cleared_pointer_disables_repulsion() {
        let mut rng = Rng::with_seed(5);
        let mut field = ParticleField::new(800.0, 600.0, ParticleSettings::default(), &mut rng);
        field.set_pointer(Some(Point { x: 1.0, y: 2.0 }));
        field.set_pointer(None);
        assert_eq!(field.pointer(), None);
    }

    #[test]
    fn connection_opacity_fades_with_distance() {
        let settings = ParticleSettings::default();

        assert_eq!(connection_opacity(120.0, &settings), None);
        assert_eq!(connection_opacity(500.0, &settings), None);
        assert_eq!(connection_opacity(0.0, &settings), Some(0.12));

        let mut previous = 0.0;
        for step in (0..120).rev() {
            let opacity = connection_opacity(f64::from(step), &settings).expect("within link distance");
            assert!(opacity > previous);
            previous = opacity;
        }
    }

    #[test]
    fn frame_draws_every_particle_and_links_close_pairs() {
        let settings = ParticleSettings::default();
        let mut field = ParticleField {
            particles: vec![
                particle_at(10.0, 10.0, 0.0, 0.0),
                particle_at(40.0, 10.0, 0.0, 0.0),
                particle_at(390.0, 290.0, 0.0, 0.0),
            ],
            width: 400.0,
            height: 300.0,
            pointer: None,
            settings,
        };
        let mut surface = RecordingSurface::default();

        field.frame(&mut surface);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 3);
        assert_eq!(surface.circles[0].2, "rgba(0, 212, 255, 0.5)");
        assert_eq!(surface.lines.len(), 1);
        assert_eq!(surface.lines[0].0, Point { x: 10.0, y: 10.0 });
        assert_eq!(surface.lines[0].1, Point { x: 40.0, y: 10.0 });
    }

    #[test]
    fn hues_map_to_fixed_colors() {
        assert_eq!(Hue::Violet.rgb(), Rgb(124, 92, 252));
        assert_eq!(Hue::Cyan.rgb(), Rgb(0, 212, 255));
        assert_eq!(Hue::Violet.rgba(0.25), "rgba(124, 92, 252, 0.25)");
    }
}

use crate::particles::Point;

/// Element box in client coordinates, as returned by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Pointer position relative to the top-left corner of the box.
    pub fn offset_of(&self, pointer: Point) -> Point {
        Point {
            x: pointer.x - self.left,
            y: pointer.y - self.top,
        }
    }
}

/// Translation of each orb for a pointer inside the hero: the pointer offset
/// from the center, normalised to `[-0.5, 0.5]`, times `(index + 1) * step`.
pub fn parallax_offsets(pointer: Point, container: Rect, orb_count: usize, step: f64) -> Option<Vec<Point>> {
    if !container.has_area() {
        return None;
    }

    let local = container.offset_of(pointer);
    let cx = local.x / container.width - 0.5;
    let cy = local.y / container.height - 0.5;

    Some(
        (0..orb_count)
            .map(|index| {
                let speed = (index + 1) as f64 * step;
                Point {
                    x: cx * speed,
                    y: cy * speed,
                }
            })
            .collect(),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub shine_x: f64,
    pub shine_y: f64,
}

impl Tilt {
    pub fn transform(&self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.rotate_x, self.rotate_y)
    }

    pub fn shine_x_css(&self) -> String {
        format!("{}%", self.shine_x)
    }

    pub fn shine_y_css(&self) -> String {
        format!("{}%", self.shine_y)
    }
}

pub const TILT_RESET_TRANSFORM: &str = "rotateX(0) rotateY(0)";

pub fn tilt(pointer: Point, card: Rect, max_degrees: f64) -> Option<Tilt> {
    if !card.has_area() {
        return None;
    }

    let local = card.offset_of(pointer);
    let center_x = card.width / 2.0;
    let center_y = card.height / 2.0;

    Some(Tilt {
        rotate_x: ((local.y - center_y) / center_y) * -max_degrees,
        rotate_y: ((local.x - center_x) / center_x) * max_degrees,
        shine_x: (local.x / card.width) * 100.0,
        shine_y: (local.y / card.height) * 100.0,
    })
}

pub const MAGNETIC_RESET_TRANSFORM: &str = "translate(0, 0)";

pub fn magnetic_offset(pointer: Point, button: Rect, strength: f64) -> Point {
    let local = button.offset_of(pointer);
    Point {
        x: (local.x - button.width / 2.0) * strength,
        y: (local.y - button.height / 2.0) * strength,
    }
}

pub fn translate_css(offset: Point) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn pointer_at_card_center_has_no_tilt() {
        let tilt = tilt(Point { x: 200.0, y: 100.0 }, CARD, 6.0).expect("card has area");

        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.shine_x, 50.0);
        assert_eq!(tilt.shine_y, 50.0);
    }

    #[test]
    fn pointer_at_corner_tilts_fully() {
        let tilt = tilt(Point { x: 300.0, y: 50.0 }, CARD, 6.0).expect("card has area");

        assert_eq!(tilt.rotate_x, 6.0);
        assert_eq!(tilt.rotate_y, 6.0);
        assert_eq!(tilt.shine_x, 100.0);
        assert_eq!(tilt.shine_y, 0.0);
        assert_eq!(tilt.transform(), "rotateX(6deg) rotateY(6deg)");
        assert_eq!(tilt.shine_x_css(), "100%");
    }

    #[test]
    fn zero_sized_boxes_are_ignored() {
        let empty = Rect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 20.0,
        };

        assert!(tilt(Point { x: 0.0, y: 0.0 }, empty, 6.0).is_none());
        assert!(parallax_offsets(Point { x: 0.0, y: 0.0 }, empty, 3, 15.0).is_none());
    }

    #[test]
    fn orbs_move_faster_with_their_index() {
        let hero = Rect {
            left: 0.0,
            top: 0.0,
            width: 1000.0,
            height: 500.0,
        };

        let offsets = parallax_offsets(Point { x: 1000.0, y: 0.0 }, hero, 3, 15.0).expect("hero has area");

        assert_eq!(
            offsets,
            vec![
                Point { x: 7.5, y: -7.5 },
                Point { x: 15.0, y: -15.0 },
                Point { x: 22.5, y: -22.5 },
            ]
        );
    }

    #[test]
    fn magnetic_follows_a_fifth_of_the_offset() {
        let button = Rect {
            left: 10.0,
            top: 10.0,
            width: 100.0,
            height: 40.0,
        };

        let offset = magnetic_offset(Point { x: 110.0, y: 10.0 }, button, 0.2);

        assert_eq!(offset, Point { x: 10.0, y: -4.0 });
        assert_eq!(translate_css(offset), "translate(10px, -4px)");
        assert_eq!(
            translate_css(magnetic_offset(Point { x: 60.0, y: 30.0 }, button, 0.2)),
            "translate(0px, 0px)"
        );
    }
}

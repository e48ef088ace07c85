// Single star of the warp field. Tracks its previous and current
// depth/offset so it can be drawn as a motion-streaked line segment.

use crate::color::Color;
use vecmath;
use vecmath::Vector2;

// Stars are always drawn plain white
const STAR_COLOR: Color = Color::from_u32(0xffff_ffff);

// Screen-space endpoints of one star's streak, ready for the line renderer
#[derive(Copy, Clone)]
pub struct LineSegment {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub color: Color,
}

pub struct Star {
    pub old_distance: f64,
    pub old_coord: Vector2<f64>,
    pub new_distance: f64,
    pub new_coord: Vector2<f64>,
}

impl Star {
    // Depth never collapses past this, so the scale divide can't blow up
    pub const MIN_DISTANCE: f64 = 0.0001;

    pub fn new(coord: Vector2<f64>, distance: f64) -> Star {
        Star {
            old_distance: 0.0,
            old_coord: [0.0, 0.0],
            new_distance: distance,
            new_coord: coord,
        }
    }

    // Pull the star `distance` world units closer to the viewer. The world
    // offset grows proportionally as the depth shrinks, which is what makes
    // stars appear to sweep outward faster the closer they get.
    pub fn advance(&mut self, distance: f64) {
        self.old_distance = self.new_distance;
        self.old_coord = self.new_coord;
        self.new_distance = (self.old_distance - distance).max(Star::MIN_DISTANCE);
        let scale_factor = self.old_distance / self.new_distance;
        self.new_coord = vecmath::vec2_scale(self.old_coord, scale_factor);
    }

    // Streak from where the star was last frame to where it is now, plus one
    // extra pixel along the direction of travel so slow stars stay visible.
    // A star that didn't move keeps both endpoints identical; normalizing a
    // zero-length diff would put NaN in the vertex buffer.
    pub fn trail_segment(&self, screen_width: u32, screen_height: u32) -> LineSegment {
        let from = world_to_screen(self.old_coord, screen_width, screen_height);
        let mut to = world_to_screen(self.new_coord, screen_width, screen_height);

        let diff = vecmath::vec2_sub(to, from);
        if vecmath::vec2_len(diff) > 0.0 {
            to = vecmath::vec2_add(to, vecmath::vec2_normalized(diff));
        }

        LineSegment {
            from,
            to,
            color: STAR_COLOR,
        }
    }
}

// World space is a unit disc centered on the viewer; scale by screen width on
// both axes (keeps the disc round regardless of aspect), then recenter
pub fn world_to_screen(coord: Vector2<f64>, screen_width: u32, screen_height: u32) -> Vector2<f64> {
    let scaled = vecmath::vec2_scale(coord, screen_width as f64);
    vecmath::vec2_add(
        scaled,
        [screen_width as f64 / 2.0, screen_height as f64 / 2.0],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn advance_rolls_current_into_previous() {
        let mut star = Star::new([0.25, -0.1], 150.0);
        star.advance(40.0);

        assert_eq!(star.old_distance, 150.0);
        assert_eq!(star.old_coord, [0.25, -0.1]);
        assert_eq!(star.new_distance, 110.0);
    }

    #[test]
    fn advance_scales_coord_outward() {
        let mut star = Star::new([0.3, 0.4], 100.0);
        star.advance(50.0);

        // depth halved, offset doubled
        assert!((star.new_coord[0] - 0.6).abs() < 1e-12);
        assert!((star.new_coord[1] - 0.8).abs() < 1e-12);
        assert!(vecmath::vec2_len(star.new_coord) > vecmath::vec2_len(star.old_coord));
    }

    #[test]
    fn advance_clamps_depth_at_floor() {
        let mut star = Star::new([0.1, 0.1], 1.0);
        star.advance(500.0);
        assert_eq!(star.new_distance, Star::MIN_DISTANCE);

        // once floored, further advances hold it there
        star.advance(500.0);
        assert_eq!(star.new_distance, Star::MIN_DISTANCE);
        assert_eq!(star.new_distance, star.old_distance);
    }

    proptest! {
        #[test]
        fn advance_never_zeroes_distance(
            start in 0.001f64..1000.0,
            delta in 0.000001f64..2000.0,
        ) {
            let mut star = Star::new([0.2, -0.3], start);
            star.advance(delta);
            prop_assert!(star.new_distance > 0.0);
        }

        #[test]
        fn advance_is_monotonic(
            start in 0.001f64..1000.0,
            deltas in proptest::collection::vec(0.000001f64..50.0, 1..64),
        ) {
            let mut star = Star::new([0.2, -0.3], start);
            for delta in deltas {
                star.advance(delta);
                prop_assert!(star.new_distance <= star.old_distance);
                prop_assert!(star.new_coord[0].is_finite() && star.new_coord[1].is_finite());
            }
        }
    }

    #[test]
    fn world_to_screen_centers_origin() {
        let screen = world_to_screen([0.0, 0.0], 800, 600);
        assert_eq!(screen, [400.0, 300.0]);
    }

    #[test]
    fn world_to_screen_scales_both_axes_by_width() {
        let screen = world_to_screen([0.5, 0.5], 800, 600);
        assert_eq!(screen, [800.0, 700.0]);
    }

    #[test]
    fn world_to_screen_is_pure() {
        let a = world_to_screen([-0.37, 0.12], 1024, 768);
        let b = world_to_screen([-0.37, 0.12], 1024, 768);
        assert_eq!(a, b);
    }

    #[test]
    fn trail_segment_extends_head_by_one_unit() {
        let mut star = Star::new([0.1, 0.2], 100.0);
        star.advance(20.0);

        let segment = star.trail_segment(800, 600);
        let head = world_to_screen(star.new_coord, 800, 600);
        let extension = vecmath::vec2_sub(segment.to, head);
        assert!((vecmath::vec2_len(extension) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn trail_segment_with_no_motion_stays_finite() {
        // freshly spawned star that hasn't advanced: old == [0, 0], but a
        // star pinned at the world origin also never moves once advanced
        let mut star = Star::new([0.0, 0.0], 100.0);
        star.advance(10.0);
        assert_eq!(star.old_coord, star.new_coord);

        let segment = star.trail_segment(800, 600);
        assert_eq!(segment.from, segment.to);
        assert!(segment.to[0].is_finite() && segment.to[1].is_finite());
    }
}

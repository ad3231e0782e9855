use glam::Vec2;

use crate::model::Rect;

/// True iff an agent touches a wall line and is moving towards it.
///
/// `horizontal` selects a horizontal wall (a line of constant y) versus a
/// vertical wall (constant x). Touching counts at exactly radius distance,
/// but an agent moving away from the wall never collides; without that
/// tie-break an agent clamped onto a wall would re-collide every frame and
/// stick to the boundary.
pub fn touching_wall(pos: Vec2, vel: Vec2, radius: f32, wall: f32, horizontal: bool) -> bool {
    let (coord, v) = if horizontal {
        (pos.y, vel.y)
    } else {
        (pos.x, vel.x)
    };
    (coord - wall).abs() <= radius && v * (coord - wall) < 0.0
}

/// True iff two circles overlap or touch (center distance <= radius sum).
pub fn touching(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    (p1 - p2).length() <= r1 + r2
}

/// True iff the two bodies are moving towards each other.
pub fn approaching(v1: Vec2, p1: Vec2, v2: Vec2, p2: Vec2) -> bool {
    (v1 - v2).dot(p1 - p2) < 0.0
}

/// Touching and approaching; touching-but-receding pairs pass through.
pub fn pair_collided(p1: Vec2, r1: f32, v1: Vec2, p2: Vec2, r2: f32, v2: Vec2) -> bool {
    touching(p1, r1, p2, r2) && approaching(v1, p1, v2, p2)
}

/// Velocities after an elastic two-body collision.
///
/// Both outputs are computed from the pre-collision velocities so the result
/// does not depend on which body is updated first. Momentum and kinetic
/// energy are conserved.
pub fn elastic_response(
    m1: f32,
    p1: Vec2,
    v1: Vec2,
    m2: f32,
    p2: Vec2,
    v2: Vec2,
) -> (Vec2, Vec2) {
    (
        collided_velocity(m1, p1, v1, m2, p2, v2),
        collided_velocity(m2, p2, v2, m1, p1, v1),
    )
}

fn collided_velocity(m1: f32, p1: Vec2, v1: Vec2, m2: f32, p2: Vec2, v2: Vec2) -> Vec2 {
    let dv = v1 - v2;
    let dp = p1 - p2;
    let scale = dv.dot(dp) * 2.0 * m2 / (m1 + m2) / dp.length_squared();
    v1 - scale * dp
}

/// Reflect the velocity off any container wall the agent is colliding with.
///
/// Horizontal walls negate the y component, vertical walls the x component;
/// a corner hit negates both in the same call.
pub fn reflect_at_walls(pos: Vec2, vel: Vec2, radius: f32, bounds: &Rect) -> Vec2 {
    let mut vel = vel;
    if touching_wall(pos, vel, radius, bounds.min.x, false)
        || touching_wall(pos, vel, radius, bounds.max.x, false)
    {
        vel.x = -vel.x;
    }
    if touching_wall(pos, vel, radius, bounds.min.y, true)
        || touching_wall(pos, vel, radius, bounds.max.y, true)
    {
        vel.y = -vel.y;
    }
    vel
}

/// Reflect an agent off the *outside* faces of a no-entry box.
///
/// Only agents whose center lies outside the box are affected, and only while
/// laterally within the span of the wall they are about to hit; an agent
/// flying past a corner does not bounce.
pub fn reflect_outside_box(pos: Vec2, vel: Vec2, radius: f32, bounds: &Rect) -> Vec2 {
    let mut vel = vel;
    let in_x_span = pos.x >= bounds.min.x && pos.x <= bounds.max.x;
    let in_y_span = pos.y >= bounds.min.y && pos.y <= bounds.max.y;
    if in_y_span
        && ((pos.x <= bounds.min.x && touching_wall(pos, vel, radius, bounds.min.x, false))
            || (pos.x >= bounds.max.x && touching_wall(pos, vel, radius, bounds.max.x, false)))
    {
        vel.x = -vel.x;
    }
    if in_x_span
        && ((pos.y <= bounds.min.y && touching_wall(pos, vel, radius, bounds.min.y, true))
            || (pos.y >= bounds.max.y && touching_wall(pos, vel, radius, bounds.max.y, true)))
    {
        vel.y = -vel.y;
    }
    vel
}

/// Clamp a circle fully inside the bounds, independently per axis.
///
/// Applied after position integration, never before collision resolution.
pub fn clamp_to_rect(pos: Vec2, radius: f32, bounds: &Rect) -> Vec2 {
    Vec2::new(
        pos.x.min(bounds.max.x - radius).max(bounds.min.x + radius),
        pos.y.min(bounds.max.y - radius).max(bounds.min.y + radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn elastic_response_matches_reference_pair() {
        let (v1, v2) = elastic_response(
            5.0,
            Vec2::new(40.0, 50.0),
            Vec2::new(5.0, 7.0),
            5.0,
            Vec2::new(50.0, 55.0),
            Vec2::new(0.0, -5.0),
        );
        assert_relative_eq!(v1.x, -3.8, epsilon = 1e-4);
        assert_relative_eq!(v1.y, 2.6, epsilon = 1e-4);
        assert_relative_eq!(v2.x, 8.8, epsilon = 1e-4);
        assert_relative_eq!(v2.y, -0.6, epsilon = 1e-4);
    }

    #[test]
    fn elastic_response_conserves_energy_and_momentum() {
        let (m1, m2) = (3.0, 7.0);
        let (p1, p2) = (Vec2::new(10.0, 10.0), Vec2::new(14.0, 13.0));
        let (v1, v2) = (Vec2::new(2.0, -1.0), Vec2::new(-1.5, 0.5));
        let (w1, w2) = elastic_response(m1, p1, v1, m2, p2, v2);
        let energy_before = m1 * v1.length_squared() + m2 * v2.length_squared();
        let energy_after = m1 * w1.length_squared() + m2 * w2.length_squared();
        assert_relative_eq!(energy_before, energy_after, epsilon = 1e-3);
        let momentum_before = m1 * v1 + m2 * v2;
        let momentum_after = m1 * w1 + m2 * w2;
        assert_relative_eq!(momentum_before.x, momentum_after.x, epsilon = 1e-3);
        assert_relative_eq!(momentum_before.y, momentum_after.y, epsilon = 1e-3);
    }

    #[test]
    fn wall_touch_requires_approach() {
        // exactly radius away but receding: no collision
        assert!(!touching_wall(
            Vec2::new(2.0, 10.0),
            Vec2::new(1.0, 0.0),
            2.0,
            0.0,
            false
        ));
        // same geometry, approaching
        assert!(touching_wall(
            Vec2::new(2.0, 10.0),
            Vec2::new(-1.0, 0.0),
            2.0,
            0.0,
            false
        ));
        // out of reach
        assert!(!touching_wall(
            Vec2::new(5.0, 10.0),
            Vec2::new(-1.0, 0.0),
            2.0,
            0.0,
            false
        ));
    }

    #[test]
    fn touch_counts_at_exact_distance() {
        assert!(touching(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
        assert!(!touching(Vec2::ZERO, 1.0, Vec2::new(2.001, 0.0), 1.0));
    }

    #[test]
    fn receding_pair_does_not_collide() {
        let (p1, p2) = (Vec2::new(0.0, 0.0), Vec2::new(1.5, 0.0));
        let (v1, v2) = (Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(touching(p1, 1.0, p2, 1.0));
        assert!(!pair_collided(p1, 1.0, v1, p2, 1.0, v2));
    }

    #[test]
    fn corner_hit_reflects_both_components() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let vel = reflect_at_walls(Vec2::new(1.5, 1.5), Vec2::new(-1.0, -1.0), 2.0, &bounds);
        assert_eq!(vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn outside_box_reflects_within_wall_span_only() {
        let bounds = Rect::new(10.0, 10.0, 20.0, 20.0);
        // left of the box, moving right, within the y span
        let vel = reflect_outside_box(Vec2::new(9.0, 15.0), Vec2::new(1.0, 0.0), 1.5, &bounds);
        assert_eq!(vel, Vec2::new(-1.0, 0.0));
        // past the corner: no bounce
        let vel = reflect_outside_box(Vec2::new(9.0, 25.0), Vec2::new(1.0, 0.0), 1.5, &bounds);
        assert_eq!(vel, Vec2::new(1.0, 0.0));
        // below the box, moving up
        let vel = reflect_outside_box(Vec2::new(15.0, 21.0), Vec2::new(0.0, -1.0), 1.5, &bounds);
        assert_eq!(vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn clamp_pulls_circle_back_inside() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let pos = clamp_to_rect(Vec2::new(99.0, -3.0), 2.0, &bounds);
        assert_eq!(pos, Vec2::new(98.0, 2.0));
        // already inside: untouched
        let pos = clamp_to_rect(Vec2::new(50.0, 50.0), 2.0, &bounds);
        assert_eq!(pos, Vec2::new(50.0, 50.0));
    }
}

//! Distance-based collision queries
//!
//! Everything here is circles against points: worm heads against pellets,
//! worm heads against sampled body segments, mobs against worm heads.

use glam::Vec2;

use super::state::{Food, Worm};
use crate::consts::*;

/// Body segments are tested at this stride; sampling every other segment
/// halves the work without opening gaps a head can slip through.
pub const SEGMENT_STRIDE: usize = 2;

/// True if a worm head overlaps a pellet
#[inline]
pub fn head_eats_food(head: Vec2, radius: f32, food: &Food) -> bool {
    head.distance(food.pos) < radius + food.radius
}

/// Find the worm whose body the head of `worms[i]` has run into.
///
/// Other worms are coarse-culled by head-to-head distance against
/// `target_length × 10` before their segments are sampled. The combined
/// radii get a small slack subtracted so grazing passes stay survivable.
/// First hit wins; self-collision is never tested.
pub fn find_fatal_collision(worms: &[Worm], i: usize) -> Option<usize> {
    let head = worms[i].pos;
    let radius = worms[i].radius;

    for (j, other) in worms.iter().enumerate() {
        if j == i || !other.alive {
            continue;
        }
        if head.distance(other.pos) > other.target_length * 10.0 {
            continue;
        }

        let threshold = radius + other.radius - COLLISION_SLACK;
        if other
            .segments
            .iter()
            .step_by(SEGMENT_STRIDE)
            .any(|seg| head.distance(*seg) < threshold)
        {
            return Some(j);
        }
    }

    None
}

/// True if a mob is close enough to a worm's head to be eaten
#[inline]
pub fn mob_touches_worm(mob_pos: Vec2, worm: &Worm) -> bool {
    mob_pos.distance(worm.pos) < worm.radius + MOB_TOUCH_PAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Controller;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn worm_at(pos: Vec2, rng: &mut Pcg32) -> Worm {
        Worm::new(Controller::Player, "W".to_string(), 0.0, pos, rng)
    }

    #[test]
    fn test_body_collision_detected() {
        let mut rng = Pcg32::seed_from_u64(1);

        // A's head at the origin, B with a body segment at (5, 0): the
        // gap (5) is inside the combined radii minus slack (10+10-2=18).
        let a = worm_at(Vec2::ZERO, &mut rng);
        let mut b = worm_at(Vec2::new(5.0, 0.0), &mut rng);
        b.segments.clear();
        b.segments.push_back(Vec2::new(5.0, 0.0));

        let worms = vec![a, b];
        assert_eq!(find_fatal_collision(&worms, 0), Some(1));
    }

    #[test]
    fn test_no_self_collision() {
        let mut rng = Pcg32::seed_from_u64(1);
        // A fresh worm's segments all sit on its own head
        let a = worm_at(Vec2::ZERO, &mut rng);
        let worms = vec![a];
        assert_eq!(find_fatal_collision(&worms, 0), None);
    }

    #[test]
    fn test_dead_worms_are_ignored() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = worm_at(Vec2::ZERO, &mut rng);
        let mut b = worm_at(Vec2::new(5.0, 0.0), &mut rng);
        b.alive = false;

        let worms = vec![a, b];
        assert_eq!(find_fatal_collision(&worms, 0), None);
    }

    #[test]
    fn test_coarse_cull_skips_distant_worms() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = worm_at(Vec2::ZERO, &mut rng);
        // B's head is beyond its cull distance (20 × 10 = 200), so its
        // segments are never examined even if one were close.
        let mut b = worm_at(Vec2::new(250.0, 0.0), &mut rng);
        b.segments.push_front(Vec2::new(3.0, 0.0));

        let worms = vec![a, b];
        assert_eq!(find_fatal_collision(&worms, 0), None);
    }

    #[test]
    fn test_stride_skips_odd_segments() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = worm_at(Vec2::ZERO, &mut rng);
        let mut b = worm_at(Vec2::new(100.0, 0.0), &mut rng);
        // Only the segment at an odd index is near A's head
        b.segments.clear();
        b.segments.push_back(Vec2::new(100.0, 0.0));
        b.segments.push_back(Vec2::new(5.0, 0.0));

        let worms = vec![a, b];
        assert_eq!(find_fatal_collision(&worms, 0), None);
    }

    #[test]
    fn test_head_eats_food_at_combined_radii() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut food = Food::new(&mut rng, Vec2::new(12.0, 0.0), 1);
        food.radius = 3.0;

        assert!(head_eats_food(Vec2::ZERO, 10.0, &food));
        food.pos.x = 13.5;
        assert!(!head_eats_food(Vec2::ZERO, 10.0, &food));
    }

    #[test]
    fn test_mob_touch_uses_padded_radius() {
        let mut rng = Pcg32::seed_from_u64(1);
        let worm = worm_at(Vec2::ZERO, &mut rng);

        // Worm radius 10 + pad 10 = 20
        assert!(mob_touches_worm(Vec2::new(19.0, 0.0), &worm));
        assert!(!mob_touches_worm(Vec2::new(21.0, 0.0), &worm));
    }
}

// Pure per-tick walking integration and hall geometry.

use rand::Rng;

use crate::domain::entities::Artwork;
use crate::domain::state::GuestSim;

#[derive(Debug, Clone, Copy)]
pub struct WanderConfig {
    pub walk_speed: f32, // px/s
    pub arrive_threshold: f32,
    pub min_x: f32,
    pub max_x: f32,
}

/// Result of advancing a walking guest by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Moving,
    Arrived,
}

/// Moves the guest toward its target at constant speed; facing follows the
/// sign of the remaining distance. Arrival is reported, not acted on, so the
/// caller decides between viewing and re-targeting.
pub fn tick_walk(sim: &mut GuestSim, dt: f32, cfg: WanderConfig) -> WalkOutcome {
    let dx = sim.target_x - sim.x;
    if dx.abs() < cfg.arrive_threshold {
        return WalkOutcome::Arrived;
    }

    sim.facing_right = dx > 0.0;
    let step = cfg.walk_speed * dt;
    if dx.abs() <= step {
        sim.x = sim.target_x;
    } else if dx > 0.0 {
        sim.x += step;
    } else {
        sim.x -= step;
    }
    sim.x = sim.x.clamp(cfg.min_x, cfg.max_x);
    WalkOutcome::Moving
}

/// Hall length grows with the collection so frames never crowd.
pub fn hall_width(artwork_count: usize) -> f32 {
    (artwork_count as f32 * 600.0 + 1000.0).max(2000.0)
}

/// On-screen anchor for the artwork at a given collection index.
pub fn artwork_anchor(index: usize) -> f32 {
    500.0 + index as f32 * 600.0
}

/// The artwork whose anchor is closest to `x`, if any lies within the
/// proximity window.
pub fn artwork_near<'a>(artworks: &'a [Artwork], x: f32, proximity: f32) -> Option<&'a Artwork> {
    artworks
        .iter()
        .map(|art| (art, (art.anchor_x - x).abs()))
        .filter(|(_, dist)| *dist < proximity)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(art, _)| art)
}

/// A fresh wander target inside the walkable hall bounds.
pub fn random_target<R: Rng>(rng: &mut R, min_x: f32, max_x: f32) -> f32 {
    if min_x >= max_x {
        return min_x;
    }
    rng.gen_range(min_x..max_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::domain::entities::MusicSource;

    fn sim_at(x: f32, target_x: f32) -> GuestSim {
        GuestSim::new("g1".to_string(), 0, x, target_x)
    }

    fn cfg() -> WanderConfig {
        WanderConfig {
            walk_speed: 120.0,
            arrive_threshold: 10.0,
            min_x: 100.0,
            max_x: 1900.0,
        }
    }

    fn artwork_at(id: &str, anchor_x: f32) -> Artwork {
        Artwork {
            id: id.to_string(),
            index_number: 1,
            title: "Untitled".to_string(),
            artist: "Unknown".to_string(),
            description: String::new(),
            image_url: String::new(),
            cast: Vec::new(),
            owner: "The Museum".to_string(),
            price: 1_000_000,
            est_auction_price: 1_200_000,
            critiques: Vec::new(),
            music: MusicSource::None,
            registered_at_ms: 0,
            last_cleaned_at_ms: 0,
            daily_click_count: 0,
            last_click_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            total_view_time_ms: 0,
            anchor_x,
        }
    }

    #[test]
    fn when_target_is_to_the_right_then_guest_moves_right_and_faces_right() {
        let mut sim = sim_at(200.0, 500.0);
        let outcome = tick_walk(&mut sim, 1.0 / 60.0, cfg());

        assert_eq!(outcome, WalkOutcome::Moving);
        assert!(sim.x > 200.0);
        assert!(sim.facing_right);
    }

    #[test]
    fn when_target_is_to_the_left_then_guest_moves_left_and_faces_left() {
        let mut sim = sim_at(500.0, 200.0);
        let outcome = tick_walk(&mut sim, 1.0 / 60.0, cfg());

        assert_eq!(outcome, WalkOutcome::Moving);
        assert!(sim.x < 500.0);
        assert!(!sim.facing_right);
    }

    #[test]
    fn when_guest_is_within_arrive_threshold_then_walk_reports_arrived() {
        let mut sim = sim_at(495.0, 500.0);
        let outcome = tick_walk(&mut sim, 1.0 / 60.0, cfg());

        assert_eq!(outcome, WalkOutcome::Arrived);
        assert!((sim.x - 495.0).abs() < f32::EPSILON);
    }

    #[test]
    fn when_step_overshoots_target_then_guest_lands_exactly_on_target() {
        let mut sim = sim_at(480.0, 500.0);
        // One full second covers 120 px, far more than the 20 px remaining.
        let outcome = tick_walk(&mut sim, 1.0, cfg());

        assert_eq!(outcome, WalkOutcome::Moving);
        assert!((sim.x - 500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn when_no_artwork_is_close_enough_then_artwork_near_returns_none() {
        let artworks = vec![artwork_at("a1", 500.0), artwork_at("a2", 1100.0)];
        assert!(artwork_near(&artworks, 800.0, 200.0).is_none());
    }

    #[test]
    fn when_two_artworks_are_in_range_then_the_closest_wins() {
        let artworks = vec![artwork_at("a1", 500.0), artwork_at("a2", 700.0)];
        let near = artwork_near(&artworks, 650.0, 200.0).expect("expected a nearby artwork");
        assert_eq!(near.id, "a2");
    }

    #[test]
    fn when_hall_is_small_then_width_has_a_floor() {
        assert_eq!(hall_width(0), 2000.0);
        assert_eq!(hall_width(1), 2000.0);
        assert_eq!(hall_width(4), 3400.0);
    }

    #[test]
    fn when_sampling_targets_then_they_stay_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let x = random_target(&mut rng, 100.0, 1900.0);
            assert!((100.0..1900.0).contains(&x));
        }
    }
}

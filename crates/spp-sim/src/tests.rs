//! Integration tests for spp-sim.

use std::f64::consts::FRAC_PI_4;

use spp_agent::{Agent, AgentStore};
use spp_core::{AgentId, Constants, CoreError, Correction, FlockConfig, SimRng, Step, Vec2};
use spp_spatial::SpatialError;

use crate::{Flock, FlockBuilder, FlockObserver, Frame, NoopObserver, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(agent_count: i64, grid_width: i64, noise: f64) -> FlockConfig {
    FlockConfig {
        grid_width,
        agent_count,
        noise_amplitude:   noise,
        seed:              42,
        total_steps:       20,
        measure_interval:  5,
        snapshot_interval: 10,
        constants:         Constants::default(),
    }
}

fn flock(agent_count: i64, grid_width: i64, noise: f64) -> Flock {
    FlockBuilder::new(test_config(agent_count, grid_width, noise))
        .build()
        .unwrap()
}

fn moving_east(x: f64, y: f64) -> Agent {
    Agent::new(Vec2::new(x, y), Vec2::new(0.03, 0.0))
}

const TOL: f64 = 1e-9;

// ── FlockBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let f = FlockBuilder::new(FlockConfig::default()).build().unwrap();
        assert_eq!(f.agent_count(), 100);
        assert_eq!(f.grid_width(), 10);
        assert_eq!(f.domain_size(), 10.0);
        assert_eq!(f.noise_amplitude(), 1.0);
        assert_eq!(f.current_step(), Step::ZERO);
        assert!(f.corrections().is_empty());
    }

    #[test]
    fn out_of_range_values_are_corrected() {
        let f = flock(0, 4, -2.0);
        assert_eq!(f.agent_count(), 100);
        assert_eq!(f.grid_width(), 10);
        assert_eq!(f.noise_amplitude(), 1.0);
        assert_eq!(f.corrections().len(), 3);
        assert!(matches!(f.corrections()[1], Correction::AgentCount { requested: 0, applied: 100 }));
    }

    #[test]
    fn strict_mode_rejects_corrections() {
        let result = FlockBuilder::new(test_config(-5, 20, 0.5)).strict(true).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn site_smaller_than_radius_rejected() {
        let mut config = test_config(10, 10, 0.5);
        config.constants.site_size = 0.5;
        let result = FlockBuilder::new(config).build();
        assert!(matches!(
            result,
            Err(SimError::Spatial(SpatialError::SiteSmallerThanRadius { .. }))
        ));
    }

    #[test]
    fn drift_of_a_whole_cell_per_step_rejected() {
        let mut config = test_config(1, 10, 0.0);
        config.constants.drift_speed = 25.0;
        let store = AgentStore::from_agents(vec![Agent::new(Vec2::new(1.0, 1.0), Vec2::new(-25.0, 0.0))]);
        for strict in [false, true] {
            let result = FlockBuilder::new(config.clone()).agents(store.clone()).strict(strict).build();
            assert!(
                matches!(result, Err(SimError::Config(CoreError::InvalidConstant { .. }))),
                "strict = {strict}"
            );
        }
    }

    #[test]
    fn fastest_valid_drift_keeps_positions_inside_domain() {
        let mut config = test_config(1, 10, 0.0);
        config.constants.drift_speed = 0.99;
        let store = AgentStore::from_agents(vec![Agent::new(Vec2::new(0.5, 9.5), Vec2::new(-0.99, 0.99))]);
        let mut f = FlockBuilder::new(config).agents(store).build().unwrap();
        for _ in 0..50 {
            f.step();
            let p = f.position(AgentId(0)).unwrap();
            assert!((0.0..10.0).contains(&p.x) && (0.0..10.0).contains(&p.y), "{p:?}");
        }
    }

    #[test]
    fn agent_count_mismatch_errors() {
        let store = AgentStore::from_agents(vec![moving_east(1.0, 1.0)]);
        let result = FlockBuilder::new(test_config(2, 10, 0.0)).agents(store).build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { expected: 2, got: 1 })));
    }

    #[test]
    fn agent_outside_domain_errors() {
        let store = AgentStore::from_agents(vec![moving_east(1.0, 1.0), moving_east(10.0, 3.0)]);
        let result = FlockBuilder::new(test_config(2, 10, 0.0)).agents(store).build();
        match result {
            Err(SimError::AgentOutsideDomain { id, .. }) => assert_eq!(id, AgentId(1)),
            other => panic!("expected AgentOutsideDomain, got {:?}", other.err()),
        }
    }

    #[test]
    fn drawn_agents_inside_domain_at_drift_speed() {
        let f = flock(500, 15, 0.5);
        for a in f.agents() {
            assert!((0.0..15.0).contains(&a.position.x));
            assert!((0.0..15.0).contains(&a.position.y));
            assert!((a.velocity.length() - 0.03).abs() < TOL);
        }
    }

    #[test]
    fn seed_alone_determines_the_run() {
        // The builder reseeds whatever source it is given.
        let a = FlockBuilder::new(test_config(50, 10, 1.0)).with_rng(SimRng::new(1)).build().unwrap();
        let b = FlockBuilder::new(test_config(50, 10, 1.0)).with_rng(SimRng::new(2)).build().unwrap();
        assert_eq!(a.agents(), b.agents());
    }
}

// ── Step properties ───────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn speed_stays_at_drift_speed() {
        let mut f = flock(400, 20, 2.0);
        for _ in 0..50 {
            f.step();
            for a in f.agents() {
                assert!((a.velocity.length() - 0.03).abs() < TOL);
            }
        }
    }

    #[test]
    fn positions_stay_inside_domain() {
        let mut f = flock(400, 10, 2.0);
        let l = f.domain_size();
        for _ in 0..200 {
            f.step();
            for a in f.agents() {
                assert!(a.position.x >= 0.0 && a.position.x < l, "x = {}", a.position.x);
                assert!(a.position.y >= 0.0 && a.position.y < l, "y = {}", a.position.y);
            }
        }
    }

    #[test]
    fn update_is_synchronous() {
        // Both agents must see the other's pre-step heading: each ends on
        // the bisector.
        let store = AgentStore::from_agents(vec![
            Agent::new(Vec2::new(5.0, 5.0), Vec2::from_polar(0.03, 0.0)),
            Agent::new(Vec2::new(5.5, 5.0), Vec2::from_polar(0.03, 2.0 * FRAC_PI_4)),
        ]);
        let mut f = FlockBuilder::new(test_config(2, 10, 0.0)).agents(store).build().unwrap();
        f.step();
        for id in [AgentId(0), AgentId(1)] {
            let v = f.velocity(id).unwrap();
            assert!((v.angle() - FRAC_PI_4).abs() < TOL, "{id}: {}", v.angle());
        }
    }

    #[test]
    fn neighbor_lists_follow_the_grid() {
        let mut f = flock(300, 10, 1.0);
        f.step();
        for (id, a) in f.agents().enumerate() {
            for &n in &a.neighbors {
                assert_ne!(n, id);
                // Positions have moved since the refresh; the grid still holds
                // the binned ones.
                let p = f.grid().cell(f.grid().cell_of(n)).iter().find(|e| e.id == n).unwrap().position;
                let q = f.grid().cell(f.grid().cell_of(id)).iter().find(|e| e.id == id).unwrap().position;
                assert!(p.distance(q) < 1.0);
            }
        }
    }

    #[test]
    fn agent_wraps_across_seam_and_finds_neighbor_there() {
        let store = AgentStore::from_agents(vec![moving_east(10.0 - 0.001, 5.0), moving_east(0.5, 5.0)]);
        let mut f = FlockBuilder::new(test_config(2, 10, 0.0)).agents(store).build().unwrap();

        f.step();
        let x = f.position(AgentId(0)).unwrap().x;
        assert!(x > 0.0 && x < 0.03, "x = {x}");
        // Raw distance was ~9.5 before the wrap.
        assert!(f.agents()[AgentId(0)].neighbors.is_empty());

        f.step();
        assert_eq!(f.agents()[AgentId(0)].neighbors, vec![AgentId(1)]);
        assert_eq!(f.agents()[AgentId(1)].neighbors, vec![AgentId(0)]);
    }

    #[test]
    fn same_seed_gives_bit_identical_trajectories() {
        let mut a = flock(300, 12, 1.5);
        let mut b = flock(300, 12, 1.5);
        for _ in 0..100 {
            a.step();
            b.step();
        }
        assert_eq!(a.agents(), b.agents());
        assert_eq!(a.order_parameter().to_bits(), b.order_parameter().to_bits());
    }

    #[test]
    fn different_seed_diverges() {
        let mut a = flock(100, 10, 1.0);
        let mut config = test_config(100, 10, 1.0);
        config.seed = 43;
        let mut b = FlockBuilder::new(config).build().unwrap();
        a.step();
        b.step();
        assert_ne!(a.agents(), b.agents());
    }
}

// ── Order parameter ───────────────────────────────────────────────────────────

#[cfg(test)]
mod order_tests {
    use super::*;

    #[test]
    fn always_within_unit_interval() {
        let mut f = flock(200, 10, 0.8);
        for _ in 0..100 {
            f.step();
            let v = f.order_parameter();
            assert!((0.0..=1.0).contains(&v), "v = {v}");
        }
    }

    #[test]
    fn aligned_flock_without_noise_stays_ordered() {
        let mut f = FlockBuilder::new(test_config(200, 10, 0.0))
            .uniform_heading(0.4)
            .build()
            .unwrap();
        assert!((f.order_parameter() - 1.0).abs() < TOL);
        for _ in 0..100 {
            f.step();
            assert!((f.order_parameter() - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn huge_noise_scales_like_inverse_sqrt_n() {
        let n = 1_000;
        let mut f = flock(n, 32, 1_000.0);
        let mut sum = 0.0;
        let samples = 50;
        for _ in 0..samples {
            f.step();
            sum += f.order_parameter();
        }
        let mean = sum / samples as f64;
        let scale = 1.0 / (n as f64).sqrt();
        assert!(mean > 0.2 * scale, "mean = {mean}");
        assert!(mean < 3.0 * scale, "mean = {mean}");
    }

    #[test]
    fn low_noise_orders_a_dense_flock() {
        let mut f = flock(400, 10, 0.1);
        f.run_steps(2_000, &mut NoopObserver);
        assert!(f.order_parameter() > 0.8, "v = {}", f.order_parameter());
    }
}

// ── Run loop + observer ───────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:       u64,
        measurements: Vec<(Step, f64)>,
        snapshots:    Vec<(Step, usize, usize, f64)>,
        end:          Option<Step>,
    }

    impl FlockObserver for Recorder {
        fn on_step_start(&mut self, _step: Step) {
            self.starts += 1;
        }
        fn on_measurement(&mut self, step: Step, order: f64) {
            self.measurements.push((step, order));
        }
        fn on_snapshot(&mut self, step: Step, frame: &Frame<'_>) {
            self.snapshots.push((step, frame.agents.len(), frame.grid_width, frame.domain_size));
        }
        fn on_run_end(&mut self, final_step: Step) {
            self.end = Some(final_step);
        }
    }

    #[test]
    fn run_stops_at_total_steps() {
        let mut f = flock(50, 10, 1.0);
        f.run(&mut NoopObserver);
        assert_eq!(f.current_step(), Step(20));
        assert_eq!(f.clock().elapsed_time(), 20.0);
    }

    #[test]
    fn observer_hooks_fire_on_their_intervals() {
        let mut f = flock(50, 10, 1.0);
        let mut rec = Recorder::default();
        f.run(&mut rec);

        assert_eq!(rec.starts, 20);
        let steps: Vec<u64> = rec.measurements.iter().map(|(s, _)| s.0).collect();
        assert_eq!(steps, vec![5, 10, 15, 20]);
        assert_eq!(rec.measurements[3].1, f.order_parameter());
        assert_eq!(
            rec.snapshots,
            vec![(Step(10), 50, 10, 10.0), (Step(20), 50, 10, 10.0)]
        );
        assert_eq!(rec.end, Some(Step(20)));
    }

    #[test]
    fn zero_intervals_disable_hooks() {
        let mut config = test_config(20, 10, 1.0);
        config.measure_interval = 0;
        config.snapshot_interval = 0;
        let mut f = FlockBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        f.run(&mut rec);
        assert!(rec.measurements.is_empty());
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn run_steps_ignores_total_steps() {
        let mut f = flock(50, 10, 1.0);
        let mut rec = Recorder::default();
        f.run_steps(32, &mut rec);
        assert_eq!(f.current_step(), Step(32));
        assert_eq!(rec.measurements.len(), 6);
        assert_eq!(rec.end, None);
    }

    #[test]
    fn run_after_run_steps_resumes() {
        let mut f = flock(50, 10, 1.0);
        f.run_steps(7, &mut NoopObserver);
        let mut rec = Recorder::default();
        f.run(&mut rec);
        assert_eq!(rec.starts, 13);
        assert_eq!(rec.end, Some(Step(20)));
    }

    #[test]
    fn frame_reports_projection_scalars() {
        let f = flock(30, 12, 1.0);
        let frame = f.frame();
        assert_eq!(frame.agents.len(), 30);
        assert_eq!(frame.grid_width, 12);
        assert_eq!(frame.domain_size, 12.0);
        assert_eq!(frame.agents[3].position, f.position(AgentId(3)).unwrap());
        assert!(f.position(AgentId(30)).is_none());
    }
}

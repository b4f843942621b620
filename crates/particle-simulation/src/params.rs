//! Physics parameters for runtime tuning

use particle_physics::{
    AttractionRules, DEFAULT_BETA, DEFAULT_DELTA_T, DEFAULT_FORCE_MULTIPLIER,
    DEFAULT_FRICTION_HALF_TIME, DEFAULT_R_MAX,
};
use serde::{Deserialize, Serialize};

/// Values the UI may change between frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Simulation time per second of wall-clock time
    pub delta_t: f32,
    /// Seconds for velocity to halve
    pub friction_half_time: f32,
    /// Global scale on the attraction matrix
    pub force_multiplier: f32,
    /// Repulsion zone as a fraction of `r_max`
    pub beta: f32,
    /// Interaction radius in world units
    pub r_max: u32,
    pub show_ui: bool,
}

impl SimulationParams {
    /// Fraction of velocity kept after `dt`.
    pub fn friction(&self, dt: f32) -> f32 {
        if self.friction_half_time <= 0.0 {
            return 0.0;
        }
        0.5_f32.powf(dt / self.friction_half_time)
    }

    pub fn rules(&self) -> AttractionRules {
        AttractionRules::new(self.r_max.max(1) as f32, self.beta)
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            delta_t: DEFAULT_DELTA_T,
            friction_half_time: DEFAULT_FRICTION_HALF_TIME,
            force_multiplier: DEFAULT_FORCE_MULTIPLIER,
            beta: DEFAULT_BETA,
            r_max: DEFAULT_R_MAX,
            show_ui: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SimulationParams::default();
        assert_eq!(params.delta_t, 0.2);
        assert_eq!(params.friction_half_time, 0.25);
        assert_eq!(params.force_multiplier, 0.1);
        assert_eq!(params.beta, 0.3);
        assert_eq!(params.r_max, 100);
        assert!(params.show_ui);
    }

    #[test]
    fn test_friction_halves_after_half_time() {
        let params = SimulationParams::default();
        assert!((params.friction(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(params.friction(0.0), 1.0);
    }

    #[test]
    fn test_zero_half_time_stops_instantly() {
        let params = SimulationParams {
            friction_half_time: 0.0,
            ..Default::default()
        };
        assert_eq!(params.friction(0.1), 0.0);
    }

    #[test]
    fn test_rules_clamp_radius() {
        let params = SimulationParams {
            r_max: 0,
            ..Default::default()
        };
        assert_eq!(params.rules().r_max, 1.0);
    }
}

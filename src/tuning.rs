//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror `crate::consts`;
//! a partial JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning load/validation errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that must be strictly positive was not
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    /// A value outside its allowed range
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    pub spawn_interval_ms: u32,
    pub enemy_min_radius: f32,
    pub enemy_max_radius: f32,
    pub enemy_speed: f32,
    pub enemy_saturation: f32,
    pub enemy_lightness: f32,

    // === Player / projectiles ===
    pub player_radius: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,

    // === Damage ===
    pub hit_shrink: f32,
    pub shrink_threshold: f32,
    pub shrink_ticks: u32,
    pub kill_score: u64,

    // === Effects ===
    pub particle_friction: f32,
    pub particle_fade: f32,
    pub particle_burst_speed: f32,
    pub particle_max_radius: f32,
    pub trail_fade: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            enemy_min_radius: ENEMY_MIN_RADIUS,
            enemy_max_radius: ENEMY_MAX_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_saturation: ENEMY_SATURATION,
            enemy_lightness: ENEMY_LIGHTNESS,

            player_radius: PLAYER_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,

            hit_shrink: HIT_SHRINK,
            shrink_threshold: SHRINK_THRESHOLD,
            shrink_ticks: SHRINK_TICKS,
            kill_score: KILL_SCORE,

            particle_friction: PARTICLE_FRICTION,
            particle_fade: PARTICLE_FADE,
            particle_burst_speed: PARTICLE_BURST_SPEED,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            trail_fade: TRAIL_FADE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("enemy_min_radius", self.enemy_min_radius),
            ("enemy_speed", self.enemy_speed),
            ("player_radius", self.player_radius),
            ("projectile_speed", self.projectile_speed),
            ("projectile_radius", self.projectile_radius),
            ("hit_shrink", self.hit_shrink),
            ("shrink_threshold", self.shrink_threshold),
            ("particle_fade", self.particle_fade),
            ("particle_max_radius", self.particle_max_radius),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::NonPositive {
                field: "spawn_interval_ms",
            });
        }
        if self.shrink_ticks == 0 {
            return Err(TuningError::NonPositive {
                field: "shrink_ticks",
            });
        }
        // Radii are drawn as whole numbers in [ceil(min), floor(max)]
        if self.enemy_max_radius.floor() < self.enemy_min_radius.ceil() {
            return Err(TuningError::OutOfRange {
                field: "enemy_max_radius",
                value: self.enemy_max_radius,
            });
        }
        if self.particle_max_radius <= f32::EPSILON {
            return Err(TuningError::OutOfRange {
                field: "particle_max_radius",
                value: self.particle_max_radius,
            });
        }
        if !(0.0..=1.0).contains(&self.particle_friction) {
            return Err(TuningError::OutOfRange {
                field: "particle_friction",
                value: self.particle_friction,
            });
        }
        if !(0.0..=1.0).contains(&self.trail_fade) {
            return Err(TuningError::OutOfRange {
                field: "trail_fade",
                value: self.trail_fade,
            });
        }
        Ok(())
    }

    /// Load from an optional JSON override, falling back to defaults on error
    pub fn from_override(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"kill_score": 250, "enemy_speed": 2.5}"#).unwrap();
        assert_eq!(tuning.kill_score, 250);
        assert_eq!(tuning.enemy_speed, 2.5);
        assert_eq!(tuning.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_negative_radius() {
        let err = Tuning::from_json(r#"{"player_radius": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive {
                field: "player_radius"
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_radius_range() {
        let err = Tuning::from_json(r#"{"enemy_min_radius": 40.0}"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { .. }));
    }

    #[test]
    fn test_rejects_radius_range_without_whole_number() {
        let err = Tuning::from_json(r#"{"enemy_min_radius": 10.5, "enemy_max_radius": 10.7}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "enemy_max_radius",
                ..
            }
        ));
        assert!(Tuning::from_json(r#"{"enemy_min_radius": 10.5, "enemy_max_radius": 11.0}"#).is_ok());
    }

    #[test]
    fn test_rejects_vanishing_particle_radius() {
        let err = Tuning::from_json(r#"{"particle_max_radius": 1e-9}"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "particle_max_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(Tuning::from_override(Some("not json")), Tuning::default());
        assert_eq!(Tuning::from_override(None), Tuning::default());
    }
}

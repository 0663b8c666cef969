//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so the presentation layer can
//! load a tweaked table (JSON) without touching simulation code. The defaults
//! reproduce the shipped balance.

use serde::{Deserialize, Serialize};

/// Validation failure for a [`Tuning`] table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningError {
    /// Player bounds are inverted (padding too large for the field)
    InvertedBounds,
    /// Speed multiplier table is empty
    EmptyMultiplierTable,
    /// Flock size must be an odd, non-zero member count
    BadFlockSize,
    /// A spawn probability is outside [0, 1]
    ChanceOutOfRange(&'static str),
    /// A distance interval or speed is not positive
    NonPositive(&'static str),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::InvertedBounds => write!(f, "player bounds are inverted"),
            TuningError::EmptyMultiplierTable => write!(f, "speed multiplier table is empty"),
            TuningError::BadFlockSize => write!(f, "flock size must be odd and non-zero"),
            TuningError::ChanceOutOfRange(name) => {
                write!(f, "{name} must be within [0, 1]")
            }
            TuningError::NonPositive(name) => write!(f, "{name} must be positive"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Gameplay tuning table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Playfield width in world units
    pub field_width: f32,
    /// Playfield height in world units
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Fixed vertical position of the player's top edge
    pub player_y: f32,
    /// Lateral margin the player can never cross
    pub bounds_padding: f32,
    /// Constant lateral displacement per tick while input is held
    pub move_speed: f32,

    // === Tilt input ===
    /// Tilt magnitude (degrees) beyond which lateral movement engages
    pub tilt_threshold: f32,
    /// Compass-heading fallback band that maps to a left step (degrees)
    pub heading_left_band: (f32, f32),
    /// Compass-heading fallback band that maps to a right step (degrees)
    pub heading_right_band: (f32, f32),

    // === Entities ===
    /// Base square size of spawned entities
    pub object_size: f32,
    /// Downward drift of decorative clouds (per tick)
    pub cloud_speed: f32,
    /// Fall speed of ground hazards and collectibles (per tick)
    pub ground_hazard_speed: f32,
    /// Horizontal speed of flock members (per tick)
    pub flock_speed: f32,
    /// Members per flock formation (odd)
    pub flock_size: usize,
    /// Extra spacing between flock members
    pub flock_gap: f32,

    // === Progression ===
    /// Reference distance covered in `reference_time` at multiplier 1.0
    pub reference_distance: f32,
    /// Reference time window in seconds
    pub reference_time: f32,
    /// Speed multipliers indexed by collectible count
    pub speed_multipliers: Vec<f32>,

    // === Spawning ===
    /// Per-tick probability of a decorative cloud
    pub cloud_chance: f32,
    /// Maximum concurrent decorative clouds
    pub max_clouds: usize,
    /// Distance between hazard spawn checks
    pub hazard_interval: f32,
    /// Hazard probability at session start
    pub initial_hazard_chance: f32,
    /// Distance between hazard probability increases
    pub ramp_interval: f32,
    /// Hazard probability increase per ramp step
    pub ramp_increment: f32,
    /// Hazard probability ceiling
    pub max_hazard_chance: f32,
    /// Distance between collectible spawn checks
    pub collectible_interval: f32,
    /// Probability of a collectible per check
    pub collectible_chance: f32,

    // === Timing ===
    /// Largest delta a single tick may consume (seconds); spikes are clamped
    pub max_tick_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 1080.0,
            field_height: 1920.0,

            player_width: 220.0,
            player_height: 220.0,
            player_y: 1920.0 - 400.0,
            bounds_padding: 30.0,
            move_speed: 12.0,

            tilt_threshold: 10.0,
            heading_left_band: (40.0, 60.0),
            heading_right_band: (300.0, 320.0),

            object_size: 150.0,
            cloud_speed: 5.0,
            ground_hazard_speed: 3.0,
            flock_speed: 11.0,
            flock_size: 3,
            flock_gap: 20.0,

            reference_distance: 100.0,
            reference_time: 30.0,
            speed_multipliers: vec![1.0, 1.6, 2.2, 2.8, 3.0],

            cloud_chance: 0.02,
            max_clouds: 5,
            hazard_interval: 50.0,
            initial_hazard_chance: 0.5,
            ramp_interval: 200.0,
            ramp_increment: 0.05,
            max_hazard_chance: 0.6,
            collectible_interval: 100.0,
            collectible_chance: 0.4,

            max_tick_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Distance gained per second at multiplier 1.0
    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.reference_distance / self.reference_time
    }

    /// Leftmost legal player position
    #[inline]
    pub fn player_min_x(&self) -> f32 {
        self.bounds_padding
    }

    /// Rightmost legal player position
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player_width - self.bounds_padding
    }

    /// Collectible count cap (last multiplier table index)
    #[inline]
    pub fn collectible_cap(&self) -> u8 {
        (self.speed_multipliers.len() - 1) as u8
    }

    /// Speed multiplier for a collectible count (clamped to the table)
    pub fn multiplier(&self, collected: u8) -> f32 {
        let idx = (collected as usize).min(self.speed_multipliers.len() - 1);
        self.speed_multipliers[idx]
    }

    /// Reject tables a session cannot run on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.player_min_x() > self.player_max_x() {
            return Err(TuningError::InvertedBounds);
        }
        if self.speed_multipliers.is_empty() {
            return Err(TuningError::EmptyMultiplierTable);
        }
        if self.flock_size == 0 || self.flock_size % 2 == 0 {
            return Err(TuningError::BadFlockSize);
        }
        for (name, chance) in [
            ("cloud_chance", self.cloud_chance),
            ("initial_hazard_chance", self.initial_hazard_chance),
            ("max_hazard_chance", self.max_hazard_chance),
            ("collectible_chance", self.collectible_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(TuningError::ChanceOutOfRange(name));
            }
        }
        for (name, value) in [
            ("reference_distance", self.reference_distance),
            ("reference_time", self.reference_time),
            ("hazard_interval", self.hazard_interval),
            ("ramp_interval", self.ramp_interval),
            ("collectible_interval", self.collectible_interval),
            ("max_tick_dt", self.max_tick_dt),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_base_speed_reference() {
        // 100 units over 30 seconds
        let t = Tuning::default();
        assert!((t.base_speed() - 100.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_multiplier_lookup_clamps() {
        let t = Tuning::default();
        assert_eq!(t.multiplier(0), 1.0);
        assert_eq!(t.multiplier(4), 3.0);
        // Past-the-end counts stay at the last entry
        assert_eq!(t.multiplier(200), 3.0);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let t = Tuning {
            bounds_padding: 10_000.0,
            ..Default::default()
        };
        assert_eq!(t.validate(), Err(TuningError::InvertedBounds));
    }

    #[test]
    fn test_validate_rejects_even_flock() {
        let t = Tuning {
            flock_size: 4,
            ..Default::default()
        };
        assert_eq!(t.validate(), Err(TuningError::BadFlockSize));
    }

    #[test]
    fn test_tuning_json_round_trip() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.speed_multipliers, t.speed_multipliers);
        assert_eq!(back.field_width, t.field_width);
    }
}

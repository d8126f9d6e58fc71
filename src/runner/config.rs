//! Tunable constants for a run. `Default` reproduces the stock game.

use super::GameError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunnerConfig {
    // --- Playfield ---
    pub field_width: f64,
    pub field_height: f64,
    pub floor_y: f64, // neon floor line (render only)
    /// Entities left of this x are pruned.
    pub despawn_x: f64,

    // --- Player ---
    pub player_x: f64,
    pub player_baseline_y: f64, // y of the player's top edge when grounded
    pub player_size: f64,
    pub jump_impulse: f64,
    pub gravity: f64,

    // --- Spawning (per-tick Bernoulli trials) ---
    pub obstacle_chance: f64,
    pub drone_chance: f64, // given an obstacle spawns
    pub obstacle_gap: f64,
    pub powerup_chance: f64,
    pub health_chance: f64, // given a powerup spawns
    pub coin_chance: f64,

    // --- Entity geometry ---
    pub obstacle_size: f64,
    pub spike_y: f64,
    pub drone_y: f64,
    pub powerup_size: f64,
    pub powerup_y: f64,
    pub coin_size: f64,
    pub coin_min_y: f64,
    pub coin_y_range: f64,
    pub bullet_width: f64,
    pub bullet_height: f64,
    pub bullet_speed: f64,
    /// Inward horizontal margin applied to obstacle hitboxes for player hits.
    pub hit_margin: f64,

    // --- Run state ---
    pub max_lives: u32,
    pub start_lives: u32,
    pub start_ammo: u32,
    pub ammo_pack: u32,
    pub start_speed: f64,
    pub speed_step: f64,
    pub speed_every: u64, // score ticks between speed steps
    pub invulnerable_ticks: u32,

    // --- Score awards ---
    pub coin_score: u64,
    pub kill_score: u64,

    /// Fixed tick interval in milliseconds.
    pub tick_ms: i32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            field_width: 600.0,
            field_height: 200.0,
            floor_y: 180.0,
            despawn_x: -50.0,
            player_x: 50.0,
            player_baseline_y: 150.0,
            player_size: 30.0,
            jump_impulse: -12.0,
            gravity: 0.8,
            obstacle_chance: 0.015,
            drone_chance: 0.3,
            obstacle_gap: 250.0,
            powerup_chance: 0.005,
            health_chance: 0.3,
            coin_chance: 0.01,
            obstacle_size: 20.0,
            spike_y: 160.0,
            drone_y: 100.0,
            powerup_size: 20.0,
            powerup_y: 120.0,
            coin_size: 15.0,
            coin_min_y: 100.0,
            coin_y_range: 40.0,
            bullet_width: 10.0,
            bullet_height: 4.0,
            bullet_speed: 10.0,
            hit_margin: 5.0,
            max_lives: 3,
            start_lives: 3,
            start_ammo: 5,
            ammo_pack: 5,
            start_speed: 5.0,
            speed_step: 0.5,
            speed_every: 300,
            invulnerable_ticks: 60,
            coin_score: 100,
            kill_score: 50,
            tick_ms: 20,
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return invalid("playfield must have a positive size");
        }
        let chances = [
            ("obstacle_chance", self.obstacle_chance),
            ("drone_chance", self.drone_chance),
            ("powerup_chance", self.powerup_chance),
            ("health_chance", self.health_chance),
            ("coin_chance", self.coin_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.max_lives == 0 {
            return invalid("max_lives must be at least 1");
        }
        if self.start_lives == 0 || self.start_lives > self.max_lives {
            return invalid("start_lives must be within [1, max_lives]");
        }
        if self.speed_every == 0 {
            return invalid("speed_every must be non-zero");
        }
        if self.tick_ms <= 0 {
            return invalid("tick_ms must be positive");
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

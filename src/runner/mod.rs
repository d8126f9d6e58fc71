//! Endless-runner simulation shown while an image is being generated.
//!
//! A `Session` owns every piece of run state: the player square, the three
//! left-scrolling entity lists (obstacles, coins, powerups), the player's
//! bullets and the counters shown on the HUD. It knows nothing about the
//! browser; the `web` module drives `tick()` from an interval, forwards input
//! commands, draws through `render::draw_frame` and plays the queued sound cues.
//!
//! Phases: `Idle -> Running -> GameOver`. Only `restart()` leaves `GameOver`.

pub mod config;
pub mod entity;
pub mod event;
pub mod render;
pub mod rng;

use std::fmt;

pub use config::RunnerConfig;
pub use entity::{Bullet, Coin, Obstacle, ObstacleKind, Player, Powerup, PowerupKind, Rect};
pub use event::SoundCue;
pub use rng::{RandomSource, ScriptedRng, SimpleRng};

// --- Errors -----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// `start()` after game over; call `restart()` first.
    AwaitingRestart,
    /// `restart()` while a run is active.
    StillRunning,
    InvalidConfig(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AwaitingRestart => write!(f, "game over; restart before starting a new run"),
            GameError::StillRunning => write!(f, "cannot restart while a run is active"),
            GameError::InvalidConfig(msg) => write!(f, "invalid runner config: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

// --- Phase / HUD --------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// Snapshot of the numbers shown around the canvas, refreshed once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub score: u64, // display value (raw score / 10)
    pub coins: u32,
    pub lives: u32,
    pub ammo: u32,
    pub speed: f64,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

// --- Session ------------------------------------------------------------------

pub struct Session<R: RandomSource> {
    cfg: RunnerConfig,
    rng: R,
    phase: Phase,
    player: Player,
    obstacles: Vec<Obstacle>,
    coins: Vec<Coin>,
    powerups: Vec<Powerup>,
    bullets: Vec<Bullet>,
    score: u64,
    coins_collected: u32,
    lives: u32,
    ammo: u32,
    speed: f64,
    invulnerable: u32, // ticks of post-hit immunity left
    ticks: u64,
    cues: Vec<SoundCue>,
    hud: Hud,
}

impl<R: RandomSource> Session<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(RunnerConfig::default(), rng)
    }

    /// Builds an idle session. Call `RunnerConfig::validate` first for
    /// user-supplied configs.
    pub fn with_config(cfg: RunnerConfig, rng: R) -> Self {
        let player = Player::new(cfg.player_x, cfg.player_baseline_y, cfg.player_size);
        let mut session = Self {
            player,
            obstacles: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            coins_collected: 0,
            lives: cfg.start_lives,
            ammo: cfg.start_ammo,
            speed: cfg.start_speed,
            invulnerable: 0,
            ticks: 0,
            cues: Vec::new(),
            hud: Hud {
                score: 0,
                coins: 0,
                lives: cfg.start_lives,
                ammo: cfg.start_ammo,
                speed: cfg.start_speed,
            },
            phase: Phase::Idle,
            cfg,
            rng,
        };
        session.refresh_hud();
        session
    }

    // --- Commands -------------------------------------------------------------

    /// Resets all run state and enters `Running`. Restarts an active run.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::AwaitingRestart);
        }
        self.reset();
        self.phase = Phase::Running;
        Ok(())
    }

    /// Halts the run without clearing it so the last frame stays inspectable.
    pub fn stop(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
        }
    }

    /// Acknowledges a finished run and returns to `Idle`.
    pub fn restart(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Running => Err(GameError::StillRunning),
            Phase::GameOver | Phase::Idle => {
                self.phase = Phase::Idle;
                Ok(())
            }
        }
    }

    pub fn jump(&mut self) -> bool {
        if self.phase != Phase::Running || !self.player.grounded {
            return false;
        }
        self.player.dy = self.cfg.jump_impulse;
        self.player.grounded = false;
        self.cues.push(SoundCue::Jump);
        true
    }

    pub fn shoot(&mut self) -> bool {
        if self.phase != Phase::Running || self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        let rect = Rect::new(
            self.player.x + self.player.size,
            self.player.y + self.player.size / 2.0,
            self.cfg.bullet_width,
            self.cfg.bullet_height,
        );
        self.bullets.push(Bullet { rect });
        self.cues.push(SoundCue::Shoot);
        self.refresh_hud();
        true
    }

    // --- Forced spawns (bypass the dice and the spawn gap) --------------------

    pub fn spawn_obstacle(&mut self, kind: ObstacleKind, x: f64) {
        let y = match kind {
            ObstacleKind::Spike => self.cfg.spike_y,
            ObstacleKind::Drone => self.cfg.drone_y,
        };
        let size = self.cfg.obstacle_size;
        self.obstacles.push(Obstacle {
            kind,
            rect: Rect::new(x, y, size, size),
        });
    }

    pub fn spawn_coin(&mut self, x: f64, y: f64) {
        let size = self.cfg.coin_size;
        self.coins.push(Coin {
            rect: Rect::new(x, y, size, size),
        });
    }

    pub fn spawn_powerup(&mut self, kind: PowerupKind, x: f64) {
        let size = self.cfg.powerup_size;
        self.powerups.push(Powerup {
            kind,
            rect: Rect::new(x, self.cfg.powerup_y, size, size),
        });
    }

    // --- Tick -----------------------------------------------------------------

    /// Advances one fixed step. Returns `false` (and changes nothing) unless
    /// the session is running.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.ticks += 1;

        self.player
            .apply_gravity(self.cfg.gravity, self.cfg.player_baseline_y);
        if self.invulnerable > 0 {
            self.invulnerable -= 1;
        }

        self.roll_spawns();
        self.update_bullets();
        self.update_powerups();
        self.update_coins();
        self.update_obstacles();

        if self.phase == Phase::GameOver {
            console_log!(
                "runner: game over score={} coins={}",
                self.display_score(),
                self.coins_collected
            );
            self.refresh_hud();
            return true;
        }

        self.score += 1;
        if self.score % self.cfg.speed_every == 0 {
            self.speed += self.cfg.speed_step;
        }
        self.refresh_hud();
        true
    }

    fn roll_spawns(&mut self) {
        let field_w = self.cfg.field_width;

        if self.rng.next_f64() < self.cfg.obstacle_chance {
            // Only the newest obstacle is consulted for the gap.
            let clear = self
                .obstacles
                .last()
                .map(|last| field_w - last.rect.x > self.cfg.obstacle_gap)
                .unwrap_or(true);
            if clear {
                let kind = if self.rng.next_f64() < self.cfg.drone_chance {
                    ObstacleKind::Drone
                } else {
                    ObstacleKind::Spike
                };
                self.spawn_obstacle(kind, field_w);
            }
        }

        if self.rng.next_f64() < self.cfg.powerup_chance {
            let kind = if self.rng.next_f64() < self.cfg.health_chance {
                PowerupKind::Health
            } else {
                PowerupKind::Ammo
            };
            self.spawn_powerup(kind, field_w);
        }

        if self.rng.next_f64() < self.cfg.coin_chance {
            let y = self.cfg.coin_min_y + self.rng.next_f64() * self.cfg.coin_y_range;
            self.spawn_coin(field_w, y);
        }
    }

    fn update_bullets(&mut self) {
        let mut i = 0;
        while i < self.bullets.len() {
            self.bullets[i].rect.x += self.cfg.bullet_speed;
            let b = self.bullets[i].rect;
            if let Some(j) = self.obstacles.iter().position(|o| b.overlaps(&o.rect)) {
                self.obstacles.remove(j);
                self.bullets.remove(i);
                self.score += self.cfg.kill_score;
                self.cues.push(SoundCue::Explosion);
                continue;
            }
            i += 1;
        }
        let field_w = self.cfg.field_width;
        self.bullets.retain(|b| b.rect.x < field_w);
    }

    fn update_powerups(&mut self) {
        let player = self.player.rect();
        let mut i = 0;
        while i < self.powerups.len() {
            self.powerups[i].rect.x -= self.speed;
            if player.overlaps(&self.powerups[i].rect) {
                let p = self.powerups.remove(i);
                match p.kind {
                    PowerupKind::Health => {
                        self.lives = (self.lives + 1).min(self.cfg.max_lives);
                    }
                    PowerupKind::Ammo => self.ammo += self.cfg.ammo_pack,
                }
                self.cues.push(SoundCue::Pickup);
                continue;
            }
            i += 1;
        }
        let despawn_x = self.cfg.despawn_x;
        self.powerups.retain(|p| p.rect.x > despawn_x);
    }

    fn update_coins(&mut self) {
        let player = self.player.rect();
        let mut i = 0;
        while i < self.coins.len() {
            self.coins[i].rect.x -= self.speed;
            if player.overlaps(&self.coins[i].rect) {
                self.coins.remove(i);
                self.coins_collected += 1;
                self.score += self.cfg.coin_score;
                self.cues.push(SoundCue::Pickup);
                continue;
            }
            i += 1;
        }
        let despawn_x = self.cfg.despawn_x;
        self.coins.retain(|c| c.rect.x > despawn_x);
    }

    fn update_obstacles(&mut self) {
        let player = self.player.rect();
        for idx in 0..self.obstacles.len() {
            self.obstacles[idx].rect.x -= self.speed;
            if self.invulnerable > 0 {
                continue;
            }
            let hitbox = self.obstacles[idx].rect.inset_x(self.cfg.hit_margin);
            if player.overlaps(&hitbox) {
                self.lives = self.lives.saturating_sub(1);
                self.invulnerable = self.cfg.invulnerable_ticks;
                self.cues.push(SoundCue::Hit);
                if self.lives == 0 {
                    self.phase = Phase::GameOver;
                }
            }
        }
        let despawn_x = self.cfg.despawn_x;
        self.obstacles.retain(|o| o.rect.x > despawn_x);
    }

    fn reset(&mut self) {
        self.player = Player::new(
            self.cfg.player_x,
            self.cfg.player_baseline_y,
            self.cfg.player_size,
        );
        self.obstacles.clear();
        self.coins.clear();
        self.powerups.clear();
        self.bullets.clear();
        self.score = 0;
        self.coins_collected = 0;
        self.lives = self.cfg.start_lives;
        self.ammo = self.cfg.start_ammo;
        self.speed = self.cfg.start_speed;
        self.invulnerable = 0;
        self.ticks = 0;
        self.cues.clear();
        self.refresh_hud();
    }

    fn refresh_hud(&mut self) {
        self.hud = Hud {
            score: self.display_score(),
            coins: self.coins_collected,
            lives: self.lives,
            ammo: self.ammo,
            speed: self.speed,
        };
    }

    // --- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &RunnerConfig {
        &self.cfg
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }
    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }
    /// Raw score counter (ticks survived plus awards).
    pub fn score(&self) -> u64 {
        self.score
    }
    pub fn display_score(&self) -> u64 {
        self.score / 10
    }
    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }
    pub fn lives(&self) -> u32 {
        self.lives
    }
    pub fn ammo(&self) -> u32 {
        self.ammo
    }
    pub fn speed(&self) -> f64 {
        self.speed
    }
    pub fn invulnerable(&self) -> u32 {
        self.invulnerable
    }
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
    pub fn hud(&self) -> Hud {
        self.hud
    }

    /// Whether the player sprite is drawn this tick (blinks every 5 ticks
    /// while invulnerable).
    pub fn player_visible(&self) -> bool {
        self.invulnerable == 0 || (self.invulnerable / 5) % 2 == 1
    }

    /// Takes the cues raised since the last drain.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

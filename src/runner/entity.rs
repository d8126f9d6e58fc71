// Runner entities: plain data plus the bounding boxes used for collisions.

/// Axis-aligned box, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Shrinks the box horizontally by `margin` on both sides.
    pub fn inset_x(&self, margin: f64) -> Rect {
        Rect::new(self.x + margin, self.y, self.w - 2.0 * margin, self.h)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub dy: f64,
    pub grounded: bool,
}

impl Player {
    pub fn new(x: f64, baseline_y: f64, size: f64) -> Self {
        Self {
            x,
            y: baseline_y,
            size,
            dy: 0.0,
            grounded: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    /// One tick of gravity, clamped to the baseline.
    pub fn apply_gravity(&mut self, gravity: f64, baseline_y: f64) {
        self.dy += gravity;
        self.y += self.dy;
        if self.y > baseline_y {
            self.y = baseline_y;
            self.dy = 0.0;
            self.grounded = true;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Ground hazard; must be jumped.
    Spike,
    /// Airborne hazard; passes over a grounded player's head only if low enough.
    Drone,
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Coin {
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    Health,
    Ammo,
}

#[derive(Clone, Debug)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
}

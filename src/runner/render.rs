//! Frame geometry. Everything is drawn through `Painter` so the same code
//! paints the browser canvas and a recording surface in tests.

use super::{ObstacleKind, Phase, PowerupKind, RandomSource, Session, SimpleRng};

const BACKGROUND: &str = "#1e1e2e";
const NEON_BLUE: &str = "#89b4fa";
const PINK: &str = "#f38ba8";
const GOLD: &str = "#f9e2af";
const PEACH: &str = "#fab387";
const MAUVE: &str = "#cba6f7";
const HUD_FONT: &str = "20px Arial";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Minimal 2D surface the runner needs.
pub trait Painter {
    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);
    fn fill_polygon(&mut self, color: &str, points: &[(f64, f64)]);
    fn fill_circle(&mut self, fill: &str, stroke: &str, cx: f64, cy: f64, r: f64);
    fn stroke_line(&mut self, color: &str, width: f64, from: (f64, f64), to: (f64, f64));
    fn fill_text(&mut self, color: &str, font: &str, align: TextAlign, text: &str, x: f64, y: f64);
    /// Soft glow applied to subsequent shapes; `None` turns it off.
    fn set_glow(&mut self, glow: Option<(&str, f64)>);
}

/// Draws frames; owns its own RNG so background twinkles never disturb the
/// session's spawn sequence.
pub struct Renderer {
    twinkle: SimpleRng,
}

impl Renderer {
    pub fn new(seed: u64) -> Self {
        Self {
            twinkle: SimpleRng::new(seed),
        }
    }

    pub fn draw_frame<R: RandomSource, P: Painter>(&mut self, session: &Session<R>, p: &mut P) {
        let cfg = session.config();
        let (w, h) = (cfg.field_width, cfg.field_height);

        p.fill_rect(BACKGROUND, 0.0, 0.0, w, h);
        if self.twinkle.next_f64() < 0.1 {
            let sx = self.twinkle.next_f64() * w;
            let sy = self.twinkle.next_f64() * (h / 2.0);
            p.fill_rect("#fff", sx, sy, 2.0, 2.0);
        }

        // Neon floor
        p.set_glow(Some((NEON_BLUE, 10.0)));
        p.stroke_line(NEON_BLUE, 3.0, (0.0, cfg.floor_y), (w, cfg.floor_y));
        p.set_glow(None);

        draw_hud(session, p);

        if session.player_visible() {
            let pl = session.player();
            p.set_glow(Some((MAUVE, 15.0)));
            p.fill_rect(MAUVE, pl.x, pl.y, pl.size, pl.size);
            p.set_glow(None);
            p.fill_rect(BACKGROUND, pl.x + 20.0, pl.y + 5.0, 5.0, 5.0); // eye
        }

        for b in session.bullets() {
            p.fill_rect(GOLD, b.rect.x, b.rect.y, b.rect.w, b.rect.h);
        }

        for pu in session.powerups() {
            let glyph = match pu.kind {
                PowerupKind::Health => "❤️",
                PowerupKind::Ammo => "🔫",
            };
            p.fill_text(
                PINK,
                HUD_FONT,
                TextAlign::Left,
                glyph,
                pu.rect.x,
                pu.rect.y + pu.rect.h,
            );
        }

        for c in session.coins() {
            let r = c.rect;
            p.fill_circle(GOLD, PEACH, r.x + 7.0, r.y + 7.0, 8.0);
        }

        for o in session.obstacles() {
            let r = o.rect;
            match o.kind {
                ObstacleKind::Drone => {
                    p.fill_polygon(
                        PINK,
                        &[(r.x, r.y), (r.x + r.w, r.y + r.h / 2.0), (r.x, r.y + r.h)],
                    );
                    p.fill_rect("#fff", r.x + 5.0, r.y + 8.0, 4.0, 4.0);
                }
                ObstacleKind::Spike => {
                    p.fill_polygon(
                        PINK,
                        &[
                            (r.x, r.y + r.h),
                            (r.x + r.w / 2.0, r.y),
                            (r.x + r.w, r.y + r.h),
                        ],
                    );
                }
            }
        }

        if session.phase() == Phase::GameOver {
            draw_game_over(session, p);
        }
    }
}

fn draw_hud<R: RandomSource, P: Painter>(session: &Session<R>, p: &mut P) {
    let hud = session.hud();
    p.fill_text(
        PINK,
        HUD_FONT,
        TextAlign::Left,
        &"❤️".repeat(hud.lives as usize),
        10.0,
        30.0,
    );
    p.fill_text(
        NEON_BLUE,
        HUD_FONT,
        TextAlign::Left,
        &format!("🔫 {}", hud.ammo),
        10.0,
        60.0,
    );
    p.fill_text(
        GOLD,
        HUD_FONT,
        TextAlign::Left,
        &format!("🪙 {}", hud.coins),
        10.0,
        90.0,
    );
}

fn draw_game_over<R: RandomSource, P: Painter>(session: &Session<R>, p: &mut P) {
    let cfg = session.config();
    let cx = cfg.field_width / 2.0;
    p.fill_rect("rgba(30, 30, 46, 0.9)", 0.0, 0.0, cfg.field_width, cfg.field_height);
    p.fill_text(PINK, "bold 30px Arial", TextAlign::Center, "GAME OVER", cx, 90.0);
    p.fill_text(
        "#fff",
        HUD_FONT,
        TextAlign::Center,
        &format!("Score: {}", session.display_score()),
        cx,
        130.0,
    );
    p.fill_text(
        "#fff",
        HUD_FONT,
        TextAlign::Center,
        &format!("Coins: {}", session.coins_collected()),
        cx,
        160.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{RunnerConfig, ScriptedRng};

    #[derive(Debug, PartialEq)]
    enum Op {
        Rect(String, f64, f64, f64, f64),
        Poly(String, Vec<(f64, f64)>),
        Circle(f64, f64, f64),
        Line(f64, f64, f64, f64),
        Text(String, TextAlign, f64, f64),
        Glow(bool),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Painter for Recorder {
        fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Rect(color.to_string(), x, y, w, h));
        }
        fn fill_polygon(&mut self, color: &str, points: &[(f64, f64)]) {
            self.ops.push(Op::Poly(color.to_string(), points.to_vec()));
        }
        fn fill_circle(&mut self, _fill: &str, _stroke: &str, cx: f64, cy: f64, r: f64) {
            self.ops.push(Op::Circle(cx, cy, r));
        }
        fn stroke_line(&mut self, _color: &str, _width: f64, from: (f64, f64), to: (f64, f64)) {
            self.ops.push(Op::Line(from.0, from.1, to.0, to.1));
        }
        fn fill_text(&mut self, _c: &str, _f: &str, align: TextAlign, text: &str, x: f64, y: f64) {
            self.ops.push(Op::Text(text.to_string(), align, x, y));
        }
        fn set_glow(&mut self, glow: Option<(&str, f64)>) {
            self.ops.push(Op::Glow(glow.is_some()));
        }
    }

    fn draw(session: &Session<ScriptedRng>) -> Vec<Op> {
        let mut rec = Recorder::default();
        Renderer::new(7).draw_frame(session, &mut rec);
        rec.ops
    }

    fn has_player(ops: &[Op]) -> bool {
        ops.iter()
            .any(|op| matches!(op, Op::Rect(c, _, _, w, _) if c == MAUVE && *w == 30.0))
    }

    #[test]
    fn test_frame_draws_floor_and_player() {
        let mut s = Session::new(ScriptedRng::never_spawn());
        s.start().unwrap();
        s.tick();
        let ops = draw(&s);
        assert_eq!(ops[0], Op::Rect(BACKGROUND.into(), 0.0, 0.0, 600.0, 200.0));
        assert!(ops.contains(&Op::Line(0.0, 180.0, 600.0, 180.0)));
        assert!(ops.contains(&Op::Rect(MAUVE.into(), 50.0, 150.0, 30.0, 30.0)));
        assert!(ops.contains(&Op::Text("🔫 5".into(), TextAlign::Left, 10.0, 60.0)));
    }

    #[test]
    fn test_entity_geometry() {
        let mut s = Session::new(ScriptedRng::never_spawn());
        s.start().unwrap();
        s.spawn_coin(300.0, 110.0);
        s.spawn_obstacle(ObstacleKind::Spike, 400.0);
        s.spawn_obstacle(ObstacleKind::Drone, 500.0);
        let ops = draw(&s);
        assert!(ops.contains(&Op::Circle(307.0, 117.0, 8.0)));
        assert!(ops.contains(&Op::Poly(
            PINK.into(),
            vec![(400.0, 180.0), (410.0, 160.0), (420.0, 180.0)]
        )));
        assert!(ops.contains(&Op::Poly(
            PINK.into(),
            vec![(500.0, 100.0), (520.0, 110.0), (500.0, 120.0)]
        )));
    }

    #[test]
    fn test_player_hidden_on_blink_off_tick() {
        let mut s = Session::new(ScriptedRng::never_spawn());
        s.start().unwrap();
        s.spawn_obstacle(ObstacleKind::Spike, 50.0);
        s.tick(); // hit, invulnerable = 60 -> (60 / 5) % 2 == 0, hidden
        assert!(!has_player(&draw(&s)));
        for _ in 0..5 {
            s.tick();
        }
        // invulnerable = 55 -> visible
        assert!(has_player(&draw(&s)));
    }

    #[test]
    fn test_game_over_summary() {
        let cfg = RunnerConfig {
            start_lives: 1,
            ..RunnerConfig::default()
        };
        let mut s = Session::with_config(cfg, ScriptedRng::never_spawn());
        s.start().unwrap();
        s.spawn_obstacle(ObstacleKind::Spike, 50.0);
        s.tick();
        let ops = draw(&s);
        assert!(ops.contains(&Op::Text("GAME OVER".into(), TextAlign::Center, 300.0, 90.0)));
        assert!(ops.contains(&Op::Text("Score: 0".into(), TextAlign::Center, 300.0, 130.0)));
        assert!(ops.contains(&Op::Text("Coins: 0".into(), TextAlign::Center, 300.0, 160.0)));
    }
}

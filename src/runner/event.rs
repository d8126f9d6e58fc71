/// Sound requests raised while a tick or an input command runs.
/// The host drains them after each call and plays them fire-and-forget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Hit,
    Pickup,
    Shoot,
    Explosion,
    Jump,
}

impl SoundCue {
    /// Name handed to the page's `playSound`.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Hit => "hit",
            SoundCue::Pickup => "pickup",
            SoundCue::Shoot => "shoot",
            SoundCue::Explosion => "explosion",
            SoundCue::Jump => "jump",
        }
    }
}

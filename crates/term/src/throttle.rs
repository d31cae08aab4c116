//! Frame pacing for the render loop.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::GameSnapshot;
use crate::game_view::Viewport;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    frame_ms: u64,
    idle_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    /// `frame_ms` paces live frames; `idle_ms` paces frames that show nothing new
    pub fn new(frame_ms: u64, idle_ms: u64) -> Self {
        Self {
            frame_ms,
            idle_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - While bodies are moving (`is_static == false`): at most once per `frame_ms`.
    /// - Otherwise: immediately when the fingerprint changes, else once per `idle_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let since = now_ms.saturating_sub(self.last_render_ms);
        let render = !self.has_rendered
            || if is_static {
                fingerprint != self.last_fingerprint || since >= self.idle_ms
            } else {
                since >= self.frame_ms
            };

        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        render
    }
}

/// Hash of everything visible in a frame besides body positions
pub fn fingerprint(snap: &GameSnapshot, viewport: Viewport) -> u64 {
    let mut h = DefaultHasher::new();
    (viewport.width, viewport.height).hash(&mut h);
    snap.hit_score.to_bits().hash(&mut h);
    snap.multiplier.to_bits().hash(&mut h);
    snap.high_score.to_bits().hash(&mut h);
    (snap.streak, snap.miss_score, snap.game_end).hash(&mut h);
    snap.flashes.hash(&mut h);
    (snap.markers.len(), snap.tails.len()).hash(&mut h);
    h.finish()
}

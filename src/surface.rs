//! Visual-tree seams. The controller, generator and typewriter only talk to the
//! page through these traits; `dom` implements them on web-sys elements.

use crate::particles::Particle;

/// A full-viewport screen that fades in or out.
pub trait Screen {
    fn set_opacity(&self, opacity: f32);
    /// Toggle `pointer-events` between `auto` and `none`.
    fn set_interactive(&self, interactive: bool);
    /// Remove from layout entirely, not just transparent.
    fn hide(&self);
}

/// Container holding a particle field.
pub trait ParticleLayer {
    fn particle_count(&self) -> usize;
    /// Drop every existing child and insert `particles` in order.
    fn replace_particles(&self, particles: &[Particle]);
    fn set_opacity(&self, opacity: f32);
}

/// The element the typewriter renders into.
pub trait TextTarget {
    fn set_text(&self, text: &str);
    /// Remove the blinking-cursor border.
    fn hide_cursor(&self);
}

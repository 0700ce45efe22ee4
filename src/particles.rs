//! Decorative floating particles.
//!
//! A particle is fully described at creation: horizontal position, animation
//! duration/delay and a horizontal drift. The browser's `floatUp` keyframes do
//! the actual motion, so nothing here ticks.

use std::ops::Range;

use crate::surface::ParticleLayer;

/// Uniform source of `f64` in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Browser / OS entropy through `getrandom`.
#[derive(Default)]
pub struct BrowserRandom {
    // Fallback stream used only if the entropy source is unavailable.
    fallback: Lcg,
}

impl RandomSource for BrowserRandom {
    fn next_f64(&mut self) -> f64 {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => unit_from_bits(u64::from_le_bytes(bytes)),
            Err(e) => {
                log::warn!("getrandom failed ({e}), using fallback generator");
                self.fallback.next_f64()
            }
        }
    }
}

/// 64-bit linear congruential generator (Knuth's MMIX constants). Deterministic
/// for a given seed; not suitable for anything but visuals and tests.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(0x5EED_CAFE)
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        unit_from_bits(self.state)
    }
}

// Top 53 bits -> [0, 1).
fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Round, slow floaters on screen 1.
    Dot,
    /// Thin, faster streaks on screen 2.
    Bar,
}

impl ParticleKind {
    /// Animation duration range in seconds.
    pub fn duration_range(self) -> Range<f64> {
        match self {
            ParticleKind::Dot => 6.0..16.0,
            ParticleKind::Bar => 3.0..8.0,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ParticleKind::Dot => "particle particle-dot",
            ParticleKind::Bar => "particle particle-bar",
        }
    }
}

pub const DELAY_RANGE_S: Range<f64> = 0.0..4.0;
pub const DRIFT_RANGE_PX: Range<f64> = -20.0..20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Horizontal position, percent of container width.
    pub left_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub drift_px: f64,
}

impl Particle {
    pub fn random(kind: ParticleKind, rng: &mut dyn RandomSource) -> Self {
        let left_pct = rng.next_f64() * 100.0;
        let duration = kind.duration_range();
        let duration_s = duration.start + rng.next_f64() * (duration.end - duration.start);
        let delay_s = rng.next_f64() * DELAY_RANGE_S.end;
        let drift_px = (rng.next_f64() - 0.5) * 40.0;
        Self { kind, left_pct, duration_s, delay_s, drift_px }
    }

    /// Inline `left` value.
    pub fn left_css(&self) -> String {
        format!("{}%", self.left_pct)
    }

    /// Inline `animation` shorthand driving the shared `floatUp` keyframes.
    pub fn animation_css(&self) -> String {
        format!("floatUp {}s linear {}s infinite", self.duration_s, self.delay_s)
    }

    /// Value for the `--drift` custom property.
    pub fn drift_css(&self) -> String {
        format!("{}px", self.drift_px)
    }
}

/// Replace the contents of `layer` with `count` fresh particles.
/// An absent layer is a no-op.
pub fn generate_field(
    layer: Option<&dyn ParticleLayer>,
    kind: ParticleKind,
    count: usize,
    rng: &mut dyn RandomSource,
) {
    let Some(layer) = layer else { return };
    let particles: Vec<Particle> = (0..count).map(|_| Particle::random(kind, rng)).collect();
    layer.replace_particles(&particles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLayer {
        children: RefCell<Vec<Particle>>,
    }

    impl ParticleLayer for RecordingLayer {
        fn particle_count(&self) -> usize {
            self.children.borrow().len()
        }
        fn replace_particles(&self, particles: &[Particle]) {
            *self.children.borrow_mut() = particles.to_vec();
        }
        fn set_opacity(&self, _opacity: f32) {}
    }

    /// Always returns the same value; used to hit range edges.
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn in_range(r: &Range<f64>, v: f64) -> bool {
        v >= r.start && v < r.end
    }

    #[test]
    fn field_has_exact_count_and_in_range_parameters() {
        let mut rng = Lcg::new(7);
        for kind in [ParticleKind::Dot, ParticleKind::Bar] {
            for count in [0usize, 1, 28, 60, 200] {
                let layer = RecordingLayer::default();
                generate_field(Some(&layer), kind, count, &mut rng);
                let children = layer.children.borrow();
                assert_eq!(children.len(), count);
                for p in children.iter() {
                    assert_eq!(p.kind, kind);
                    assert!((0.0..100.0).contains(&p.left_pct), "left {}", p.left_pct);
                    assert!(in_range(&kind.duration_range(), p.duration_s), "duration {}", p.duration_s);
                    assert!(in_range(&DELAY_RANGE_S, p.delay_s), "delay {}", p.delay_s);
                    assert!(in_range(&DRIFT_RANGE_PX, p.drift_px), "drift {}", p.drift_px);
                }
            }
        }
    }

    #[test]
    fn regeneration_replaces_instead_of_appending() {
        let mut rng = Lcg::default();
        let layer = RecordingLayer::default();
        generate_field(Some(&layer), ParticleKind::Dot, 60, &mut rng);
        generate_field(Some(&layer), ParticleKind::Dot, 30, &mut rng);
        assert_eq!(layer.particle_count(), 30);
    }

    #[test]
    fn missing_layer_is_a_no_op() {
        let mut rng = Lcg::default();
        generate_field(None, ParticleKind::Bar, 10, &mut rng);
    }

    #[test]
    fn range_edges_follow_kind() {
        let low = Particle::random(ParticleKind::Dot, &mut Fixed(0.0));
        assert_eq!(low.duration_s, 6.0);
        assert_eq!(low.drift_px, -20.0);
        assert_eq!(low.left_pct, 0.0);

        let high = Particle::random(ParticleKind::Bar, &mut Fixed(0.999_999));
        assert!(high.duration_s < 8.0 && high.duration_s > 7.99);
        assert!(high.delay_s < 4.0);
        assert!(high.drift_px < 20.0);
    }

    #[test]
    fn css_strings() {
        let p = Particle {
            kind: ParticleKind::Bar,
            left_pct: 12.5,
            duration_s: 4.0,
            delay_s: 0.5,
            drift_px: -3.25,
        };
        assert_eq!(p.left_css(), "12.5%");
        assert_eq!(p.animation_css(), "floatUp 4s linear 0.5s infinite");
        assert_eq!(p.drift_css(), "-3.25px");
        assert_eq!(p.kind.class_name(), "particle particle-bar");
    }

    #[test]
    fn lcg_stays_in_unit_interval() {
        let mut rng = Lcg::new(u64::MAX);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}

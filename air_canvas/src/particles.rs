//! Celebration particles for gesture-change bursts.
//!
//! Purely cosmetic: Euler integration with a gentle downward drift and a
//! linear alpha fade over each particle's lifetime. The live set is hard
//! capped; when a burst would exceed the cap (or the cap shrinks under
//! low-performance mode) the oldest particles are evicted first.

use crate::surface::Frame;

const SPEED_MIN: f32 = 40.0; // px/s
const SPEED_MAX: f32 = 140.0;
const LIFETIME_MIN_MS: f64 = 350.0;
const LIFETIME_MAX_MS: f64 = 900.0;
const SIZE_MIN: f32 = 1.5;
const SIZE_MAX: f32 = 4.0;
const DRIFT_PX_PER_S: f32 = 20.0; // downward pull

// ════════════════════════════════════════════════════════════════════════════
// XorShift — tiny deterministic RNG, no external crate
// ════════════════════════════════════════════════════════════════════════════

struct XorShift {
    state: u32,
}

impl XorShift {
    fn new(seed: u32) -> Self {
        XorShift {
            state: if seed == 0 { 0x9E3779B9 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    birth_ms: f64,
    last_ms: f64,
    lifetime_ms: f64,
    color: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleField
// ════════════════════════════════════════════════════════════════════════════

pub struct ParticleField {
    particles: Vec<Particle>,
    rng: XorShift,
}

impl ParticleField {
    pub fn new(seed: u32) -> Self {
        ParticleField {
            particles: Vec::new(),
            rng: XorShift::new(seed),
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Spawn `count` particles radiating from (x, y). `cap` is the current
    /// live-set limit; oldest particles are evicted to make room.
    pub fn burst(&mut self, x: f32, y: f32, count: usize, color: u32, now_ms: f64, cap: usize) {
        for _ in 0..count {
            let theta = self.rng.range(0.0, std::f32::consts::TAU);
            let speed = self.rng.range(SPEED_MIN, SPEED_MAX);
            let lifetime = self.rng.range(LIFETIME_MIN_MS as f32, LIFETIME_MAX_MS as f32) as f64;
            self.particles.push(Particle {
                x,
                y,
                vx: theta.cos() * speed,
                vy: theta.sin() * speed,
                size: self.rng.range(SIZE_MIN, SIZE_MAX),
                birth_ms: now_ms,
                last_ms: now_ms,
                lifetime_ms: lifetime,
                color,
            });
        }
        self.enforce_cap(cap);
    }

    /// The cap can shrink between bursts (low-performance mode); apply it
    /// unconditionally, oldest-first. Spawn order is age order: bursts
    /// append and expiry removal is order-preserving.
    fn enforce_cap(&mut self, cap: usize) {
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(0..excess);
        }
    }

    /// Advance physics, drop expired particles, and paint survivors.
    pub fn step_and_render(&mut self, frame: &mut Frame, now_ms: f64, cap: usize) {
        self.enforce_cap(cap);
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            let age = now_ms - p.birth_ms;
            if age >= p.lifetime_ms {
                // Ordered removal: the vec must stay age-sorted or the
                // cap would evict the wrong particles.
                self.particles.remove(i);
                continue;
            }
            let dt = ((now_ms - p.last_ms) / 1000.0).max(0.0) as f32;
            p.last_ms = now_ms;
            p.vy += DRIFT_PX_PER_S * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;

            let alpha = 1.0 - (age / p.lifetime_ms) as f32;
            frame.fill_disc(p.x, p.y, p.size, p.color, alpha);
            i += 1;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_requested_count() {
        let mut field = ParticleField::new(7);
        field.burst(100.0, 100.0, 18, 0xFF3B82F6, 0.0, 300);
        assert_eq!(field.live_count(), 18);
    }

    #[test]
    fn cap_evicts_oldest_first() {
        let mut field = ParticleField::new(7);
        // Fill to the cap, then ask for 50 more
        for i in 0..300 {
            field.burst(0.0, 0.0, 1, 0xFFFFFFFF, i as f64, 300);
        }
        field.burst(0.0, 0.0, 50, 0xFFFFFFFF, 1000.0, 300);
        assert_eq!(field.live_count(), 300);
        // The 50 oldest (births 0..49) are gone; birth 50 survives
        assert!((field.particles[0].birth_ms - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shrunken_cap_applies_on_step() {
        let mut field = ParticleField::new(7);
        field.burst(50.0, 50.0, 200, 0xFFFFFFFF, 0.0, 300);
        let mut frame = Frame::new(4, 4);
        field.step_and_render(&mut frame, 1.0, 80);
        assert!(field.live_count() <= 80);
    }

    #[test]
    fn particles_expire() {
        let mut field = ParticleField::new(7);
        field.burst(50.0, 50.0, 10, 0xFFFFFFFF, 0.0, 300);
        let mut frame = Frame::new(4, 4);
        // Longest possible lifetime is 900 ms
        field.step_and_render(&mut frame, 901.0, 300);
        assert_eq!(field.live_count(), 0);
    }

    fn still_particle(birth_ms: f64, lifetime_ms: f64) -> Particle {
        Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            size: 2.0,
            birth_ms,
            last_ms: birth_ms,
            lifetime_ms,
            color: 0xFFFFFFFF,
        }
    }

    #[test]
    fn cap_stays_oldest_first_after_partial_expiry() {
        let mut field = ParticleField::new(7);
        // Two generations; two of the old one expire before the cap bites.
        field.particles = vec![
            still_particle(0.0, 500.0),
            still_particle(0.0, 800.0),
            still_particle(0.0, 500.0),
            still_particle(500.0, 800.0),
            still_particle(500.0, 800.0),
        ];
        let mut frame = Frame::new(4, 4);
        field.step_and_render(&mut frame, 600.0, 300);
        assert_eq!(field.live_count(), 3);

        // Cap shrinks by one: the birth-0 survivor goes, never a birth-500
        field.step_and_render(&mut frame, 601.0, 2);
        assert_eq!(field.live_count(), 2);
        assert!(field.particles.iter().all(|p| p.birth_ms == 500.0));
    }

    #[test]
    fn equal_seeds_burst_identically() {
        let mut a = ParticleField::new(42);
        let mut b = ParticleField::new(42);
        a.burst(10.0, 10.0, 25, 0xFFFFFFFF, 0.0, 300);
        b.burst(10.0, 10.0, 25, 0xFFFFFFFF, 0.0, 300);
        for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
            assert_eq!(pa.vx, pb.vx);
            assert_eq!(pa.vy, pb.vy);
            assert_eq!(pa.lifetime_ms, pb.lifetime_ms);
        }
    }

    #[test]
    fn gravity_pulls_down() {
        let mut field = ParticleField::new(7);
        field.burst(50.0, 50.0, 30, 0xFFFFFFFF, 0.0, 300);
        let before: Vec<f32> = field.particles.iter().map(|p| p.vy).collect();
        let mut frame = Frame::new(4, 4);
        field.step_and_render(&mut frame, 100.0, 300);
        for (p, vy0) in field.particles.iter().zip(before) {
            assert!(p.vy > vy0);
        }
    }
}

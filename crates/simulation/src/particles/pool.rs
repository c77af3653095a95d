//! Fixed-capacity, depth-ordered particle arena.
//!
//! The live particles always occupy the contiguous prefix `[0, live)` of the
//! slot array, sorted by non-increasing Z. New particles are inserted at
//! their sorted position with a bounded linear scan and a tail shift, and
//! dead particles are spliced out by shifting the tail down, so the prefix
//! can be streamed straight into a per-instance buffer in painter's order
//! without a per-frame sort pass.

use bevy::prelude::*;
use rand::Rng;

use super::EmitterParams;

/// One simulation slot. Slots past the live prefix are dead scratch space.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub colour: Vec4,
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            colour: Vec4::ONE,
            alive: false,
        }
    }
}

/// Which side of a horizontal plane kills a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CullPlane {
    /// Dead once `position.y` drops below the plane (rain, snow, dust).
    Below(f32),
    /// Dead once `position.y` reaches the plane (rising fire embers).
    Above(f32),
}

impl CullPlane {
    fn claims(self, position: Vec3) -> bool {
        match self {
            CullPlane::Below(y) => position.y < y,
            CullPlane::Above(y) => position.y >= y,
        }
    }
}

pub struct ParticlePool {
    slots: Vec<Particle>,
    live: usize,
    emit_timer: f32,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            live: 0,
            emit_timer: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// The live prefix, in render order.
    pub fn particles(&self) -> &[Particle] {
        &self.slots[..self.live]
    }

    /// Lazy, restartable, side-effect-free view of the live positions in
    /// array order, for the per-instance upload.
    pub fn snapshot(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.slots[..self.live].iter().map(|p| p.position)
    }

    /// Drop every particle and rearm the emission timer.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.alive = false;
        }
        self.live = 0;
        self.emit_timer = 0.0;
    }

    /// Rate-limited emission. Accumulates `dt` into the emission timer;
    /// once the timer reaches one emission interval it resets to zero and,
    /// capacity permitting, a single jittered particle is inserted at its
    /// depth-sorted position. A full pool swallows the emission silently:
    /// that is admission control, not an error. One slot of headroom is
    /// always kept, so the live count never reaches `capacity`.
    pub fn emit(
        &mut self,
        params: &EmitterParams,
        origin: Vec3,
        rng: &mut impl Rng,
        dt: f32,
    ) -> bool {
        self.emit_timer += dt;
        if self.emit_timer < params.emit_interval() {
            return false;
        }
        self.emit_timer = 0.0;

        if self.live + 1 >= self.capacity() {
            return false;
        }

        let particle = Particle {
            position: origin + symmetric_jitter(rng, params.spawn_jitter),
            velocity: params.base_velocity + symmetric_jitter(rng, params.velocity_jitter),
            colour: params.colour,
            alive: true,
        };
        self.insert_sorted(particle);
        true
    }

    /// Linear scan from the front for the first slot with a smaller Z, then
    /// shift the tail back one slot to open the insertion point.
    fn insert_sorted(&mut self, particle: Particle) {
        let mut index = 0;
        while index < self.live && self.slots[index].position.z >= particle.position.z {
            index += 1;
        }

        let mut j = self.live;
        while j > index {
            self.slots[j] = self.slots[j - 1];
            j -= 1;
        }

        self.slots[index] = particle;
        self.live += 1;
    }

    /// Advance kinematics. No collision detection; unbounded free-fall.
    pub fn integrate(&mut self, dt: f32) {
        for particle in &mut self.slots[..self.live] {
            particle.position += particle.velocity * dt;
        }
    }

    /// Reap every particle past the cull plane, splicing each one out by
    /// shifting all subsequent slots down one. Survivors keep their
    /// relative order and the live prefix stays gap-free.
    pub fn kill(&mut self, plane: CullPlane) {
        let mut index = 0;
        while index < self.live {
            if plane.claims(self.slots[index].position) {
                for j in index..self.slots.len() - 1 {
                    self.slots[j] = self.slots[j + 1];
                }
                if let Some(last) = self.slots.last_mut() {
                    last.alive = false;
                }
                self.live -= 1;
            } else {
                index += 1;
            }
        }
    }
}

/// Per-axis symmetric jitter: a difference of two uniforms scaled by the
/// amplitude, giving a triangular distribution centred at zero.
pub(crate) fn symmetric_jitter(rng: &mut impl Rng, amplitude: Vec3) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - rng.gen::<f32>()) * amplitude.x,
        (rng.gen::<f32>() - rng.gen::<f32>()) * amplitude.y,
        (rng.gen::<f32>() - rng.gen::<f32>()) * amplitude.z,
    )
}

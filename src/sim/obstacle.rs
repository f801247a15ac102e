//! Pipe pairs and the timed stream that spawns and prunes them
//!
//! A pair is an upper pipe hanging from the ceiling and a lower pipe standing
//! on the ground line, with a fixed-height gap between them at a random
//! vertical offset.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{BodyId, KinematicBody, Segment};
use super::present::Presenter;
use crate::layout::{ConfigError, Layout};
use crate::tuning::Tuning;

/// Vertical bounds for the gap of every pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRange {
    /// Ground line; pipes span `[0, ground_top]`
    pub ground_top: f32,
    /// Clearance between the two pipes
    pub gap_height: f32,
    /// Shortest pipe segment allowed
    pub min_height: f32,
}

impl GapRange {
    /// Fails unless two minimum-height pipes and the gap fit above the ground
    pub fn new(ground_top: f32, gap_height: f32, min_height: f32) -> Result<Self, ConfigError> {
        let spans = [
            ("ground_top", ground_top),
            ("gap_height", gap_height),
            ("min_pipe_height", min_height),
        ];
        for (field, value) in spans {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        let required = 2.0 * min_height + gap_height;
        if ground_top < required {
            return Err(ConfigError::GapTooTall {
                ground_top,
                required,
            });
        }
        Ok(Self {
            ground_top,
            gap_height,
            min_height,
        })
    }

    /// Smallest gap offset (upper pipe height)
    #[inline]
    pub fn min_gap_top(&self) -> f32 {
        self.min_height
    }

    /// Largest gap offset that still leaves a minimum-height lower pipe
    #[inline]
    pub fn max_gap_top(&self) -> f32 {
        self.ground_top - self.min_height - self.gap_height
    }

    /// Draw a whole-pixel gap offset uniformly from `[min_gap_top, max_gap_top]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        let lo = self.min_gap_top().ceil();
        let hi = self.max_gap_top().floor();
        if hi < lo {
            // Less than a pixel of play; the only valid offset is the minimum
            return self.min_gap_top();
        }
        rng.random_range(lo as u32..=hi as u32) as f32
    }
}

/// Fixed parameters shared by every pair of a stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairTemplate {
    pub gap: GapRange,
    pub pipe_width: f32,
    /// Horizontal speed (pixels/s, negative scrolls left)
    pub speed: f32,
    /// Left position of freshly spawned pipes (playfield right edge)
    pub spawn_left: f32,
}

impl PairTemplate {
    pub fn new(layout: &Layout, tuning: &Tuning) -> Result<Self, ConfigError> {
        Ok(Self {
            gap: GapRange::new(layout.land_top, tuning.gap_height, tuning.min_pipe_height)?,
            pipe_width: tuning.pipe_width,
            speed: tuning.pipe_speed,
            spawn_left: layout.playfield.x,
        })
    }
}

/// An upper and a lower pipe moving in lockstep
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub id: u32,
    pub upper: KinematicBody,
    pub lower: KinematicBody,
}

impl ObstaclePair {
    /// Build a pair whose upper pipe is `gap_offset` tall
    pub fn with_offset(id: u32, template: &PairTemplate, gap_offset: f32) -> Self {
        let ground_top = template.gap.ground_top;
        let lower_height = ground_top - gap_offset - template.gap.gap_height;
        let vel = Vec2::new(template.speed, 0.0);

        let upper = KinematicBody::new(
            BodyId::Pipe {
                pair: id,
                segment: Segment::Upper,
            },
            Vec2::new(template.pipe_width, gap_offset),
            Vec2::new(template.spawn_left, 0.0),
            vel,
        );
        let lower = KinematicBody::new(
            BodyId::Pipe {
                pair: id,
                segment: Segment::Lower,
            },
            Vec2::new(template.pipe_width, lower_height),
            Vec2::new(template.spawn_left, ground_top - lower_height),
            vel,
        );

        Self { id, upper, lower }
    }

    /// Build a pair with a random gap offset
    pub fn random<R: Rng>(id: u32, template: &PairTemplate, rng: &mut R) -> Self {
        Self::with_offset(id, template, template.gap.sample(rng))
    }

    /// Both segments, upper first
    pub fn segments(&self) -> [&KinematicBody; 2] {
        [&self.upper, &self.lower]
    }

    /// True once the pair has fully scrolled past the left edge
    pub fn is_useless(&self) -> bool {
        self.upper.left() < -self.upper.width()
    }

    pub fn advance(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        self.upper.advance(dt, presenter);
        self.lower.advance(dt, presenter);
    }
}

/// Spawns pairs on a timer and drops the ones that scrolled away
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    template: PairTemplate,
    rng: Pcg32,
    /// Active pairs in creation order
    pairs: Vec<ObstaclePair>,
    next_id: u32,
}

impl ObstacleStream {
    pub fn new(template: PairTemplate, seed: u64) -> Self {
        Self {
            template,
            rng: Pcg32::seed_from_u64(seed),
            pairs: Vec::new(),
            next_id: 1,
        }
    }

    pub fn template(&self) -> &PairTemplate {
        &self.template
    }

    /// Active pairs, oldest first
    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append a new random pair at the right edge
    pub fn spawn(&mut self, presenter: &mut dyn Presenter) -> &ObstaclePair {
        let id = self.next_id;
        self.next_id += 1;
        let pair = ObstaclePair::random(id, &self.template, &mut self.rng);
        log::debug!(
            "Spawned pipe pair {} (upper {}px, lower {}px)",
            id,
            pair.upper.height(),
            pair.lower.height()
        );
        presenter.pair_created(&pair);
        self.push(pair);
        &self.pairs[self.pairs.len() - 1]
    }

    /// Append an already-built pair
    pub fn push(&mut self, pair: ObstaclePair) {
        self.next_id = self.next_id.max(pair.id + 1);
        self.pairs.push(pair);
    }

    /// Remove every useless pair in one pass, keeping survivors in order.
    /// Returns how many pairs were removed.
    pub fn prune(&mut self, presenter: &mut dyn Presenter) -> usize {
        let before = self.pairs.len();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pairs)
            .into_iter()
            .partition(ObstaclePair::is_useless);
        self.pairs = kept;

        for pair in &removed {
            presenter.pair_removed(pair);
        }
        if !removed.is_empty() {
            log::debug!("Pruned {} of {} pipe pairs", removed.len(), before);
        }
        removed.len()
    }

    /// Spawn timer callback: one new pair, then prune
    pub fn on_spawn_timer(&mut self, presenter: &mut dyn Presenter) {
        self.spawn(presenter);
        self.prune(presenter);
    }

    /// Move every active pair
    pub fn advance_all(&mut self, dt: f32, presenter: &mut dyn Presenter) {
        for pair in &mut self.pairs {
            pair.advance(dt, presenter);
        }
    }
}

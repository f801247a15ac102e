//! Collision and termination checks
//!
//! Everything is an axis-aligned rectangle, so a hit is a strict overlap of
//! both projections. Touching edges do not count.

use super::avatar::Avatar;
use super::body::KinematicBody;
use super::obstacle::ObstaclePair;

/// Check whether two rectangles overlap
///
/// Compares the distance between centers against the half-extents on each
/// axis, which is the usual AABB test written symmetrically.
pub fn is_hit(a: &KinematicBody, b: &KinematicBody) -> bool {
    let dist = (a.center() - b.center()).abs();
    let reach = (a.size() + b.size()) / 2.0;
    dist.x < reach.x && dist.y < reach.y
}

/// First pipe segment the avatar overlaps, if any
pub fn hit_pipe<'a>(avatar: &Avatar, pairs: &'a [ObstaclePair]) -> Option<&'a KinematicBody> {
    pairs
        .iter()
        .flat_map(|pair| pair.segments())
        .find(|segment| is_hit(&avatar.body, segment))
}

/// The run ends when the avatar touches the ground or any pipe
///
/// Ground contact relies on the avatar's clamp having run earlier in the same
/// tick, which snaps `top` onto `max_top`.
pub fn is_game_over(avatar: &Avatar, pairs: &[ObstaclePair]) -> bool {
    avatar.on_ground() || hit_pipe(avatar, pairs).is_some()
}

//! One-shot rotation tweens fired when a section scrolls into view.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{SECTION_TWEEN_DELTA, SECTION_TWEEN_DURATION_SEC};
use crate::scene::{NodeId, Scene, SceneError};

/// Cubic ease-in-out (the `power2.inOut` curve); `t` is clamped to \[0, 1\].
pub fn power2_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Additive rotation tween on one node.
///
/// Every step adds the eased increment since the previous step, so the tween
/// stacks on top of whatever else rotates the node.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationTween {
    pub target: NodeId,
    pub delta: Vec3,
    pub duration_sec: f32,
    elapsed_sec: f32,
    applied: Vec3,
}

impl RotationTween {
    pub fn new(target: NodeId, delta: Vec3, duration_sec: f32) -> Self {
        Self {
            target,
            delta,
            duration_sec,
            elapsed_sec: 0.0,
            applied: Vec3::ZERO,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_sec >= self.duration_sec
    }

    /// Advance by `dt_sec` and return the rotation to add this step.
    pub fn step(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed_sec += dt_sec.max(0.0);
        let progress = if self.duration_sec > 0.0 {
            self.elapsed_sec / self.duration_sec
        } else {
            1.0
        };
        let total = self.delta * power2_in_out(progress);
        let increment = total - self.applied;
        self.applied = total;
        increment
    }
}

/// Runs section-change tweens.
#[derive(Debug, Default)]
pub struct SectionAnimator {
    tweens: SmallVec<[RotationTween; 4]>,
}

impl SectionAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spin the entering section's node by the standard delta.
    pub fn section_entered(&mut self, node: NodeId) {
        self.start(RotationTween::new(
            node,
            SECTION_TWEEN_DELTA,
            SECTION_TWEEN_DURATION_SEC,
        ));
    }

    pub fn start(&mut self, tween: RotationTween) {
        log::debug!("[section] spin node {:?} by {:?}", tween.target, tween.delta);
        self.tweens.push(tween);
    }

    pub fn active(&self) -> usize {
        self.tweens.len()
    }

    /// Step every tween, apply its increment, drop finished ones.
    ///
    /// A tween whose node is missing still runs to completion; the first such
    /// error is returned after every other tween has been applied.
    pub fn advance(&mut self, dt_sec: f32, scene: &mut Scene) -> Result<(), SceneError> {
        let mut first_err = None;
        for tween in &mut self.tweens {
            let increment = tween.step(dt_sec);
            match scene.transform_mut(tween.target) {
                Ok(t) => t.rotation += increment,
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        self.tweens.retain(|t| !t.is_complete());
        first_err.map_or(Ok(()), Err)
    }
}

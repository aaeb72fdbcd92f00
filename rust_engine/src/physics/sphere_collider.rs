//! 球体碰撞体

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::collider::Contact;
use super::debug::{DebugLineKind, DebugSink};
use crate::skeleton::BoneTransform;

/// 质点与碰撞体中心重合时的推出方向
pub(crate) const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// 球体碰撞体
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereCollider {
    radius: f32,
}

impl SphereCollider {
    /// 负半径按 0 处理
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn detect(
        &self,
        pose: &BoneTransform,
        probe_radius: f32,
        probe_center: Vec3,
        debug: &mut dyn DebugSink,
    ) -> Contact {
        push_out(
            pose.translation,
            self.radius,
            probe_radius,
            probe_center,
            FALLBACK_DIRECTION,
            debug,
        )
    }
}

impl Default for SphereCollider {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// 球-球推出
///
/// 两球半径之和大于中心距离时，把探测球沿分离方向推到恰好相切。
/// 中心重合时沿 `fallback` 推出。
pub(crate) fn push_out(
    center: Vec3,
    radius: f32,
    probe_radius: f32,
    probe_center: Vec3,
    fallback: Vec3,
    debug: &mut dyn DebugSink,
) -> Contact {
    let offset = probe_center - center;
    let sum_radius = probe_radius + radius;
    if sum_radius > offset.length() {
        let direction = offset.try_normalize().unwrap_or(fallback);
        let adjusted = center + direction * sum_radius;
        debug.line(center, adjusted, DebugLineKind::CollisionPush);
        Contact::pushed(adjusted)
    } else {
        Contact::missed(probe_center)
    }
}

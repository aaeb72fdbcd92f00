//! 胶囊碰撞体
//!
//! 两端球体半径可以不同（A 端在 +height/2，B 端在 -height/2），
//! 中间按投影比例线性插值半径。

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::collider::Contact;
use super::debug::DebugSink;
use super::sphere_collider::push_out;
use crate::skeleton::BoneTransform;

/// 胶囊轴向（本地空间）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapsuleAxis {
    X,
    #[default]
    Y,
    Z,
}

impl CapsuleAxis {
    pub fn unit(self) -> Vec3 {
        match self {
            CapsuleAxis::X => Vec3::X,
            CapsuleAxis::Y => Vec3::Y,
            CapsuleAxis::Z => Vec3::Z,
        }
    }
}

/// 胶囊碰撞体
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapsuleCollider {
    radius_a: f32,
    radius_b: f32,
    height: f32,
    axis: CapsuleAxis,
}

impl Default for CapsuleCollider {
    fn default() -> Self {
        Self {
            radius_a: 0.5,
            radius_b: 0.5,
            height: 1.0,
            axis: CapsuleAxis::Y,
        }
    }
}

impl CapsuleCollider {
    /// 负的半径和高度按 0 处理
    pub fn new(radius_a: f32, radius_b: f32, height: f32, axis: CapsuleAxis) -> Self {
        Self {
            radius_a: radius_a.max(0.0),
            radius_b: radius_b.max(0.0),
            height: height.max(0.0),
            axis,
        }
    }

    pub fn radius_a(&self) -> f32 {
        self.radius_a
    }

    pub fn radius_b(&self) -> f32 {
        self.radius_b
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn axis(&self) -> CapsuleAxis {
        self.axis
    }

    /// 两端球心的世界坐标 (tip_a, tip_b)
    pub fn tips(&self, pose: &BoneTransform) -> (Vec3, Vec3) {
        let local_a = self.axis.unit() * (self.height * 0.5);
        (pose.transform_point(local_a), pose.transform_point(-local_a))
    }

    /// 探测点在 tip_a→tip_b 上的投影比例（0 在 tip_a，1 在 tip_b，可超出 [0, 1]）
    /// 以及投影点
    pub fn project(&self, pose: &BoneTransform, point: Vec3) -> (f32, Vec3) {
        let (tip_a, tip_b) = self.tips(pose);
        let segment = tip_b - tip_a;
        let length = segment.length();
        if length <= f32::EPSILON {
            return (0.0, tip_a);
        }
        let direction = segment / length;
        let near_length = direction.dot(point - tip_a);
        (near_length / length, tip_a + direction * near_length)
    }

    pub fn detect(
        &self,
        pose: &BoneTransform,
        probe_radius: f32,
        probe_center: Vec3,
        debug: &mut dyn DebugSink,
    ) -> Contact {
        let (tip_a, tip_b) = self.tips(pose);
        let (ratio, near) = self.project(pose, probe_center);

        let (center, radius) = if ratio > 1.0 {
            (tip_b, self.radius_b)
        } else if ratio < 0.0 {
            (tip_a, self.radius_a)
        } else {
            (near, self.radius_a + (self.radius_b - self.radius_a) * ratio)
        };

        // 探测点落在轴线上时沿垂直于轴的方向推出
        let fallback = pose.rotation * self.axis.unit().any_orthonormal_vector();
        push_out(center, radius, probe_radius, probe_center, fallback, debug)
    }
}

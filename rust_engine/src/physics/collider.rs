//! 碰撞体
//!
//! 碰撞体绑定到场景图节点，每次查询时读取节点的世界位置和旋转。
//! 模拟过程中碰撞体只读，不保存跨帧状态。

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::capsule_collider::{CapsuleAxis, CapsuleCollider};
use super::debug::DebugSink;
use super::sphere_collider::SphereCollider;
use crate::skeleton::{BoneTransform, SceneGraph};

/// 碰撞检测结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// 调整后的探测球中心（未碰撞时等于输入）
    pub center: Vec3,
    pub collided: bool,
}

impl Contact {
    pub fn pushed(center: Vec3) -> Self {
        Self { center, collided: true }
    }

    pub fn missed(center: Vec3) -> Self {
        Self { center, collided: false }
    }
}

/// 碰撞体形状
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColliderShape {
    Sphere(SphereCollider),
    Capsule(CapsuleCollider),
}

impl ColliderShape {
    pub fn sphere(radius: f32) -> Self {
        ColliderShape::Sphere(SphereCollider::new(radius))
    }

    pub fn capsule(radius_a: f32, radius_b: f32, height: f32, axis: CapsuleAxis) -> Self {
        ColliderShape::Capsule(CapsuleCollider::new(radius_a, radius_b, height, axis))
    }

    /// 在给定世界姿势下检测
    pub fn detect_at(
        &self,
        pose: &BoneTransform,
        probe_radius: f32,
        probe_center: Vec3,
        debug: &mut dyn DebugSink,
    ) -> Contact {
        match self {
            ColliderShape::Sphere(sphere) => sphere.detect(pose, probe_radius, probe_center, debug),
            ColliderShape::Capsule(capsule) => capsule.detect(pose, probe_radius, probe_center, debug),
        }
    }
}

/// 绑定到节点的碰撞体
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collider {
    /// 决定碰撞体位置和朝向的节点
    pub node: usize,
    pub shape: ColliderShape,
}

impl Collider {
    pub fn new(node: usize, shape: ColliderShape) -> Self {
        Self { node, shape }
    }

    pub fn sphere(node: usize, radius: f32) -> Self {
        Self::new(node, ColliderShape::sphere(radius))
    }

    pub fn capsule(node: usize, radius_a: f32, radius_b: f32, height: f32, axis: CapsuleAxis) -> Self {
        Self::new(node, ColliderShape::capsule(radius_a, radius_b, height, axis))
    }

    /// 当前帧节点的世界姿势
    pub fn pose<S: SceneGraph + ?Sized>(&self, graph: &S) -> BoneTransform {
        BoneTransform::new(graph.world_position(self.node), graph.world_rotation(self.node))
    }

    /// 检测以 `probe_center` 为中心、`probe_radius` 为半径的球是否与此碰撞体相交，
    /// 相交时返回推出到表面后的中心
    pub fn detect<S: SceneGraph + ?Sized>(
        &self,
        graph: &S,
        probe_radius: f32,
        probe_center: Vec3,
        debug: &mut dyn DebugSink,
    ) -> Contact {
        self.shape.detect_at(&self.pose(graph), probe_radius, probe_center, debug)
    }
}

//! 骨骼节点

use glam::{Quat, Vec3};

use super::BoneTransform;

/// 骨骼节点
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent_index: i32,

    // 相对于父骨骼的平移和旋转
    pub local_translation: Vec3,
    pub local_rotation: Quat,

    // 变换结果（由 BoneManager 维护）
    pub global_transform: BoneTransform,
}

impl Bone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_index: -1,
            local_translation: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
            global_transform: BoneTransform::default(),
        }
    }

    /// 设置父骨骼
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent_index = parent as i32;
        self
    }

    /// 设置本地平移（即骨骼相对父骨骼的偏移）
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local_translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local_rotation = rotation;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_index < 0
    }

    pub fn local_transform(&self) -> BoneTransform {
        BoneTransform::new(self.local_translation, self.local_rotation)
    }

    pub fn world_position(&self) -> Vec3 {
        self.global_transform.translation
    }

    pub fn world_rotation(&self) -> Quat {
        self.global_transform.rotation
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::new(String::new())
    }
}

//! 骨骼管理器

use glam::{Mat4, Quat, Vec3};
use std::collections::HashMap;

use super::{Bone, BoneTransform, SceneGraph};
use crate::{DynamicsError, Result};

/// 骨骼管理器
///
/// 骨骼按添加顺序存储，父骨骼必须先于子骨骼添加，
/// 因此索引顺序本身就是从根到叶的拓扑顺序。
pub struct BoneManager {
    bones: Vec<Bone>,
    name_to_index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
}

impl BoneManager {
    pub fn new() -> Self {
        Self {
            bones: Vec::new(),
            name_to_index: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// 添加骨骼，返回其索引
    pub fn add_bone(&mut self, mut bone: Bone) -> Result<usize> {
        let index = self.bones.len();
        let parent = bone.parent_index;
        if parent >= 0 && parent as usize >= index {
            return Err(DynamicsError::InvalidParent { child: index, parent });
        }

        bone.global_transform = if parent >= 0 {
            self.bones[parent as usize]
                .global_transform
                .mul_transform(&bone.local_transform())
        } else {
            bone.local_transform()
        };

        if parent >= 0 {
            self.children[parent as usize].push(index);
        }
        self.name_to_index.insert(bone.name.clone(), index);
        self.bones.push(bone);
        self.children.push(Vec::new());
        Ok(index)
    }

    /// 通过名称查找骨骼
    pub fn find_bone_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// 获取骨骼数量
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// 获取骨骼
    pub fn get_bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// 直接子骨骼（按添加顺序）
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 所有根骨骼
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, bone)| bone.is_root())
            .map(|(i, _)| i)
    }

    /// 获取全局变换
    pub fn get_global_transform(&self, index: usize) -> BoneTransform {
        self.bones
            .get(index)
            .map(|b| b.global_transform)
            .unwrap_or_default()
    }

    /// 获取全局变换矩阵（供渲染使用）
    pub fn get_global_matrix(&self, index: usize) -> Mat4 {
        self.get_global_transform(index).to_matrix()
    }

    /// 设置本地平移并更新子骨骼
    pub fn set_local_translation(&mut self, index: usize, translation: Vec3) {
        if index >= self.bones.len() {
            return;
        }
        self.bones[index].local_translation = translation;
        self.update_global_transform_recursive(index);
    }

    /// 设置本地旋转并更新子骨骼
    pub fn set_local_rotation(&mut self, index: usize, rotation: Quat) {
        if index >= self.bones.len() {
            return;
        }
        self.bones[index].local_rotation = rotation;
        self.update_global_transform_recursive(index);
    }

    /// 设置世界旋转
    /// 反推本地旋转：local = inverse(parent_world) * world
    pub fn set_world_rotation(&mut self, index: usize, rotation: Quat) {
        if index >= self.bones.len() {
            return;
        }
        let parent_idx = self.bones[index].parent_index;
        let local = if parent_idx >= 0 {
            self.bones[parent_idx as usize].world_rotation().inverse() * rotation
        } else {
            rotation
        };
        self.bones[index].local_rotation = local.normalize();
        self.update_global_transform_recursive(index);
    }

    fn update_single_global(&mut self, index: usize) {
        let parent_idx = self.bones[index].parent_index;
        let local = self.bones[index].local_transform();
        self.bones[index].global_transform = if parent_idx >= 0 {
            self.bones[parent_idx as usize].global_transform.mul_transform(&local)
        } else {
            local
        };
    }

    /// 递归更新骨骼及其子骨骼的全局变换
    fn update_global_transform_recursive(&mut self, index: usize) {
        self.update_single_global(index);

        for i in 0..self.children[index].len() {
            let child_idx = self.children[index][i];
            self.update_global_transform_recursive(child_idx);
        }
    }
}

impl Default for BoneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for BoneManager {
    fn node_count(&self) -> usize {
        self.bones.len()
    }

    fn parent_of(&self, node: usize) -> Option<usize> {
        self.bones
            .get(node)
            .filter(|b| !b.is_root())
            .map(|b| b.parent_index as usize)
    }

    fn first_child(&self, node: usize) -> Option<usize> {
        self.children(node).first().copied()
    }

    fn world_position(&self, node: usize) -> Vec3 {
        self.get_global_transform(node).translation
    }

    fn world_rotation(&self, node: usize) -> Quat {
        self.get_global_transform(node).rotation
    }

    fn local_position(&self, node: usize) -> Vec3 {
        self.bones.get(node).map(|b| b.local_translation).unwrap_or(Vec3::ZERO)
    }

    fn local_rotation(&self, node: usize) -> Quat {
        self.bones.get(node).map(|b| b.local_rotation).unwrap_or(Quat::IDENTITY)
    }

    fn set_local_rotation(&mut self, node: usize, rotation: Quat) {
        BoneManager::set_local_rotation(self, node, rotation);
    }

    fn set_world_rotation(&mut self, node: usize, rotation: Quat) {
        BoneManager::set_world_rotation(self, node, rotation);
    }
}

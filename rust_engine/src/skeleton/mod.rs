//! 骨骼层级（场景图）

mod bone;
mod manager;

pub use bone::Bone;
pub use manager::BoneManager;

use glam::{Mat4, Quat, Vec3};

/// 骨骼变换数据（无缩放）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl BoneTransform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// 父变换 * 子本地变换
    pub fn mul_transform(&self, local: &BoneTransform) -> BoneTransform {
        BoneTransform {
            translation: self.translation + self.rotation * local.translation,
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// 把本地空间中的点变换到此变换所在空间
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }
}

/// 模拟核心所需的场景图接口
///
/// 节点用 `usize` 索引标识。写入旋转后，实现方必须立即更新该节点
/// 所有子孙节点的世界变换，后续读取才能看到新的姿势。
pub trait SceneGraph {
    fn node_count(&self) -> usize;

    fn contains(&self, node: usize) -> bool {
        node < self.node_count()
    }

    fn parent_of(&self, node: usize) -> Option<usize>;

    /// 第一个子节点（按添加顺序）
    fn first_child(&self, node: usize) -> Option<usize>;

    fn world_position(&self, node: usize) -> Vec3;

    fn world_rotation(&self, node: usize) -> Quat;

    /// 相对父节点的平移
    fn local_position(&self, node: usize) -> Vec3;

    fn local_rotation(&self, node: usize) -> Quat;

    fn set_local_rotation(&mut self, node: usize, rotation: Quat);

    fn set_world_rotation(&mut self, node: usize, rotation: Quat);
}

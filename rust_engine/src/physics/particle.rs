//! 质点

use glam::{Quat, Vec3};

/// 骨长为零时 KeepLength 使用的方向
const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// 质点地址：第几条根骨骼链、链上深度（从 1 开始）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParticleAddress {
    pub chain: usize,
    pub depth: u32,
}

/// 绑定在骨骼末端的质点
#[derive(Clone, Debug)]
pub struct Particle {
    pub address: ParticleAddress,
    /// 质点代表的骨骼末端节点
    pub node: usize,
    /// 父节点，模拟结果写入它的旋转
    pub parent: usize,
    /// 初始化时父节点的本地旋转，每帧先恢复再施加新的旋转
    pub parent_rest_local_rotation: Quat,
    /// 初始化时末端相对父节点的本地偏移，长度即骨长
    pub rest_local_offset: Vec3,
    /// `rest_local_offset` 的长度
    pub bone_length: f32,

    // 模拟状态（世界空间）
    pub current_position: Vec3,
    pub next_position: Vec3,
    pub velocity: Vec3,

    // 每次参数刷新时从配置派生
    pub damping: f32,
    pub elasticity: f32,
    pub radius: f32,
}

impl Particle {
    pub fn new(
        address: ParticleAddress,
        node: usize,
        parent: usize,
        parent_rest_local_rotation: Quat,
        rest_local_offset: Vec3,
        world_position: Vec3,
    ) -> Self {
        Self {
            address,
            node,
            parent,
            parent_rest_local_rotation,
            rest_local_offset,
            bone_length: rest_local_offset.length(),
            current_position: world_position,
            next_position: world_position,
            velocity: Vec3::ZERO,
            damping: 0.0,
            elasticity: 0.0,
            radius: 0.0,
        }
    }

    /// 把 next_position 投影回以父节点为中心、骨长为半径的球面上
    pub fn keep_length(&mut self, parent_position: Vec3) {
        let direction = (self.next_position - parent_position)
            .try_normalize()
            .unwrap_or(FALLBACK_DIRECTION);
        self.next_position = parent_position + direction * self.bone_length;
    }

    /// 回到给定位置并清零速度
    pub fn reset_to(&mut self, world_position: Vec3) {
        self.current_position = world_position;
        self.next_position = world_position;
        self.velocity = Vec3::ZERO;
    }

    pub fn is_degenerate(&self) -> bool {
        self.bone_length <= f32::EPSILON
    }
}

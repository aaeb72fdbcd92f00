//! 骨骼旋转求解：把质点位移转换成父骨骼的世界旋转

use glam::{Quat, Vec3};

/// 从 `from` 到 `to` 的最短弧旋转（无扭转分量）
///
/// 任一向量长度为零时返回单位旋转。
pub fn shortest_arc(from: Vec3, to: Vec3) -> Quat {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}

/// 求父骨骼新的世界旋转
///
/// `parent_rotation` 是恢复初始本地旋转之后的父骨骼世界旋转，
/// `rest_local_offset` 经它旋转后即初始姿势下的骨骼方向，
/// `tip_offset` 是观测到的末端相对父骨骼的位移。
pub fn solve_parent_rotation(parent_rotation: Quat, rest_local_offset: Vec3, tip_offset: Vec3) -> Quat {
    let rest_direction = parent_rotation * rest_local_offset;
    (shortest_arc(rest_direction, tip_offset) * parent_rotation).normalize()
}

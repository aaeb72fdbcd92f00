//! Bone Dynamics - 骨骼摆动（jiggle）二次运动引擎
//!
//! 提供以下功能：
//! - 从骨骼层级构建质点链（每个骨骼末端一个质点）
//! - 每帧积分：阻尼、重力、弹性回拉、骨长约束
//! - 球体/胶囊体碰撞检测与推出
//! - 将质点位移转换为父骨骼的世界旋转
//!
//! 核心只依赖 [`SceneGraph`] 抽象和每帧的 delta time，
//! [`BoneManager`] 是一个可直接使用的参考实现。

pub mod physics;
pub mod skeleton;

pub use physics::{
    BoneChain, BoneDynamics, CapsuleAxis, CapsuleCollider, Collider, ColliderShape, Contact,
    CurveKey, DebugLine, DebugLineKind, DebugLines, DebugSink, DynamicsConfig, FrameStats,
    NoDebug, Particle, ParticleAddress, RadiusCurve, SphereCollider,
};
pub use skeleton::{Bone, BoneManager, BoneTransform, SceneGraph};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicsError {
    #[error("unknown node index: {0}")]
    UnknownNode(usize),

    #[error("bone {child} has invalid parent {parent} (parents must be added first)")]
    InvalidParent { child: usize, parent: i32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DynamicsError>;

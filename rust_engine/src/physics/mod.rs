//! 骨骼动力学模块
//!
//! 质点链 + Verlet 风格积分，驱动头发、尾巴等骨骼的二次运动。
//!
//! ## 模块结构
//! | 模块 | 职责 |
//! |------|------|
//! | chain | 从根骨骼派生质点链 |
//! | bone_dynamics | 每帧积分、约束、碰撞、写回旋转 |
//! | collider / sphere_collider / capsule_collider | 碰撞检测与推出 |
//! | rotation | 质点位移 → 父骨骼旋转 |
//! | config / curve | 参数与按深度缩放半径的曲线 |

mod bone_dynamics;
mod capsule_collider;
mod chain;
mod collider;
mod debug;
mod particle;
mod sphere_collider;
pub mod config;
pub mod curve;
pub mod rotation;

pub use bone_dynamics::{BoneDynamics, FrameStats};
pub use capsule_collider::{CapsuleAxis, CapsuleCollider};
pub use chain::BoneChain;
pub use collider::{Collider, ColliderShape, Contact};
pub use config::{get_config, reset_config, set_config, DynamicsConfig};
pub use curve::{CurveKey, RadiusCurve};
pub use debug::{DebugLine, DebugLineKind, DebugLines, DebugSink, NoDebug};
pub use particle::{Particle, ParticleAddress};
pub use sphere_collider::SphereCollider;

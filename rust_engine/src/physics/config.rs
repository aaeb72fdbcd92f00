//! 骨骼动力学配置
//!
//! 所有参数扁平化。`BoneDynamics::new()` 从全局默认配置读取，
//! 需要独立参数时使用 `BoneDynamics::with_config`。

use glam::Vec3;
use once_cell::sync::Lazy;
use std::sync::RwLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::curve::RadiusCurve;
use crate::{DynamicsError, Result};

/// 骨骼动力学配置（扁平化，不嵌套）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DynamicsConfig {
    /// 名称，用于日志
    pub label: String,

    // ========== 质点参数 ==========
    /// 速度阻尼 [0, 1]，每帧速度乘以 (1 - damping)，默认 0.1
    pub damping: f32,
    /// 弹性 [0, 10]，每秒向初始姿势回拉的比例，默认 1.0
    pub elasticity: f32,
    /// 质点碰撞半径（>= 0），默认 0.5
    pub base_radius: f32,
    /// 按深度缩放半径的曲线，输入为 depth / max_depth，输出被限制在 [0, 1]
    pub radius_curve: Option<RadiusCurve>,

    // ========== 外力 ==========
    /// 是否启用重力，默认 false
    pub gravity_enabled: bool,
    /// 重力加速度（世界空间），默认 (0, -9.8, 0)
    pub gravity: Vec3,

    // ========== 碰撞 ==========
    /// 碰撞迭代次数 [0, 10]，默认 1
    /// 多个碰撞体重叠时增大此值
    pub collision_iterations: u32,

    // ========== 时间步 ==========
    /// 单帧最大 dt（秒），默认 0.1
    /// 卡顿后的超长帧会被截断，防止质点被甩飞
    pub max_delta_time: f32,

    // ========== 调试 ==========
    /// 是否输出逐帧调试日志，默认 false
    pub debug_log: bool,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            label: String::from("bone_dynamics"),
            damping: 0.1,
            elasticity: 1.0,
            base_radius: 0.5,
            radius_curve: None,
            gravity_enabled: false,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            collision_iterations: 1,
            max_delta_time: 0.1,
            debug_log: false,
        }
    }
}

impl DynamicsConfig {
    pub const MAX_ELASTICITY: f32 = 10.0;
    pub const MAX_COLLISION_ITERATIONS: u32 = 10;

    /// 拒绝 NaN / 无穷大
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("damping", self.damping),
            ("elasticity", self.elasticity),
            ("base_radius", self.base_radius),
            ("max_delta_time", self.max_delta_time),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(DynamicsError::InvalidConfig(format!("{name} is not finite: {value}")));
            }
        }
        if !self.gravity.is_finite() {
            return Err(DynamicsError::InvalidConfig(format!(
                "gravity is not finite: {}",
                self.gravity
            )));
        }
        if let Some(curve) = &self.radius_curve {
            curve.validate()?;
        }
        Ok(())
    }

    /// 把所有参数限制在合法范围内
    pub fn sanitized(mut self) -> Self {
        self.damping = self.damping.clamp(0.0, 1.0);
        self.elasticity = self.elasticity.clamp(0.0, Self::MAX_ELASTICITY);
        self.base_radius = self.base_radius.max(0.0);
        self.collision_iterations = self.collision_iterations.min(Self::MAX_COLLISION_ITERATIONS);
        self.max_delta_time = self.max_delta_time.max(f32::EPSILON);
        self
    }

    /// 质点在给定深度的碰撞半径
    pub fn radius_at(&self, depth: u32, max_depth: u32) -> f32 {
        let ratio = if max_depth > 0 {
            depth as f32 / max_depth as f32
        } else {
            0.0
        };
        match &self.radius_curve {
            Some(curve) if !curve.is_empty() => {
                self.base_radius * curve.evaluate(ratio).clamp(0.0, 1.0)
            }
            _ => self.base_radius,
        }
    }

    /// 实际生效的重力（未启用时为零）
    pub fn effective_gravity(&self) -> Vec3 {
        if self.gravity_enabled {
            self.gravity
        } else {
            Vec3::ZERO
        }
    }
}

/// 全局默认配置
static DYNAMICS_CONFIG: Lazy<RwLock<DynamicsConfig>> =
    Lazy::new(|| RwLock::new(DynamicsConfig::default()));

/// 获取当前默认配置（只读）
pub fn get_config() -> DynamicsConfig {
    match DYNAMICS_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// 手动设置默认配置（用于运行时调试）
///
/// 含 NaN / 无穷大的配置被拒绝，原有默认配置保持不变。
pub fn set_config(config: DynamicsConfig) -> Result<()> {
    config.validate()?;
    store_config(config);
    Ok(())
}

/// 重置为默认配置
pub fn reset_config() {
    store_config(DynamicsConfig::default());
}

fn store_config(config: DynamicsConfig) {
    match DYNAMICS_CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

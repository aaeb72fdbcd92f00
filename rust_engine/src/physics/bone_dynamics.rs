//! 骨骼动力学模拟器
//!
//! 每帧在动画更新之后调用一次 [`BoneDynamics::update`]：
//! 1. 抵消锚点节点的整体平移
//! 2. 逐个质点：阻尼 → 积分 → 骨长约束 → 恢复初始旋转并弹性回拉 → 碰撞 → 写回父骨骼旋转
//!
//! 模拟器独占质点链；场景图中每个父节点只由它对应的质点写入。

use glam::Vec3;

use super::chain::BoneChain;
use super::collider::Collider;
use super::config::{get_config, DynamicsConfig};
use super::debug::{DebugLineKind, DebugSink, NoDebug};
use super::particle::Particle;
use super::rotation::solve_parent_rotation;
use crate::skeleton::SceneGraph;
use crate::{DynamicsError, Result};

/// 骨骼动力学模拟器
pub struct BoneDynamics {
    /// 当前配置（已限制在合法范围内）
    config: DynamicsConfig,
    /// 根骨骼列表，顺序即链索引
    roots: Vec<usize>,
    /// 碰撞体，按注册顺序查询
    colliders: Vec<Collider>,
    /// 抵消平移的锚点节点
    anchor: Option<usize>,
    /// 上一帧锚点的世界位置
    anchor_position: Vec3,
    /// 质点链
    chain: BoneChain,
}

/// 单帧统计
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub particles: usize,
    pub collisions: usize,
    pub anchor_delta: Vec3,
}

impl BoneDynamics {
    /// 使用全局默认配置创建
    pub fn new() -> Self {
        Self::from_sanitized(get_config().sanitized())
    }

    /// 使用指定配置创建
    pub fn with_config(config: DynamicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_sanitized(config.sanitized()))
    }

    fn from_sanitized(config: DynamicsConfig) -> Self {
        Self {
            config,
            roots: Vec::new(),
            colliders: Vec::new(),
            anchor: None,
            anchor_position: Vec3::ZERO,
            chain: BoneChain::default(),
        }
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// 替换配置并刷新质点参数（不重建质点链，模拟状态保留）
    pub fn set_config(&mut self, config: DynamicsConfig) -> Result<()> {
        config.validate()?;
        self.config = config.sanitized();
        self.refresh_particle_params();
        Ok(())
    }

    /// 设置根骨骼并重建质点链
    pub fn set_roots<S: SceneGraph + ?Sized>(&mut self, graph: &S, roots: Vec<usize>) -> Result<()> {
        if let Some(&missing) = roots.iter().find(|&&root| !graph.contains(root)) {
            return Err(DynamicsError::UnknownNode(missing));
        }
        self.roots = roots;
        self.initialize(graph);
        Ok(())
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// 设置（或清除）锚点节点，并以其当前位置作为参考
    pub fn set_anchor<S: SceneGraph + ?Sized>(&mut self, graph: &S, anchor: Option<usize>) -> Result<()> {
        if let Some(node) = anchor {
            if !graph.contains(node) {
                return Err(DynamicsError::UnknownNode(node));
            }
            self.anchor_position = graph.world_position(node);
        }
        self.anchor = anchor;
        Ok(())
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// 注册碰撞体（查询顺序即注册顺序）
    pub fn add_collider<S: SceneGraph + ?Sized>(&mut self, graph: &S, collider: Collider) -> Result<()> {
        if !graph.contains(collider.node) {
            return Err(DynamicsError::UnknownNode(collider.node));
        }
        self.colliders.push(collider);
        Ok(())
    }

    pub fn clear_colliders(&mut self) {
        self.colliders.clear();
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// 重建质点链（层级变化后调用）
    ///
    /// 新链构建完成后整体替换旧链，旧的模拟状态全部丢弃。
    pub fn initialize<S: SceneGraph + ?Sized>(&mut self, graph: &S) {
        let chain = BoneChain::build(graph, &self.roots);
        self.chain = chain;
        self.refresh_particle_params();

        if let Some(anchor) = self.anchor {
            self.anchor_position = graph.world_position(anchor);
        }

        log::info!(
            "[{}] 骨骼动力学初始化完成: {} 条根骨骼, {} 个质点, 最大深度 {}, {} 个碰撞体",
            self.config.label,
            self.roots.len(),
            self.chain.len(),
            self.chain.max_depth(),
            self.colliders.len()
        );
    }

    /// 从配置派生每个质点的阻尼、弹性和半径
    pub fn refresh_particle_params(&mut self) {
        let max_depth = self.chain.max_depth();
        let config = &self.config;
        for particle in self.chain.particles_mut() {
            particle.damping = config.damping;
            particle.elasticity = config.elasticity;
            particle.radius = config.radius_at(particle.address.depth, max_depth);
        }
    }

    /// 以当前姿势作为新的初始姿势
    ///
    /// 模拟器每帧都会把父骨骼恢复到初始本地旋转，外部动画对这些骨骼的修改
    /// 只有在重新捕获后才会生效。
    pub fn capture_rest_pose<S: SceneGraph + ?Sized>(&mut self, graph: &S) {
        for particle in self.chain.particles_mut() {
            particle.parent_rest_local_rotation = graph.local_rotation(particle.parent);
            particle.rest_local_offset = graph.local_position(particle.node);
            particle.bone_length = particle.rest_local_offset.length();
        }
        log::debug!("[{}] 重新捕获初始姿势: {} 个质点", self.config.label, self.chain.len());
    }

    /// 恢复初始旋转，质点回到骨骼末端并清零速度
    pub fn reset<S: SceneGraph + ?Sized>(&mut self, graph: &mut S) {
        for particle in self.chain.particles_mut() {
            graph.set_local_rotation(particle.parent, particle.parent_rest_local_rotation);
        }
        // 父骨骼先全部恢复，再读取末端位置
        for particle in self.chain.particles_mut() {
            particle.reset_to(graph.world_position(particle.node));
        }
        if let Some(anchor) = self.anchor {
            self.anchor_position = graph.world_position(anchor);
        }
    }

    pub fn chain(&self) -> &BoneChain {
        &self.chain
    }

    /// 质点列表（供调试显示）
    pub fn particles(&self) -> &[Particle] {
        self.chain.particles()
    }

    pub fn max_depth(&self) -> u32 {
        self.chain.max_depth()
    }

    /// 推进一帧
    pub fn update<S: SceneGraph + ?Sized>(&mut self, graph: &mut S, delta_time: f32) -> FrameStats {
        self.update_with_debug(graph, delta_time, &mut NoDebug)
    }

    /// 推进一帧，并把调试线输出到 `debug`
    ///
    /// `delta_time` 不是正有限值时整帧跳过，状态保持不变。
    pub fn update_with_debug<S: SceneGraph + ?Sized>(
        &mut self,
        graph: &mut S,
        delta_time: f32,
        debug: &mut dyn DebugSink,
    ) -> FrameStats {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            log::debug!("[{}] 跳过无效帧: dt={}", self.config.label, delta_time);
            return FrameStats::default();
        }
        let dt = delta_time.min(self.config.max_delta_time);

        let anchor_delta = self.compensate_anchor(&*graph);

        let gravity_step = self.config.effective_gravity() * dt * dt;
        let iterations = self.config.collision_iterations;
        let mut collisions = 0;

        for particle in self.chain.particles_mut() {
            collisions += step_particle(
                particle,
                &mut *graph,
                &self.colliders,
                gravity_step,
                iterations,
                dt,
                debug,
            );
        }

        if self.config.debug_log {
            log::debug!(
                "[{}] dt={:.4}, 质点={}, 碰撞={}, 锚点位移=({:.3},{:.3},{:.3})",
                self.config.label,
                dt,
                self.chain.len(),
                collisions,
                anchor_delta.x,
                anchor_delta.y,
                anchor_delta.z
            );
        }

        FrameStats {
            particles: self.chain.len(),
            collisions,
            anchor_delta,
        }
    }

    /// 把锚点自上一帧以来的位移加到所有质点的当前位置上
    pub(crate) fn compensate_anchor<S: SceneGraph + ?Sized>(&mut self, graph: &S) -> Vec3 {
        let Some(anchor) = self.anchor else {
            return Vec3::ZERO;
        };
        let position = graph.world_position(anchor);
        let delta = position - self.anchor_position;
        self.anchor_position = position;

        for particle in self.chain.particles_mut() {
            particle.current_position += delta;
        }
        delta
    }
}

impl Default for BoneDynamics {
    fn default() -> Self {
        Self::new()
    }
}

/// 单个质点的一步模拟，返回发生的碰撞次数
fn step_particle<S: SceneGraph + ?Sized>(
    particle: &mut Particle,
    graph: &mut S,
    colliders: &[Collider],
    gravity_step: Vec3,
    iterations: u32,
    dt: f32,
    debug: &mut dyn DebugSink,
) -> usize {
    let parent_position = graph.world_position(particle.parent);

    // 速度阻尼
    particle.velocity *= 1.0 - particle.damping;

    // 积分
    particle.next_position = particle.current_position + particle.velocity * dt + gravity_step;
    particle.keep_length(parent_position);

    // 恢复初始旋转后，向初始姿势下的末端位置回拉
    graph.set_local_rotation(particle.parent, particle.parent_rest_local_rotation);
    let rest_tip = graph.world_position(particle.node);
    debug.line(parent_position, rest_tip, DebugLineKind::RestDirection);

    particle.next_position += (rest_tip - particle.next_position) * (particle.elasticity * dt);
    particle.keep_length(parent_position);

    // 碰撞
    let mut collisions = 0;
    for _ in 0..iterations {
        for collider in colliders {
            let contact = collider.detect(&*graph, particle.radius, particle.next_position, debug);
            particle.next_position = contact.center;
            if contact.collided {
                collisions += 1;
                particle.keep_length(parent_position);
            }
        }
    }

    // 写回父骨骼旋转（使用本帧更新前的位置）
    let rotation = solve_parent_rotation(
        graph.world_rotation(particle.parent),
        particle.rest_local_offset,
        particle.current_position - parent_position,
    );
    graph.set_world_rotation(particle.parent, rotation);

    // 更新速度
    particle.velocity = (particle.next_position - particle.current_position) / dt;
    particle.current_position = particle.next_position;

    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::debug::DebugLines;
    use crate::skeleton::{Bone, BoneManager};
    use glam::Quat;

    const EPS: f32 = 1e-4;

    /// 根骨骼 + 向下的线性链
    fn hanging_chain(depth: usize) -> (BoneManager, usize) {
        let mut bones = BoneManager::new();
        let root = bones
            .add_bone(Bone::new("root").with_translation(Vec3::new(0.0, 5.0, 0.0)))
            .unwrap();
        let mut parent = root;
        for i in 0..depth {
            parent = bones
                .add_bone(
                    Bone::new(format!("link_{i}"))
                        .with_parent(parent)
                        .with_translation(Vec3::new(1.0, 0.0, 0.0)),
                )
                .unwrap();
        }
        (bones, root)
    }

    fn quiet_config() -> DynamicsConfig {
        DynamicsConfig {
            label: String::from("test"),
            damping: 0.0,
            elasticity: 0.0,
            gravity_enabled: false,
            ..DynamicsConfig::default()
        }
    }

    fn dynamics(bones: &BoneManager, root: usize, config: DynamicsConfig) -> BoneDynamics {
        let mut dynamics = BoneDynamics::with_config(config).unwrap();
        dynamics.set_roots(bones, vec![root]).unwrap();
        dynamics
    }

    fn assert_lengths(dynamics: &BoneDynamics, bones: &BoneManager) {
        for p in dynamics.particles() {
            let length = (p.current_position - bones.world_position(p.parent)).length();
            assert!(
                (length - p.bone_length).abs() < EPS,
                "particle {:?}: {} != {}",
                p.address,
                length,
                p.bone_length
            );
        }
    }

    #[test]
    fn test_static_without_forces() {
        let (mut bones, root) = hanging_chain(3);
        let mut dynamics = dynamics(&bones, root, quiet_config());
        let start: Vec<Vec3> = dynamics.particles().iter().map(|p| p.current_position).collect();

        for _ in 0..30 {
            dynamics.update(&mut bones, 1.0 / 60.0);
        }
        for (p, s) in dynamics.particles().iter().zip(&start) {
            assert!((p.current_position - *s).length() < EPS);
            assert!(p.velocity.length() < 1e-2);
        }
    }

    #[test]
    fn test_gravity_swings_chain_down_and_keeps_length() {
        let (mut bones, root) = hanging_chain(3);
        let config = DynamicsConfig {
            gravity_enabled: true,
            damping: 0.05,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);

        for _ in 0..120 {
            dynamics.update(&mut bones, 1.0 / 60.0);
            assert_lengths(&dynamics, &bones);
        }
        // 末端质点应明显下垂
        let tip = dynamics.particles().last().unwrap();
        assert!(tip.current_position.y < 5.0 - 0.5);
        // 父骨骼已被旋转
        assert!(bones.world_rotation(root).dot(Quat::IDENTITY).abs() < 1.0 - 1e-4);
    }

    #[test]
    fn test_elasticity_returns_to_rest() {
        let (mut bones, root) = hanging_chain(1);
        let config = DynamicsConfig {
            elasticity: 5.0,
            damping: 0.3,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);
        let rest = dynamics.particles()[0].current_position;

        // 手动把质点拨到侧面
        dynamics.chain.particles_mut()[0].current_position = Vec3::new(0.0, 6.0, 0.0);
        for _ in 0..600 {
            dynamics.update(&mut bones, 1.0 / 60.0);
        }
        assert!((dynamics.particles()[0].current_position - rest).length() < 1e-2);
    }

    #[test]
    fn test_collider_pushes_without_stretching() {
        let (mut bones, root) = hanging_chain(1);
        let collider_node = bones
            .add_bone(Bone::new("ball").with_translation(Vec3::new(1.0, 4.0, 0.0)))
            .unwrap();
        let config = DynamicsConfig {
            base_radius: 0.2,
            gravity_enabled: true,
            collision_iterations: 2,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);
        dynamics
            .add_collider(&bones, Collider::sphere(collider_node, 0.5))
            .unwrap();

        let mut total = 0;
        let mut lines = DebugLines::new();
        for _ in 0..60 {
            total += dynamics
                .update_with_debug(&mut bones, 1.0 / 60.0, &mut lines)
                .collisions;
            assert_lengths(&dynamics, &bones);
        }
        assert!(total > 0);
        assert!(lines.count(DebugLineKind::CollisionPush) > 0);
        assert_eq!(lines.count(DebugLineKind::RestDirection), 60);

        // 质点被挡在球体右上方，没有穿过去摆到最低点
        let p = &dynamics.particles()[0];
        let distance = (p.current_position - Vec3::new(1.0, 4.0, 0.0)).length();
        assert!(distance > 0.6);
        assert!(p.current_position.x > 0.8);
    }

    /// 竖直骨骼末端在 (0,1,0)，同时落在两个重叠的球体内
    const BALL_A: Vec3 = Vec3::new(-0.2, 1.0, 0.0);
    const BALL_B: Vec3 = Vec3::new(0.6, 0.9, 0.0);
    const BALL_RADIUS: f32 = 0.8;

    fn between_balls(iterations: u32) -> (BoneManager, BoneDynamics, usize, usize) {
        let mut bones = BoneManager::new();
        let root = bones.add_bone(Bone::new("root")).unwrap();
        bones
            .add_bone(Bone::new("tip").with_parent(root).with_translation(Vec3::Y))
            .unwrap();
        let a = bones.add_bone(Bone::new("ball_a").with_translation(BALL_A)).unwrap();
        let b = bones.add_bone(Bone::new("ball_b").with_translation(BALL_B)).unwrap();

        let config = DynamicsConfig {
            base_radius: 0.0,
            collision_iterations: iterations,
            ..quiet_config()
        };
        let dynamics = dynamics(&bones, root, config);
        (bones, dynamics, a, b)
    }

    #[test]
    fn test_collision_iterations_resolve_overlap() {
        // 不迭代：不推出
        let (mut bones, mut dynamics, a, b) = between_balls(0);
        dynamics.add_collider(&bones, Collider::sphere(a, BALL_RADIUS)).unwrap();
        dynamics.add_collider(&bones, Collider::sphere(b, BALL_RADIUS)).unwrap();
        let stats = dynamics.update(&mut bones, 1.0 / 60.0);
        assert_eq!(stats.collisions, 0);
        assert!((dynamics.particles()[0].current_position - Vec3::Y).length() < 1e-6);

        // 一次迭代：B 把质点推回 A 内部
        let (mut bones, mut dynamics, a, b) = between_balls(1);
        dynamics.add_collider(&bones, Collider::sphere(a, BALL_RADIUS)).unwrap();
        dynamics.add_collider(&bones, Collider::sphere(b, BALL_RADIUS)).unwrap();
        assert_eq!(dynamics.update(&mut bones, 1.0 / 60.0).collisions, 2);
        let once = dynamics.particles()[0].current_position;
        assert!((once - BALL_A).length() < BALL_RADIUS - 0.05);
        assert!(once.x < 0.0);
        assert_lengths(&dynamics, &bones);

        // 两次迭代：两个球都离开
        let (mut bones, mut dynamics, a, b) = between_balls(2);
        dynamics.add_collider(&bones, Collider::sphere(a, BALL_RADIUS)).unwrap();
        dynamics.add_collider(&bones, Collider::sphere(b, BALL_RADIUS)).unwrap();
        dynamics.update(&mut bones, 1.0 / 60.0);
        let twice = dynamics.particles()[0].current_position;
        assert!((twice - BALL_A).length() > BALL_RADIUS + 0.05);
        assert!((twice - BALL_B).length() > BALL_RADIUS + 0.05);
        assert_lengths(&dynamics, &bones);
    }

    #[test]
    fn test_collider_registration_order_matters() {
        let (mut bones, mut dynamics, a, b) = between_balls(1);
        dynamics.add_collider(&bones, Collider::sphere(a, BALL_RADIUS)).unwrap();
        dynamics.add_collider(&bones, Collider::sphere(b, BALL_RADIUS)).unwrap();

        // 重新按 B、A 的顺序注册
        dynamics.clear_colliders();
        assert!(dynamics.colliders().is_empty());
        dynamics.add_collider(&bones, Collider::sphere(b, BALL_RADIUS)).unwrap();
        dynamics.add_collider(&bones, Collider::sphere(a, BALL_RADIUS)).unwrap();
        assert_eq!(dynamics.colliders()[0].node, b);

        dynamics.update(&mut bones, 1.0 / 60.0);
        // 先 A 后 B 时质点停在左侧，先 B 后 A 时停在右侧
        let p = dynamics.particles()[0].current_position;
        assert!(p.x > 0.5, "{p}");
        assert!((p - BALL_A).length() > BALL_RADIUS);
        assert_lengths(&dynamics, &bones);
    }

    #[test]
    fn test_anchor_compensation_shifts_particles() {
        let (mut bones, root) = hanging_chain(2);
        let mut dynamics = dynamics(&bones, root, quiet_config());
        dynamics.set_anchor(&bones, Some(root)).unwrap();

        let before: Vec<Vec3> = dynamics.particles().iter().map(|p| p.current_position).collect();
        let t = Vec3::new(0.5, -0.25, 2.0);
        bones.set_local_translation(root, Vec3::new(0.0, 5.0, 0.0) + t);

        let delta = dynamics.compensate_anchor(&bones);
        assert!((delta - t).length() < 1e-6);
        for (p, b) in dynamics.particles().iter().zip(&before) {
            assert!((p.current_position - (*b + t)).length() < 1e-6);
        }

        // 第二次调用没有新的位移
        assert_eq!(dynamics.compensate_anchor(&bones), Vec3::ZERO);
    }

    #[test]
    fn test_anchor_translation_produces_no_jiggle() {
        let (mut bones, root) = hanging_chain(2);
        let mut dynamics = dynamics(&bones, root, quiet_config());
        dynamics.set_anchor(&bones, Some(root)).unwrap();

        bones.set_local_translation(root, Vec3::new(3.0, 5.0, 0.0));
        let stats = dynamics.update(&mut bones, 1.0 / 60.0);
        assert!((stats.anchor_delta - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
        for p in dynamics.particles() {
            assert!((p.current_position - bones.world_position(p.node)).length() < EPS);
            assert!(p.velocity.length() < 1e-2);
        }
    }

    #[test]
    fn test_invalid_delta_time_skips_frame() {
        let (mut bones, root) = hanging_chain(2);
        let config = DynamicsConfig {
            gravity_enabled: true,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);
        let before: Vec<(Vec3, Vec3)> = dynamics
            .particles()
            .iter()
            .map(|p| (p.current_position, p.velocity))
            .collect();

        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let stats = dynamics.update(&mut bones, dt);
            assert_eq!(stats, FrameStats::default());
        }
        for (p, (pos, vel)) in dynamics.particles().iter().zip(&before) {
            assert_eq!(p.current_position, *pos);
            assert_eq!(p.velocity, *vel);
        }
    }

    #[test]
    fn test_zero_length_bone_stays_finite() {
        let mut bones = BoneManager::new();
        let root = bones.add_bone(Bone::new("root")).unwrap();
        bones.add_bone(Bone::new("zero").with_parent(root)).unwrap();
        let config = DynamicsConfig {
            gravity_enabled: true,
            elasticity: 1.0,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);
        for _ in 0..10 {
            dynamics.update(&mut bones, 1.0 / 60.0);
        }
        let p = &dynamics.particles()[0];
        assert!(p.current_position.is_finite());
        assert!(p.velocity.is_finite());
        assert!(bones.world_rotation(root).is_finite());
    }

    #[test]
    fn test_empty_hierarchy_is_noop() {
        let mut bones = BoneManager::new();
        let root = bones.add_bone(Bone::new("alone")).unwrap();
        let mut dynamics = dynamics(&bones, root, quiet_config());
        assert!(dynamics.particles().is_empty());
        let stats = dynamics.update(&mut bones, 1.0 / 60.0);
        assert_eq!(stats.particles, 0);
    }

    #[test]
    fn test_unknown_nodes_rejected() {
        let (bones, root) = hanging_chain(1);
        let mut dynamics = dynamics(&bones, root, quiet_config());
        assert_eq!(
            dynamics.set_roots(&bones, vec![root, 42]),
            Err(DynamicsError::UnknownNode(42))
        );
        // 失败时保留原有的根骨骼
        assert_eq!(dynamics.roots(), &[root]);
        assert!(dynamics.add_collider(&bones, Collider::sphere(7, 1.0)).is_err());
        assert!(dynamics.set_anchor(&bones, Some(9)).is_err());
        assert!(dynamics.colliders().is_empty());
    }

    #[test]
    fn test_set_config_refreshes_params() {
        let (bones, root) = hanging_chain(4);
        let mut dynamics = dynamics(&bones, root, quiet_config());
        let config = DynamicsConfig {
            damping: 0.4,
            elasticity: 2.0,
            base_radius: 1.0,
            radius_curve: Some(crate::physics::curve::RadiusCurve::linear(1.0, 0.0)),
            ..quiet_config()
        };
        dynamics.set_config(config).unwrap();

        let radii: Vec<f32> = dynamics.particles().iter().map(|p| p.radius).collect();
        let expected = [0.75, 0.5, 0.25, 0.0];
        for (r, e) in radii.iter().zip(expected) {
            assert!((r - e).abs() < 1e-5);
        }
        assert!(dynamics.particles().iter().all(|p| p.damping == 0.4 && p.elasticity == 2.0));
    }

    #[test]
    fn test_reset_restores_pose() {
        let (mut bones, root) = hanging_chain(2);
        let config = DynamicsConfig {
            gravity_enabled: true,
            ..quiet_config()
        };
        let mut dynamics = dynamics(&bones, root, config);
        for _ in 0..30 {
            dynamics.update(&mut bones, 1.0 / 60.0);
        }
        dynamics.reset(&mut bones);

        assert!(bones.world_rotation(root).dot(Quat::IDENTITY).abs() > 1.0 - 1e-6);
        for p in dynamics.particles() {
            assert_eq!(p.velocity, Vec3::ZERO);
            assert!((p.current_position - bones.world_position(p.node)).length() < 1e-6);
        }
    }

    #[test]
    fn test_capture_rest_pose() {
        let (mut bones, root) = hanging_chain(1);
        let mut dynamics = dynamics(&bones, root, quiet_config());

        let posed = Quat::from_rotation_z(-0.5);
        bones.set_local_rotation(root, posed);
        dynamics.capture_rest_pose(&bones);
        assert_eq!(dynamics.particles()[0].parent_rest_local_rotation, posed);

        // 下一帧恢复的是新的初始旋转
        dynamics.reset(&mut bones);
        assert!(bones.get_bone(root).unwrap().local_rotation.dot(posed).abs() > 1.0 - 1e-6);
    }
}

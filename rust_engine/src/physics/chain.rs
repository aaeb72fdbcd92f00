//! 质点链构建
//!
//! 从每个根骨骼出发，沿第一个子节点向下：每遇到一个有子节点的节点，
//! 就为它的第一个子节点创建一个质点。没有子节点的节点结束该链。

use super::particle::{Particle, ParticleAddress};
use crate::skeleton::SceneGraph;

/// 由一组根骨骼派生的全部质点
#[derive(Clone, Debug, Default)]
pub struct BoneChain {
    particles: Vec<Particle>,
    max_depth: u32,
}

impl BoneChain {
    /// 构建质点链（纯结构推导，不做物理计算）
    ///
    /// 不存在的根节点被忽略。同一条链内父质点总是排在子质点之前。
    pub fn build<S: SceneGraph + ?Sized>(graph: &S, roots: &[usize]) -> Self {
        let mut particles = Vec::new();
        let mut max_depth = 0;

        // (链索引, 节点, 深度)
        let mut worklist: Vec<(usize, usize, u32)> = roots
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, root)| graph.contains(**root))
            .map(|(chain, &root)| (chain, root, 0))
            .collect();

        // 节点数是任何合法链深度的上限，防止错误的场景图实现形成环
        let depth_limit = graph.node_count() as u32;

        while let Some((chain, node, depth)) = worklist.pop() {
            let Some(child) = graph.first_child(node) else {
                continue;
            };
            let depth = depth + 1;
            if depth > depth_limit {
                log::warn!("骨骼链 {} 深度超过节点总数，停止构建", chain);
                continue;
            }

            let address = ParticleAddress { chain, depth };
            let particle = Particle::new(
                address,
                child,
                node,
                graph.local_rotation(node),
                graph.local_position(child),
                graph.world_position(child),
            );
            if particle.is_degenerate() {
                log::warn!("节点 {} 的骨长为零，质点将固定在父节点上", child);
            }
            particles.push(particle);
            max_depth = max_depth.max(depth);

            worklist.push((chain, child, depth));
        }

        Self { particles, max_depth }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// 所有链中的最大深度
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// 某条根骨骼链上的质点（按深度排列）
    pub fn chain(&self, chain: usize) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(move |p| p.address.chain == chain)
    }
}

//! 调试线输出（旁路通道，不影响模拟结果）

use glam::Vec3;

/// 调试线类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugLineKind {
    /// 父骨骼到初始姿势下骨骼末端
    RestDirection,
    /// 碰撞体中心到推出后的质点位置
    CollisionPush,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugLine {
    pub from: Vec3,
    pub to: Vec3,
    pub kind: DebugLineKind,
}

/// 接收模拟过程中产生的调试线
pub trait DebugSink {
    fn line(&mut self, from: Vec3, to: Vec3, kind: DebugLineKind);
}

/// 丢弃所有调试线
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDebug;

impl DebugSink for NoDebug {
    #[inline]
    fn line(&mut self, _from: Vec3, _to: Vec3, _kind: DebugLineKind) {}
}

/// 记录调试线，渲染层每帧取走后清空
#[derive(Clone, Debug, Default)]
pub struct DebugLines {
    pub lines: Vec<DebugLine>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn count(&self, kind: DebugLineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

impl DebugSink for DebugLines {
    fn line(&mut self, from: Vec3, to: Vec3, kind: DebugLineKind) {
        self.lines.push(DebugLine { from, to, kind });
    }
}

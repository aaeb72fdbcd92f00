//! 半径响应曲线

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DynamicsError, Result};

/// 曲线关键帧
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

impl CurveKey {
    /// 切线为 0 的关键帧
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// 分段 Hermite 曲线，按深度比例 [0, 1] 缩放碰撞半径
///
/// 超出首尾关键帧的输入取端点值。
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadiusCurve {
    keys: Vec<CurveKey>,
}

impl RadiusCurve {
    /// 关键帧会按时间排序
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, value)])
    }

    /// 从 (0, start) 到 (1, end) 的直线
    pub fn linear(start: f32, end: f32) -> Self {
        let slope = end - start;
        Self::new(vec![
            CurveKey::with_tangents(0.0, start, slope, slope),
            CurveKey::with_tangents(1.0, end, slope, slope),
        ])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.keys.iter().all(|k| {
            k.time.is_finite()
                && k.value.is_finite()
                && k.in_tangent.is_finite()
                && k.out_tangent.is_finite()
        });
        if finite {
            Ok(())
        } else {
            Err(DynamicsError::InvalidConfig(String::from(
                "radius curve contains non-finite keys",
            )))
        }
    }

    /// 评估曲线，空曲线返回 1.0
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 1.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // 找到 t 所在区间
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = &self.keys[upper - 1];
        let b = &self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }

        let s = (t - a.time) / span;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * a.value + h10 * span * a.out_tangent + h01 * b.value + h11 * span * b.in_tangent
    }
}

// crates/lh_physics/src/params/lake.rs

//! 湖泊参数

use serde::{Deserialize, Serialize};

/// 湖泊/湿地静态参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LakeConfig {
    /// 承载湖泊的植被块索引；无湖泊时为 `None`
    pub lake_idx: Option<usize>,
    /// 湖盆面积剖面 [m²]，`basin[0]` 为最大湖面面积
    pub basin: Vec<f64>,
    /// 非湖泊植被块径流汇入湖泊的比例
    pub rpercent: f64,
}

impl LakeConfig {
    /// 无湖泊单元
    pub fn none() -> Self {
        Self::default()
    }

    /// 最大湖面面积 [m²]
    #[inline]
    pub fn max_area(&self) -> f64 {
        self.basin.first().copied().unwrap_or(0.0)
    }

    /// 给定湖面面积时的湖泊面积比例
    #[inline]
    pub fn lake_fraction(&self, surface_area: f64) -> f64 {
        let max_area = self.max_area();
        if max_area > 0.0 {
            surface_area / max_area
        } else {
            0.0
        }
    }
}

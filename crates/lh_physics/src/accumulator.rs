// crates/lh_physics/src/accumulator.rs

//! 面积加权累加
//!
//! `total = Σ_tile Σ_band value × Cv × AreaFract`。累加器从零开始，每个参与计算的对
//! 恰好贡献一次，被跳过的对不贡献。内部使用 Kahan 补偿求和，结果与遍历顺序无关。

use lh_foundation::{safe_div, KahanSum};

use crate::state::TileState;
use crate::tiles::{Decomposition, TileBand};

/// 降水分相
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrecipPartition {
    /// 总降水 [mm]
    pub prec: f64,
    /// 降雨 [mm]
    pub rain: f64,
    /// 降雪 [mm]
    pub snow: f64,
}

impl PrecipPartition {
    /// 零降水
    pub const ZERO: Self = Self {
        prec: 0.0,
        rain: 0.0,
        snow: 0.0,
    };

    /// 由雨雪分量构建
    #[inline]
    pub fn from_phases(rain: f64, snow: f64) -> Self {
        Self {
            prec: rain + snow,
            rain,
            snow,
        }
    }
}

/// 面积加权累加器
#[derive(Debug, Clone, Default)]
pub struct AreaAccumulator {
    prec: KahanSum,
    rain: KahanSum,
    snow: KahanSum,
    melt: KahanSum,
    contributions: usize,
}

impl AreaAccumulator {
    /// 创建零累加器
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个 (植被块, 高程带) 的降水分相
    #[inline]
    pub fn add_pair(&mut self, pair: &TileBand, precip: &PrecipPartition, melt: f64) {
        let w = pair.weight();
        self.add_weighted(precip, w);
        self.melt.add(melt * w);
    }

    /// 以任意面积权重累加降水分相（湖面降水使用）
    #[inline]
    pub fn add_weighted(&mut self, precip: &PrecipPartition, weight: f64) {
        self.prec.add(precip.prec * weight);
        self.rain.add(precip.rain * weight);
        self.snow.add(precip.snow * weight);
        self.contributions += 1;
    }

    /// 当前单元总降水分相
    pub fn totals(&self) -> PrecipPartition {
        PrecipPartition {
            prec: self.prec.value(),
            rain: self.rain.value(),
            snow: self.snow.value(),
        }
    }

    /// 面积加权融雪 [mm]
    #[inline]
    pub fn melt(&self) -> f64 {
        self.melt.value()
    }

    /// 已累加的贡献次数
    #[inline]
    pub fn contributions(&self) -> usize {
        self.contributions
    }
}

/// 单元平均反照率
///
/// 入射短波为零时返回 0。
pub fn gridcell_albedo(shortwave: f64, decomposition: &Decomposition, tiles: &[TileState]) -> f64 {
    if shortwave <= 0.0 {
        return 0.0;
    }
    let absorbed = KahanSum::sum_iter(decomposition.pairs().map(|p| {
        tiles[p.tile].bands[p.band].energy.net_short_atmos * p.weight()
    }));
    1.0 - safe_div(absorbed, shortwave, 0.0)
}

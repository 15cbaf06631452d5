// crates/lh_physics/src/tiles.rs

//! 子网格分解
//!
//! 枚举面积大于零的 (植被块, 高程带) 对。顺序固定为植被块优先、高程带其次，
//! 累加本身与顺序无关，但年初碳库重置等按序触发的逻辑依赖该顺序。
//!
//! 湖泊块只处理第 0 个高程带，面积比例乘以 (1 − 湖泊比例)；
//! 结果为零时整个植被块跳过。

use lh_foundation::KahanSum;

use crate::params::{LakeConfig, SoilProperties, TileKind, VegetationConfig};
use crate::state::LakeState;

/// 湖泊面积比例与冰盖比例
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LakeFractions {
    /// 湖面占湖泊块最大面积的比例
    pub lake_fraction: f64,
    /// 冰盖占湖面的比例
    pub ice_fraction: f64,
}

impl LakeFractions {
    /// 用上一时间步的新冰盖更新湖泊状态，并计算本步的面积比例
    pub fn update(lake: &mut LakeState, config: &LakeConfig) -> Self {
        lake.areai = lake.new_ice_area;
        if lake.areai < 0.0 {
            log::warn!("湖泊冰盖面积为负 ({:.3e})，置零", lake.areai);
            lake.areai = 0.0;
        }
        let ice_fraction = if lake.sarea > 0.0 {
            (lake.areai / lake.sarea).min(1.0)
        } else {
            0.0
        };
        Self {
            lake_fraction: config.lake_fraction(lake.sarea),
            ice_fraction,
        }
    }
}

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 植被块名义面积为零
    ZeroCv,
    /// 湖泊块完全被湖面覆盖
    LakeCovered,
    /// 高程带面积比例为零
    ZeroBandFraction,
    /// 湖泊块只处理第 0 个高程带
    LakeSingleBand,
}

/// 参与计算的 (植被块, 高程带) 对
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBand {
    /// 植被块索引
    pub tile: usize,
    /// 高程带索引
    pub band: usize,
    /// 有效面积比例（已扣除湖面）
    pub cv: f64,
    /// 高程带面积比例
    pub area_fract: f64,
}

impl TileBand {
    /// 占单元面积的权重
    #[inline]
    pub fn weight(&self) -> f64 {
        self.cv * self.area_fract
    }
}

/// 被跳过的 (植被块, 高程带) 对
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkippedPair {
    /// 植被块索引
    pub tile: usize,
    /// 高程带索引
    pub band: usize,
    /// 名义面积权重（只有湖泊块超出的高程带可能非零）
    pub area: f64,
    /// 跳过原因
    pub reason: SkipReason,
}

/// 单个植被块的计算计划
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlan {
    /// 植被块索引
    pub tile: usize,
    /// 类别
    pub kind: TileKind,
    /// 有效面积比例
    pub cv: f64,
    /// 是否为湖泊块
    pub lake: bool,
    /// 参与计算的高程带
    pub bands: Vec<TileBand>,
}

/// 分解结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    tiles: Vec<TilePlan>,
    skipped: Vec<SkippedPair>,
    lake_area: f64,
}

impl Decomposition {
    /// 参与计算的植被块（至少有一个高程带）
    #[inline]
    pub fn tiles(&self) -> &[TilePlan] {
        &self.tiles
    }

    /// 按处理顺序遍历全部 (植被块, 高程带) 对
    pub fn pairs(&self) -> impl Iterator<Item = &TileBand> + '_ {
        self.tiles.iter().flat_map(|t| t.bands.iter())
    }

    /// 参与计算的对数
    pub fn n_pairs(&self) -> usize {
        self.tiles.iter().map(|t| t.bands.len()).sum()
    }

    /// 被跳过的对
    #[inline]
    pub fn skipped(&self) -> &[SkippedPair] {
        &self.skipped
    }

    /// 参与计算的面积之和
    pub fn processed_area(&self) -> f64 {
        KahanSum::sum_iter(self.pairs().map(TileBand::weight))
    }

    /// 被跳过的面积之和
    pub fn skipped_area(&self) -> f64 {
        KahanSum::sum_iter(self.skipped.iter().map(|s| s.area))
    }

    /// 湖面占单元面积（由湖泊阶段处理）
    #[inline]
    pub fn lake_area(&self) -> f64 {
        self.lake_area
    }
}

/// 子网格分解器
#[derive(Debug, Clone, Copy)]
pub struct TileDecomposer<'a> {
    veg: &'a VegetationConfig,
    area_fract: &'a [f64],
}

impl<'a> TileDecomposer<'a> {
    /// 创建分解器
    pub fn new(veg: &'a VegetationConfig, soil: &'a SoilProperties) -> Self {
        Self {
            veg,
            area_fract: &soil.area_fract,
        }
    }

    /// 枚举计算对
    ///
    /// `lake` 为 `None` 时（湖泊模型关闭）忽略植被块的湖泊标记。
    pub fn decompose(&self, lake: Option<LakeFractions>) -> Decomposition {
        let mut out = Decomposition::default();

        for (idx, tile) in self.veg.tiles().iter().enumerate() {
            if tile.cv <= 0.0 {
                self.skip_all(&mut out, idx, SkipReason::ZeroCv);
                continue;
            }

            let lake_fraction = match lake {
                Some(fr) if tile.lake => Some(fr.lake_fraction),
                _ => None,
            };

            let (cv, n_bands) = match lake_fraction {
                Some(frac) => {
                    out.lake_area += tile.cv * frac;
                    (tile.cv * (1.0 - frac), 1)
                }
                None => (tile.cv, self.area_fract.len()),
            };

            if cv <= 0.0 {
                log::debug!("植被块 {idx} 被湖面完全覆盖，跳过");
                self.skip_all(&mut out, idx, SkipReason::LakeCovered);
                continue;
            }

            let mut plan = TilePlan {
                tile: idx,
                kind: self.veg.kind(idx),
                cv,
                lake: lake_fraction.is_some(),
                bands: Vec::with_capacity(n_bands),
            };

            for (band, &af) in self.area_fract.iter().enumerate() {
                if band >= n_bands {
                    out.skipped.push(SkippedPair {
                        tile: idx,
                        band,
                        area: cv * af,
                        reason: SkipReason::LakeSingleBand,
                    });
                } else if af > 0.0 {
                    plan.bands.push(TileBand {
                        tile: idx,
                        band,
                        cv,
                        area_fract: af,
                    });
                } else {
                    out.skipped.push(SkippedPair {
                        tile: idx,
                        band,
                        area: 0.0,
                        reason: SkipReason::ZeroBandFraction,
                    });
                }
            }

            if !plan.bands.is_empty() {
                out.tiles.push(plan);
            }
        }

        out
    }

    fn skip_all(&self, out: &mut Decomposition, tile: usize, reason: SkipReason) {
        out.skipped.extend((0..self.area_fract.len()).map(|band| SkippedPair {
            tile,
            band,
            area: 0.0,
            reason,
        }));
    }
}

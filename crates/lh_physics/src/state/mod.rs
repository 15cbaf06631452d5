// crates/lh_physics/src/state/mod.rs

//! 网格单元持久状态
//!
//! 状态按 (植被块 × 高程带) 组织，由调用方拥有并在时间步之间保存，
//! 核心通过 `&mut` 原地更新。
//!
//! - [`BandState`]: 单个 (植被块, 高程带) 的土壤、冠层、积雪、能量状态
//! - [`TileState`]: 一个植被块的全部高程带
//! - [`CellState`]: 整个网格单元，含湖泊状态与单元平均量

pub mod canopy;
pub mod energy;
pub mod lake;
pub mod soil;

pub use canopy::CanopyState;
pub use energy::{EnergyState, SnowState};
pub use lake::LakeState;
pub use soil::{SoilColumnState, SoilLayerState};

use serde::{Deserialize, Serialize};

use lh_foundation::{LhError, LhResult};

use crate::params::{SoilProperties, VegetationConfig};

/// 单个 (植被块, 高程带) 的状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandState {
    /// 土壤柱
    pub soil: SoilColumnState,
    /// 冠层（持久值按冠层覆盖度归一化）
    pub canopy: CanopyState,
    /// 积雪
    pub snow: SnowState,
    /// 能量
    pub energy: EnergyState,
}

impl BandState {
    /// 创建零初始状态
    pub fn new(n_layers: usize, n_canopy_layers: usize) -> Self {
        Self {
            soil: SoilColumnState::new(n_layers),
            canopy: CanopyState::new(n_canopy_layers),
            snow: SnowState::default(),
            energy: EnergyState::default(),
        }
    }
}

/// 单个植被块的状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileState {
    /// 各高程带状态
    pub bands: Vec<BandState>,
}

impl TileState {
    /// 创建植被块状态
    pub fn new(n_bands: usize, n_layers: usize, n_canopy_layers: usize) -> Self {
        Self {
            bands: (0..n_bands)
                .map(|_| BandState::new(n_layers, n_canopy_layers))
                .collect(),
        }
    }
}

/// 单元平均输出
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CellAverages {
    /// 单元平均反照率
    pub albedo: f64,
    /// 面积加权总降水 [mm]
    pub prec: f64,
    /// 面积加权降雨 [mm]
    pub rain: f64,
    /// 面积加权降雪 [mm]
    pub snow: f64,
}

/// 网格单元状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    /// 各植被块状态（裸土块位于末尾）
    pub tiles: Vec<TileState>,
    /// 湖泊状态
    pub lake: LakeState,
    /// 单元平均输出
    pub averages: CellAverages,
}

impl CellState {
    /// 按植被块布局分配状态
    pub fn new(
        veg: &VegetationConfig,
        n_bands: usize,
        n_layers: usize,
        n_canopy_layers: usize,
    ) -> Self {
        Self {
            tiles: (0..veg.len())
                .map(|_| TileState::new(n_bands, n_layers, n_canopy_layers))
                .collect(),
            lake: LakeState::default(),
            averages: CellAverages::default(),
        }
    }

    /// 获取 (植被块, 高程带) 状态
    #[inline]
    pub fn band(&self, tile: usize, band: usize) -> &BandState {
        &self.tiles[tile].bands[band]
    }

    /// 获取 (植被块, 高程带) 可变状态
    #[inline]
    pub fn band_mut(&mut self, tile: usize, band: usize) -> &mut BandState {
        &mut self.tiles[tile].bands[band]
    }

    /// 检查状态维度与参数一致
    pub fn validate_dimensions(
        &self,
        veg: &VegetationConfig,
        soil: &SoilProperties,
        n_layers: usize,
        n_canopy_layers: usize,
        carbon: bool,
    ) -> LhResult<()> {
        LhError::check_size("cell.tiles", veg.len(), self.tiles.len())?;
        for tile in &self.tiles {
            LhError::check_size("cell.bands", soil.n_bands(), tile.bands.len())?;
            for band in &tile.bands {
                LhError::check_size("cell.layers", n_layers, band.soil.layers.len())?;
                if carbon {
                    LhError::check_size(
                        "canopy.rs_layer",
                        n_canopy_layers,
                        band.canopy.rs_layer.len(),
                    )?;
                    LhError::check_size(
                        "canopy.nscale_factor",
                        n_canopy_layers,
                        band.canopy.nscale_factor.len(),
                    )?;
                }
            }
        }
        Ok(())
    }
}

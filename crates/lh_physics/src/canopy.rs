// crates/lh_physics/src/canopy.rs

//! 冠层状态换算与土壤湿润度
//!
//! 持久化的 LAI、截留水量与冠层截雪按冠层覆盖度归一化到网格尺度。
//! 调用地表通量模型前换算到冠层局部值，调用后换回，保证存储值与覆盖度无关。

use crate::params::SoilProperties;
use crate::state::{CanopyState, SnowState, SoilLayerState};

/// 冠层覆盖度换算因子
///
/// 两个方向使用同一个因子，往返换算精确可逆。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanopyScale {
    fcanopy: f64,
}

impl CanopyScale {
    /// 由覆盖度创建，低于 `min_fcanopy` 时取下限
    pub fn new(fcanopy: f64, min_fcanopy: f64) -> Self {
        let fcanopy = if fcanopy < min_fcanopy {
            log::warn!("冠层覆盖度 {fcanopy:.3e} 低于下限，按 {min_fcanopy:.3e} 换算");
            min_fcanopy
        } else {
            fcanopy
        };
        Self { fcanopy }
    }

    /// 实际使用的覆盖度
    #[inline]
    pub fn fcanopy(&self) -> f64 {
        self.fcanopy
    }

    /// 网格尺度 → 冠层局部
    ///
    /// 最大截留量按局部 LAI 重新计算。
    pub fn to_local(&self, canopy: &mut CanopyState, snow: &mut SnowState, lai_water_factor: f64) {
        canopy.lai /= self.fcanopy;
        canopy.wdew /= self.fcanopy;
        canopy.wdmax = canopy.lai * lai_water_factor;
        snow.snow_canopy /= self.fcanopy;
    }

    /// 冠层局部 → 网格尺度
    pub fn to_grid(&self, canopy: &mut CanopyState, snow: &mut SnowState) {
        canopy.lai *= self.fcanopy;
        canopy.wdmax *= self.fcanopy;
        canopy.wdew *= self.fcanopy;
        snow.snow_canopy *= self.fcanopy;
    }
}

/// 植被覆盖导致的地表辐射衰减
///
/// `(1 − Fc) + Fc · exp(−k · LAI)`
#[inline]
pub fn surface_attenuation(fcanopy: f64, rad_atten: f64, lai: f64) -> f64 {
    (1.0 - fcanopy) + fcanopy * (-rad_atten * lai).exp()
}

/// 根区含水量：有根系分布的各层含水量之和 [mm]
pub fn root_zone_moisture(layers: &[SoilLayerState], root: &[f64]) -> f64 {
    layers
        .iter()
        .zip(root)
        .filter(|&(_, &r)| r > 0.0)
        .map(|(layer, _)| layer.moist)
        .sum()
}

/// 各层平均湿润指数
///
/// 每层 `(moist − Wpwp) / (porosity · depth · 1000 − Wpwp)`，再对层数取平均。
pub fn soil_wetness(layers: &[SoilLayerState], soil: &SoilProperties) -> f64 {
    if layers.is_empty() {
        return 0.0;
    }
    let total: f64 = layers
        .iter()
        .enumerate()
        .map(|(l, layer)| (layer.moist - soil.wpwp[l]) / (soil.max_moist(l) - soil.wpwp[l]))
        .sum();
    total / layers.len() as f64
}

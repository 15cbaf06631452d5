// crates/lh_physics/src/params/soil.rs

//! 土壤参数

use serde::{Deserialize, Serialize};

use lh_foundation::{KahanSum, LhError, LhResult};

use crate::constants::MM_PER_M;

/// 土壤与高程带参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProperties {
    /// 各层孔隙度
    pub porosity: Vec<f64>,
    /// 各层凋萎含水量 [mm]
    pub wpwp: Vec<f64>,
    /// 各层厚度 [m]
    pub depth: Vec<f64>,
    /// 土壤热阻尼深度 [m]
    pub dp: f64,
    /// 各高程带面积比例
    pub area_fract: Vec<f64>,
    /// 裸土表面粗糙度 [m]
    pub rough: f64,
    /// 雪面粗糙度 [m]
    pub snow_rough: f64,
    /// 网格单元面积 [m²]
    pub cell_area: f64,
}

impl SoilProperties {
    /// 土壤层数
    #[inline]
    pub fn n_layers(&self) -> usize {
        self.depth.len()
    }

    /// 高程带数
    #[inline]
    pub fn n_bands(&self) -> usize {
        self.area_fract.len()
    }

    /// 某层最大含水量 [mm]
    #[inline]
    pub fn max_moist(&self, layer: usize) -> f64 {
        self.porosity[layer] * self.depth[layer] * MM_PER_M
    }

    /// 检查各层数组长度一致
    pub fn validate(&self, n_layers: usize, n_bands: usize) -> LhResult<()> {
        LhError::check_size("soil.porosity", n_layers, self.porosity.len())?;
        LhError::check_size("soil.wpwp", n_layers, self.wpwp.len())?;
        LhError::check_size("soil.depth", n_layers, self.depth.len())?;
        LhError::check_size("soil.area_fract", n_bands, self.area_fract.len())?;
        for &af in &self.area_fract {
            LhError::check_range("soil.area_fract", af, 0.0, 1.0)?;
        }
        let sum = KahanSum::sum_iter(self.area_fract.iter().copied());
        if (sum - 1.0).abs() > 1e-6 {
            return Err(LhError::invalid_input(format!("高程带面积比例之和为 {sum}，应为 1")));
        }
        Ok(())
    }
}

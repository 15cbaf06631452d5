// crates/lh_config/src/parameters.rs

//! 物理参数表
//!
//! 单元时间步使用的常数型物理参数。字段名对应参数文件中的小写键名。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 物理参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// 裸土（无雪）反照率
    #[serde(default = "default_albedo_bare_soil")]
    pub albedo_bare_soil: f64,

    /// 单位叶面积指数的冠层最大截留量 [mm]
    #[serde(default = "default_veg_lai_water_factor")]
    pub veg_lai_water_factor: f64,

    /// 极大阻抗，代表气孔完全关闭 [s/m]
    #[serde(default = "default_huge_resist")]
    pub huge_resist: f64,

    /// 高于此气温降水全部为雨 [°C]
    #[serde(default = "default_snow_max_snow_temp")]
    pub snow_max_snow_temp: f64,

    /// 低于此气温降水全部为雪 [°C]
    #[serde(default = "default_snow_min_rain_temp")]
    pub snow_min_rain_temp: f64,

    /// 雨量计高度 [m]
    #[serde(default = "default_gauge_height")]
    pub gauge_height: f64,

    /// 零平面位移与植被高度之比
    #[serde(default = "default_veg_ratio_dh_height")]
    pub veg_ratio_dh_height: f64,

    /// 冠层覆盖度下限，用于冠层状态的归一化
    #[serde(default = "default_min_fcanopy")]
    pub min_fcanopy: f64,
}

fn default_albedo_bare_soil() -> f64 { 0.2 }
fn default_veg_lai_water_factor() -> f64 { 0.1 }
fn default_huge_resist() -> f64 { 1e20 }
fn default_snow_max_snow_temp() -> f64 { 0.5 }
fn default_snow_min_rain_temp() -> f64 { -0.5 }
fn default_gauge_height() -> f64 { 1.0 }
fn default_veg_ratio_dh_height() -> f64 { 0.67 }
fn default_min_fcanopy() -> f64 { 1e-4 }

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            albedo_bare_soil: default_albedo_bare_soil(),
            veg_lai_water_factor: default_veg_lai_water_factor(),
            huge_resist: default_huge_resist(),
            snow_max_snow_temp: default_snow_max_snow_temp(),
            snow_min_rain_temp: default_snow_min_rain_temp(),
            gauge_height: default_gauge_height(),
            veg_ratio_dh_height: default_veg_ratio_dh_height(),
            min_fcanopy: default_min_fcanopy(),
        }
    }
}

impl ModelParameters {
    /// 验证参数
    ///
    /// 雨雪温度阈值的先后关系不在此处检查：分相函数在运行时报告该错误。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.albedo_bare_soil) {
            return Err(ConfigError::invalid(
                "parameters.albedo_bare_soil",
                self.albedo_bare_soil,
                "反照率必须在 [0, 1] 范围内",
            ));
        }
        if self.veg_lai_water_factor < 0.0 {
            return Err(ConfigError::invalid(
                "parameters.veg_lai_water_factor",
                self.veg_lai_water_factor,
                "不能为负",
            ));
        }
        if self.huge_resist <= 0.0 {
            return Err(ConfigError::invalid(
                "parameters.huge_resist",
                self.huge_resist,
                "必须为正",
            ));
        }
        if self.gauge_height <= 0.0 {
            return Err(ConfigError::invalid(
                "parameters.gauge_height",
                self.gauge_height,
                "必须为正",
            ));
        }
        if self.veg_ratio_dh_height <= 0.0 {
            return Err(ConfigError::invalid(
                "parameters.veg_ratio_dh_height",
                self.veg_ratio_dh_height,
                "必须为正",
            ));
        }
        if self.min_fcanopy <= 0.0 || self.min_fcanopy > 1.0 {
            return Err(ConfigError::invalid(
                "parameters.min_fcanopy",
                self.min_fcanopy,
                "必须在 (0, 1] 范围内",
            ));
        }
        Ok(())
    }
}

// crates/lh_physics/src/state/energy.rs

//! 能量与积雪状态

use serde::{Deserialize, Serialize};

/// 能量平衡状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyState {
    /// 净短波辐射 [W/m²]（时间步内临时量）
    pub shortwave: f64,
    /// 净长波辐射 [W/m²]（时间步内临时量）
    pub longwave: f64,
    /// 地表从大气吸收的净短波辐射 [W/m²]
    pub net_short_atmos: f64,
    /// 地表温度 [°C]
    pub surf_temp: f64,
    /// 表层土壤是否冻结
    pub frozen: bool,
}

/// 积雪状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowState {
    /// 雪水当量 [m]
    pub swq: f64,
    /// 冠层截雪 [m]（持久值按冠层覆盖度归一化）
    pub snow_canopy: f64,
    /// 雪面升华/凝结通量 [m]（时间步内临时量）
    pub vapor_flux: f64,
    /// 冠层截雪升华通量 [m]（时间步内临时量）
    pub canopy_vapor_flux: f64,
}

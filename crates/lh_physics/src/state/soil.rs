// crates/lh_physics/src/state/soil.rs

//! 土壤柱状态

use serde::{Deserialize, Serialize};

use crate::aero::ProfileLevel;

/// 单层土壤水分状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilLayerState {
    /// 总含水量 [mm]
    pub moist: f64,
    /// 冻结水量 [mm]
    pub ice: f64,
}

/// 土壤柱状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilColumnState {
    /// 各层水分
    pub layers: Vec<SoilLayerState>,
    /// 地表径流 [mm]
    pub runoff: f64,
    /// 基流 [mm]
    pub baseflow: f64,
    /// 空气动力学阻抗 [s/m]（地面、冠层）
    pub aero_resist: [f64; 2],
    /// 潜在蒸发 [mm]
    pub pot_evap: f64,
    /// 根区含水量 [mm]
    pub rootmoist: f64,
    /// 土壤湿润指数（0 为凋萎点，1 为饱和）
    pub wetness: f64,
}

impl SoilColumnState {
    /// 创建零初始土壤柱
    pub fn new(n_layers: usize) -> Self {
        Self {
            layers: vec![SoilLayerState::default(); n_layers],
            runoff: 0.0,
            baseflow: 0.0,
            aero_resist: [0.0; 2],
            pot_evap: 0.0,
            rootmoist: 0.0,
            wetness: 0.0,
        }
    }

    /// 地面层阻抗
    #[inline]
    pub fn ground_resist(&self) -> f64 {
        self.aero_resist[ProfileLevel::Ground.index()]
    }
}

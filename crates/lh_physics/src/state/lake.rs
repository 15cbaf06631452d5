// crates/lh_physics/src/state/lake.rs

//! 湖泊状态

use serde::{Deserialize, Serialize};

/// 湖泊/湿地状态
///
/// 仅由湖泊耦合阶段及湖泊子模型修改。入流分量以体积计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LakeState {
    /// 湖面面积 [m²]
    pub sarea: f64,
    /// 冰盖面积 [m²]
    pub areai: f64,
    /// 上一时间步结束时的新冰盖面积 [m²]
    pub new_ice_area: f64,
    /// 蓄水量 [m³]
    pub volume: f64,
    /// 地表径流入流 [m³]
    pub runoff_in: f64,
    /// 基流入流 [m³]
    pub baseflow_in: f64,
    /// 河道入流 [m³]
    pub channel_in: f64,
    /// 湖面直接降水 [m³]
    pub prec: f64,
}

// crates/lh_physics/src/state/canopy.rs

//! 冠层状态
//!
//! `lai`、`wdew`、`wdmax` 以及积雪中的冠层截雪在持久化时按冠层覆盖度
//! `fcanopy` 归一化（网格尺度）；时间步内部换算为冠层局部值。

use serde::{Deserialize, Serialize};

/// 冠层状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanopyState {
    /// 叶面积指数
    pub lai: f64,
    /// 冠层覆盖度
    pub fcanopy: f64,
    /// 植被反照率
    pub albedo: f64,
    /// 零平面位移 [m]
    pub displacement: f64,
    /// 粗糙度 [m]
    pub roughness: f64,
    /// 冠层截留水量 [mm]
    pub wdew: f64,
    /// 冠层最大截留量 [mm]
    pub wdmax: f64,
    /// 冠层阻抗 [s/m]
    pub rc: f64,
    /// 各冠层分层气孔阻抗 [s/m]
    pub rs_layer: Vec<f64>,
    /// 吸收的光合有效辐射
    pub apar: f64,
    /// 各冠层分层氮分配因子
    pub nscale_factor: Vec<f64>,
    /// 当年累计净初级生产力
    pub annual_npp: f64,
    /// 上一年净初级生产力
    pub annual_npp_prev: f64,
}

impl CanopyState {
    /// 创建冠层状态
    pub fn new(n_canopy_layers: usize) -> Self {
        Self {
            lai: 0.0,
            fcanopy: 1.0,
            albedo: 0.2,
            displacement: 0.0,
            roughness: 0.0,
            wdew: 0.0,
            wdmax: 0.0,
            rc: 0.0,
            rs_layer: vec![0.0; n_canopy_layers],
            apar: 0.0,
            nscale_factor: vec![1.0; n_canopy_layers],
            annual_npp: 0.0,
            annual_npp_prev: 0.0,
        }
    }
}

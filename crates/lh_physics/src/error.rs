// crates/lh_physics/src/error.rs

//! 物理计算错误类型
//!
//! 单元时间步只有一种错误：某个子模型报告了无法求解的物理状态。
//! 变体记录出错的子模型与位置，供外部调用方决定是否中止整个运行。

use lh_foundation::LhError;
use thiserror::Error;

/// 物理计算结果类型
pub type ComputeResult<T> = Result<T, ComputationError>;

/// 单元时间步计算错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    /// 空气动力学阻抗无定义
    #[error("空气动力学阻抗计算失败: 植被块 {tile}: {message}")]
    Aerodynamics {
        /// 植被块索引
        tile: usize,
        /// 失败说明
        message: String,
    },

    /// 地表通量求解失败
    #[error("地表通量求解失败: 植被块 {tile} 高程带 {band}: {message}")]
    SurfaceFlux {
        /// 植被块索引
        tile: usize,
        /// 高程带索引
        band: usize,
        /// 失败说明
        message: String,
    },

    /// 雨雪分相输入无效
    #[error("雨雪分相输入无效: 最高降雪气温 {max_snow_temp} 必须大于最低降雨气温 {min_rain_temp}")]
    RainSnowPartition {
        /// 最高降雪气温 [°C]
        max_snow_temp: f64,
        /// 最低降雨气温 [°C]
        min_rain_temp: f64,
    },

    /// 湖泊能量平衡不收敛
    #[error("湖泊能量平衡求解失败: {0}")]
    LakeEnergy(String),

    /// 湖泊水量平衡失败
    #[error("湖泊水量平衡求解失败: {0}")]
    LakeWaterBalance(String),

    /// 输入状态维度不一致
    #[error("单元状态不一致: {0}")]
    InconsistentState(#[from] LhError),
}

impl ComputationError {
    /// 空气动力学错误
    pub fn aerodynamics(tile: usize, message: impl Into<String>) -> Self {
        Self::Aerodynamics {
            tile,
            message: message.into(),
        }
    }

    /// 地表通量错误
    pub fn surface_flux(tile: usize, band: usize, message: impl Into<String>) -> Self {
        Self::SurfaceFlux {
            tile,
            band,
            message: message.into(),
        }
    }

    /// 湖泊能量平衡错误
    pub fn lake_energy(message: impl Into<String>) -> Self {
        Self::LakeEnergy(message.into())
    }

    /// 湖泊水量平衡错误
    pub fn lake_water_balance(message: impl Into<String>) -> Self {
        Self::LakeWaterBalance(message.into())
    }
}

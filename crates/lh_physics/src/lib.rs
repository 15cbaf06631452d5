// crates/lh_physics/src/lib.rs

//! 陆面水文单元时间步核心
//!
//! 对一个网格单元推进一个时间步：把单元分解为 (植被块, 高程带) 子区域，
//! 为每个子区域准备空气动力学与冠层状态，调用地表通量子模型，
//! 按面积加权汇总降水分相，并在启用时耦合湖泊/湿地。
//!
//! - 子网格分解 (tiles)
//! - 面积加权累加 (accumulator)
//! - 空气动力学输入组装 (aero)
//! - 冠层换算与土壤湿润度 (canopy)
//! - 碳循环初始化 (carbon)
//! - 雨量计校正与雨雪分相 (precip)
//! - 湖泊耦合 (lake)
//! - 时间步编排 (step) 与多单元批量推进 (batch)
//!
//! # Trait 抽象
//!
//! 数值格式由调用方通过 [`models`] 中的 trait 注入：
//!
//! - [`AerodynamicsEngine`]: 阻抗与风速廓线
//! - [`SurfaceFluxSolver`]: 单个子区域的能量与水量平衡
//! - [`LakeEnergySolver`] / [`LakeWaterBalanceSolver`]: 湖泊平衡
//!
//! 日志通过 `log` 门面输出，本库不安装日志后端。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod aero;
pub mod batch;
pub mod canopy;
pub mod carbon;
pub mod constants;
pub mod error;
pub mod forcing;
pub mod lake;
pub mod models;
pub mod params;
pub mod precip;
pub mod state;
pub mod step;
pub mod tiles;

// 重导出常用类型
pub use accumulator::{gridcell_albedo, AreaAccumulator, PrecipPartition};
pub use aero::{AeroArray, AeroInput, AeroProfile, ProfileLevel};
pub use batch::{step_cells, BatchConfig, BatchStrategy, CellTask};
pub use canopy::CanopyScale;
pub use error::{ComputationError, ComputeResult};
pub use forcing::{ForcingRecord, GlobalParams, StepDate};
pub use lake::{LakeCoupler, RunoffRedistribution};
pub use models::{
    AerodynamicsEngine, EnergyPreparer, FluxInput, FluxOutput, LakeEnergyInput,
    LakeEnergySolver, LakeModels, LakeWaterBalanceSolver, LakeWaterInput, RainSnowPartition,
    SubModels, SurfaceFluxSolver, TopLayerMoisture, TopLayerPreparer,
};
pub use params::{
    LakeConfig, RoutingParams, SoilProperties, TileKind, VegClass, VegLibrary, VegetationConfig,
    VegetationTile,
};
pub use precip::{GaugeCorrection, LinearRainSnowPartition};
pub use state::{
    BandState, CanopyState, CellAverages, CellState, EnergyState, LakeState, SnowState,
    SoilColumnState, SoilLayerState, TileState,
};
pub use step::{StepInputs, StepOrchestrator, StepPhase, StepReport, StepStatus};
pub use tiles::{Decomposition, LakeFractions, SkipReason, TileBand, TileDecomposer};

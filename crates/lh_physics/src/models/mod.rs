// crates/lh_physics/src/models/mod.rs

//! 子模型接口
//!
//! 空气动力学、地表通量、湖泊能量与水量平衡的数值格式不属于本核心，
//! 这里只定义调用约定。每次调用期间子模型独占其所需状态的 `&mut` 借用，
//! 返回后控制权交还编排器。
//!
//! 子模型参数按领域打包为 [`AeroInput`]、[`FluxInput`]、[`LakeEnergyInput`]、
//! [`LakeWaterInput`]，字段含义与逐个传参时一致。

pub mod prepare;

pub use prepare::TopLayerPreparer;

use crate::accumulator::PrecipPartition;
use crate::aero::{AeroInput, AeroProfile};
use crate::error::ComputeResult;
use crate::forcing::{ForcingRecord, GlobalParams, StepDate};
use crate::params::{LakeConfig, SoilProperties, TileKind, VegClass, VegetationTile};
use crate::precip::{GaugeCorrection, LinearRainSnowPartition};
use crate::state::{BandState, EnergyState, LakeState, SoilColumnState, TileState};

/// 空气动力学阻抗求解器
pub trait AerodynamicsEngine: Send + Sync {
    /// 计算植被块的三层阻抗与风速廓线
    ///
    /// 阻抗无定义时返回错误，整个时间步中止。
    fn profile(&self, input: &AeroInput) -> ComputeResult<AeroProfile>;
}

/// 表层土壤含水量（体积比）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TopLayerMoisture {
    /// 总含水量 [mm/mm]
    pub moist0: f64,
    /// 冻结含水量 [mm/mm]
    pub ice0: f64,
}

/// 能量平衡预处理
pub trait EnergyPreparer: Send + Sync {
    /// 由顶部两层土壤水分推导本高程带的表层含水量，并更新热力学状态
    fn prepare(
        &self,
        column: &SoilColumnState,
        energy: &mut EnergyState,
        soil: &SoilProperties,
    ) -> TopLayerMoisture;
}

/// 地表通量求解输入
#[derive(Debug, Clone, Copy)]
pub struct FluxInput<'a> {
    /// 植被块索引
    pub tile: usize,
    /// 高程带索引
    pub band: usize,
    /// 植被块类别
    pub kind: TileKind,
    /// 植被块数（不含裸土块）
    pub n_veg: usize,
    /// 植被类型索引
    pub veg_class: usize,
    /// 植被类型参数
    pub class: &'a VegClass,
    /// 植被块参数（根系、冠层分层、汇流参数）
    pub veg_tile: &'a VegetationTile,
    /// 是否有上层林冠
    pub overstory: bool,
    /// 无雪地表反照率
    pub bare_albedo: f64,
    /// 表层含水量
    pub moisture: TopLayerMoisture,
    /// 地表辐射衰减因子
    pub surf_atten: f64,
    /// 空气动力学廓线
    pub aero: &'a AeroProfile,
    /// 雨量计校正系数
    pub gauge_correction: GaugeCorrection,
    /// 土壤层数
    pub n_layers: usize,
    /// 土壤热阻尼深度 [m]
    pub damping_depth: f64,
    /// 大气驱动
    pub forcing: &'a ForcingRecord,
    /// 日期
    pub date: &'a StepDate,
    /// 全局参数
    pub global: &'a GlobalParams,
    /// 土壤参数
    pub soil: &'a SoilProperties,
}

/// 地表通量求解输出
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FluxOutput {
    /// 本高程带的降水分相 [mm]
    pub precip: PrecipPartition,
    /// 融雪量 [mm]
    pub melt: f64,
}

/// 地表通量求解器
pub trait SurfaceFluxSolver: Send + Sync {
    /// 求解单个 (植被块, 高程带) 的能量与水量平衡
    ///
    /// 冠层状态以冠层局部值传入，`state` 在调用期间由求解器独占。
    fn solve(&self, input: &FluxInput<'_>, state: &mut BandState) -> ComputeResult<FluxOutput>;
}

/// 雨雪分相
pub trait RainSnowPartition: Send + Sync {
    /// 返回降水中的降雨量
    ///
    /// 阈值无效（最高降雪气温不大于最低降雨气温）时返回错误。
    fn rain_only(
        &self,
        air_temp: f64,
        prec: f64,
        max_snow_temp: f64,
        min_rain_temp: f64,
    ) -> ComputeResult<f64>;
}

/// 湖泊能量平衡输入
///
/// 水汽压、水汽压差与气压已换算为 kPa。
#[derive(Debug, Clone, Copy)]
pub struct LakeEnergyInput<'a> {
    /// 湖面降雪 [mm]
    pub snow_prec: f64,
    /// 湖面降雨 [mm]
    pub rain_prec: f64,
    /// 气温 [°C]
    pub air_temp: f64,
    /// 风速 [m/s]
    pub wind: f64,
    /// 水汽压 [kPa]
    pub vp: f64,
    /// 入射短波 [W/m²]
    pub shortwave: f64,
    /// 入射长波 [W/m²]
    pub longwave: f64,
    /// 水汽压差 [kPa]
    pub vpd: f64,
    /// 气压 [kPa]
    pub pressure: f64,
    /// 空气密度 [kg/m³]
    pub density: f64,
    /// 土壤参数
    pub soil: &'a SoilProperties,
    /// 时间步长 [s]
    pub dt: f64,
    /// 风速观测高度 [m]
    pub wind_h: f64,
    /// 日期
    pub date: &'a StepDate,
    /// 冰盖比例
    pub ice_fraction: f64,
}

/// 湖泊能量平衡求解器
pub trait LakeEnergySolver: Send + Sync {
    /// 求解湖泊能量平衡
    fn solve(&self, input: &LakeEnergyInput<'_>, lake: &mut LakeState) -> ComputeResult<()>;
}

/// 湖泊水量平衡输入
#[derive(Debug, Clone, Copy)]
pub struct LakeWaterInput<'a> {
    /// 湖泊参数
    pub config: &'a LakeConfig,
    /// 时间步长 [s]
    pub dt: f64,
    /// 湖泊块索引
    pub tile: usize,
    /// 高程带索引（湖泊块恒为 0）
    pub band: usize,
    /// 湖泊面积比例
    pub lake_fraction: f64,
    /// 土壤参数
    pub soil: &'a SoilProperties,
    /// 湖泊块参数
    pub veg_tile: &'a VegetationTile,
}

/// 湖泊水量平衡求解器
pub trait LakeWaterBalanceSolver: Send + Sync {
    /// 求解湖泊水量平衡，消耗能量平衡的结果
    ///
    /// 可修改湖泊块（湿地）的土壤状态。
    fn solve(
        &self,
        input: &LakeWaterInput<'_>,
        lake: &mut LakeState,
        tiles: &mut [TileState],
    ) -> ComputeResult<()>;
}

/// 湖泊子模型
#[derive(Clone, Copy)]
pub struct LakeModels<'a> {
    /// 能量平衡
    pub energy: &'a dyn LakeEnergySolver,
    /// 水量平衡
    pub water: &'a dyn LakeWaterBalanceSolver,
}

static DEFAULT_PARTITION: LinearRainSnowPartition = LinearRainSnowPartition;
static DEFAULT_PREPARER: TopLayerPreparer = TopLayerPreparer;

/// 单元时间步使用的全部子模型
#[derive(Clone, Copy)]
pub struct SubModels<'a> {
    /// 空气动力学
    pub aero: &'a dyn AerodynamicsEngine,
    /// 能量预处理
    pub energy_prep: &'a dyn EnergyPreparer,
    /// 地表通量
    pub flux: &'a dyn SurfaceFluxSolver,
    /// 雨雪分相
    pub partition: &'a dyn RainSnowPartition,
    /// 湖泊子模型（无湖泊单元可为空）
    pub lake: Option<LakeModels<'a>>,
}

impl<'a> SubModels<'a> {
    /// 使用默认的能量预处理与雨雪分相
    pub fn new(aero: &'a dyn AerodynamicsEngine, flux: &'a dyn SurfaceFluxSolver) -> Self {
        Self {
            aero,
            energy_prep: &DEFAULT_PREPARER,
            flux,
            partition: &DEFAULT_PARTITION,
            lake: None,
        }
    }

    /// 替换能量预处理
    pub fn with_energy_preparer(mut self, prep: &'a dyn EnergyPreparer) -> Self {
        self.energy_prep = prep;
        self
    }

    /// 替换雨雪分相
    pub fn with_partition(mut self, partition: &'a dyn RainSnowPartition) -> Self {
        self.partition = partition;
        self
    }

    /// 设置湖泊子模型
    pub fn with_lake(
        mut self,
        energy: &'a dyn LakeEnergySolver,
        water: &'a dyn LakeWaterBalanceSolver,
    ) -> Self {
        self.lake = Some(LakeModels { energy, water });
        self
    }
}

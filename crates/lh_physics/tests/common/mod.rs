// crates/lh_physics/tests/common/mod.rs

//! 场景测试共用的参数构建与子模型桩

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lh_config::ModelConfig;
use lh_physics::{
    AeroArray, AeroInput, AeroProfile, BandState, CellState, ComputationError, ComputeResult,
    FluxInput, FluxOutput, ForcingRecord, GaugeCorrection, GlobalParams, LakeConfig,
    LakeEnergyInput, LakeEnergySolver, LakeState, LakeWaterBalanceSolver, LakeWaterInput,
    PrecipPartition, RoutingParams, SoilProperties, StepDate, StepInputs, SurfaceFluxSolver, TileState,
    VegClass, VegLibrary, VegetationConfig, VegetationTile,
};
use lh_physics::AerodynamicsEngine;

pub const N_LAYERS: usize = 2;

// ============================================================
// 参数
// ============================================================

pub fn soil(area_fract: Vec<f64>) -> SoilProperties {
    SoilProperties {
        porosity: vec![0.4, 0.45],
        wpwp: vec![5.0, 30.0],
        depth: vec![0.1, 0.5],
        dp: 4.0,
        area_fract,
        rough: 0.001,
        snow_rough: 0.0005,
        cell_area: 1.0e6,
    }
}

/// 类型 0 为森林，类型 1 为裸土
pub fn library() -> VegLibrary {
    VegLibrary::new(vec![
        VegClass {
            overstory: true,
            wind_h: 20.0,
            nscale_flag: true,
            ..Default::default()
        },
        VegClass::default(),
    ])
}

pub fn veg_tile(cv: f64) -> VegetationTile {
    VegetationTile::new(cv, 0, vec![0.6, 0.4])
}

pub fn bare_tile(cv: f64) -> VegetationTile {
    VegetationTile::new(cv, 1, vec![0.0, 0.0])
}

pub fn config(n_bands: usize) -> ModelConfig {
    ModelConfig::default()
        .with_snow_bands(n_bands)
        .with_layers(N_LAYERS)
}

/// 一个单元时间步的全部只读输入
pub struct Fixture {
    pub forcing: ForcingRecord,
    pub date: StepDate,
    pub global: GlobalParams,
    pub lake: LakeConfig,
    pub soil: SoilProperties,
    pub veg: VegetationConfig,
    pub veg_lib: VegLibrary,
}

impl Fixture {
    pub fn new(veg: VegetationConfig, area_fract: Vec<f64>) -> Self {
        Self {
            forcing: ForcingRecord {
                prec: 2.0,
                air_temp: 5.0,
                ..Default::default()
            },
            date: StepDate::default(),
            global: GlobalParams::default(),
            lake: LakeConfig::none(),
            soil: soil(area_fract),
            veg,
            veg_lib: library(),
        }
    }

    pub fn inputs(&self) -> StepInputs<'_> {
        StepInputs {
            forcing: &self.forcing,
            date: &self.date,
            global: &self.global,
            lake: &self.lake,
            soil: &self.soil,
            veg: &self.veg,
            veg_lib: &self.veg_lib,
        }
    }

    pub fn state(&self, config: &ModelConfig) -> CellState {
        CellState::new(
            &self.veg,
            self.soil.n_bands(),
            config.options.n_layers,
            config.options.n_canopy_layers,
        )
    }
}

// ============================================================
// 子模型桩
// ============================================================

/// 空气动力学桩；`fail_on_call` 为第几次调用（从 0 计）时返回错误
#[derive(Default)]
pub struct StubAero {
    pub calls: AtomicUsize,
    pub inputs: Mutex<Vec<AeroInput>>,
    pub fail_on_call: Option<usize>,
}

impl StubAero {
    pub fn failing_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Default::default()
        }
    }
}

impl AerodynamicsEngine for StubAero {
    fn profile(&self, input: &AeroInput) -> ComputeResult<AeroProfile> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(ComputationError::aerodynamics(call, "参考高度低于粗糙度"));
        }
        self.inputs.lock().unwrap().push(*input);
        Ok(AeroProfile {
            resistance: AeroArray([50.0, 80.0, 120.0]),
            wind: input.wind,
            displacement: input.displacement,
            ref_height: input.ref_height,
            roughness: input.roughness,
        })
    }
}

/// 地表通量桩
///
/// 气温高于 0 °C 时全部为雨，否则全部为雪。写入固定的径流与净短波，
/// 并记录看到的冠层状态。
#[derive(Default)]
pub struct StubFlux {
    pub calls: AtomicUsize,
    pub visited: Mutex<Vec<(usize, usize)>>,
    pub fail_tile: Option<usize>,
    pub seen_lai: Mutex<Vec<f64>>,
    pub seen_wdmax: Mutex<Vec<f64>>,
    pub seen_gauge: Mutex<Vec<GaugeCorrection>>,
    pub seen_resist: Mutex<Vec<[f64; 2]>>,
    pub seen_transients: Mutex<Vec<Transients>>,
    pub seen_routing: Mutex<Vec<RoutingParams>>,
}

/// 求解器入口处看到的时间步瞬时量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transients {
    pub shortwave: f64,
    pub longwave: f64,
    pub vapor_flux: f64,
    pub canopy_vapor_flux: f64,
}

impl StubFlux {
    pub fn failing_on(tile: usize) -> Self {
        Self {
            fail_tile: Some(tile),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SurfaceFluxSolver for StubFlux {
    fn solve(&self, input: &FluxInput<'_>, state: &mut BandState) -> ComputeResult<FluxOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.visited.lock().unwrap().push((input.tile, input.band));
        if self.fail_tile == Some(input.tile) {
            return Err(ComputationError::surface_flux(input.tile, input.band, "能量平衡不收敛"));
        }
        self.seen_lai.lock().unwrap().push(state.canopy.lai);
        self.seen_wdmax.lock().unwrap().push(state.canopy.wdmax);
        self.seen_gauge.lock().unwrap().push(input.gauge_correction);
        self.seen_resist.lock().unwrap().push(state.soil.aero_resist);
        self.seen_transients.lock().unwrap().push(Transients {
            shortwave: state.energy.shortwave,
            longwave: state.energy.longwave,
            vapor_flux: state.snow.vapor_flux,
            canopy_vapor_flux: state.snow.canopy_vapor_flux,
        });
        self.seen_routing.lock().unwrap().push(input.veg_tile.routing);

        state.energy.net_short_atmos = 0.85 * input.forcing.shortwave;
        state.soil.runoff = 3.0;
        state.soil.baseflow = 0.5;

        let prec = input.forcing.prec;
        let precip = if input.forcing.air_temp > 0.0 {
            PrecipPartition::from_phases(prec, 0.0)
        } else {
            PrecipPartition::from_phases(0.0, prec)
        };
        Ok(FluxOutput { precip, melt: 0.0 })
    }
}

/// 湖泊能量平衡桩：写入新冰盖面积供水量平衡检查调用顺序
#[derive(Default)]
pub struct StubLakeEnergy {
    pub calls: AtomicUsize,
    pub seen: Mutex<Option<LakeEnergySeen>>,
}

#[derive(Debug, Clone, Copy)]
pub struct LakeEnergySeen {
    pub rain_prec: f64,
    pub snow_prec: f64,
    pub vp: f64,
    pub vpd: f64,
    pub pressure: f64,
    pub ice_fraction: f64,
}

impl LakeEnergySolver for StubLakeEnergy {
    fn solve(&self, input: &LakeEnergyInput<'_>, lake: &mut LakeState) -> ComputeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = Some(LakeEnergySeen {
            rain_prec: input.rain_prec,
            snow_prec: input.snow_prec,
            vp: input.vp,
            vpd: input.vpd,
            pressure: input.pressure,
            ice_fraction: input.ice_fraction,
        });
        lake.new_ice_area = 123.0;
        Ok(())
    }
}

#[derive(Default)]
pub struct StubLakeWater {
    pub calls: AtomicUsize,
    pub seen: Mutex<Option<LakeWaterSeen>>,
}

#[derive(Debug, Clone, Copy)]
pub struct LakeWaterSeen {
    pub tile: usize,
    pub band: usize,
    pub lake_fraction: f64,
    pub new_ice_area: f64,
    pub runoff_in: f64,
    pub baseflow_in: f64,
    pub prec: f64,
}

impl LakeWaterBalanceSolver for StubLakeWater {
    fn solve(
        &self,
        input: &LakeWaterInput<'_>,
        lake: &mut LakeState,
        tiles: &mut [TileState],
    ) -> ComputeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = Some(LakeWaterSeen {
            tile: input.tile,
            band: input.band,
            lake_fraction: input.lake_fraction,
            new_ice_area: lake.new_ice_area,
            runoff_in: lake.runoff_in,
            baseflow_in: lake.baseflow_in,
            prec: lake.prec,
        });
        tiles[input.tile].bands[input.band].soil.pot_evap = 1.0;
        Ok(())
    }
}

/// 总是失败的湖泊能量平衡
pub struct FailingLakeEnergy;

impl LakeEnergySolver for FailingLakeEnergy {
    fn solve(&self, _input: &LakeEnergyInput<'_>, _lake: &mut LakeState) -> ComputeResult<()> {
        Err(ComputationError::lake_energy("冰面温度迭代不收敛"))
    }
}

/// 总是失败的湖泊水量平衡
#[derive(Default)]
pub struct FailingLakeWater {
    pub calls: AtomicUsize,
}

impl LakeWaterBalanceSolver for FailingLakeWater {
    fn solve(
        &self,
        _input: &LakeWaterInput<'_>,
        _lake: &mut LakeState,
        _tiles: &mut [TileState],
    ) -> ComputeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ComputationError::lake_water_balance("湖泊蓄量为负"))
    }
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

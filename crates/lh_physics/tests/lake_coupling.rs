// crates/lh_physics/tests/lake_coupling.rs

//! 湖泊/湿地耦合场景测试

mod common;

use std::sync::atomic::Ordering;

use common::*;
use lh_physics::{
    ComputationError, ComputeResult, LakeConfig, RainSnowPartition, SkipReason, StepOrchestrator,
    StepPhase, SubModels, VegetationConfig,
};

/// 植被块 Cv 0.6 + 湖泊块 Cv 0.4，湖面比例 0.25，冰盖比例 0.25
fn lake_fixture(area_fract: Vec<f64>) -> Fixture {
    let mut fx = Fixture::new(
        VegetationConfig::new(vec![veg_tile(0.6), veg_tile(0.4).with_lake()], bare_tile(0.0)),
        area_fract,
    );
    fx.lake = LakeConfig {
        lake_idx: Some(1),
        basin: vec![4.0e5, 2.0e5],
        rpercent: 0.2,
    };
    fx
}

struct LakeStubs {
    aero: StubAero,
    flux: StubFlux,
    energy: StubLakeEnergy,
    water: StubLakeWater,
}

impl LakeStubs {
    fn new() -> Self {
        Self {
            aero: StubAero::default(),
            flux: StubFlux::default(),
            energy: StubLakeEnergy::default(),
            water: StubLakeWater::default(),
        }
    }

    fn models(&self) -> SubModels<'_> {
        SubModels::new(&self.aero, &self.flux).with_lake(&self.energy, &self.water)
    }
}

#[test]
fn test_lake_scenario() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;
    state.lake.new_ice_area = 2.5e4;

    let report = orchestrator.step(&fx.inputs(), &mut state).unwrap();

    assert_eq!(report.processed.len(), 2);
    assert!(approx(report.processed[1].cv, 0.3, 1e-12));
    assert!(approx(report.processed_area, 0.9, 1e-12));
    assert!(approx(report.lake_area, 0.1, 1e-12));
    assert!(approx(report.processed_area + report.skipped_area + report.lake_area, 1.0, 1e-12));
    assert!(report.lake_ran);
    assert_eq!(
        report.phases,
        vec![
            StepPhase::Init,
            StepPhase::TileLoop,
            StepPhase::AlbedoAggregate,
            StepPhase::LakeRunoff,
            StepPhase::LakeBalance,
            StepPhase::Done
        ]
    );

    // 0.6·2 + 0.3·2 + 湖面 0.1·2
    assert!(approx(state.averages.prec, 2.0, 1e-12));
    assert!(approx(state.averages.rain, 2.0, 1e-12));
    assert!(approx(state.lake.areai, 2.5e4, 1e-9));

    assert_eq!(stubs.energy.calls.load(Ordering::SeqCst), 1);
    assert_eq!(stubs.water.calls.load(Ordering::SeqCst), 1);

    let energy = stubs.energy.seen.lock().unwrap().unwrap();
    assert!(approx(energy.rain_prec, 2.0, 1e-12));
    assert_eq!(energy.snow_prec, 0.0);
    assert!(approx(energy.vp, 1.0, 1e-12));
    assert!(approx(energy.vpd, 0.2, 1e-12));
    assert!(approx(energy.pressure, 101.325, 1e-12));
    assert!(approx(energy.ice_fraction, 0.25, 1e-12));

    let water = stubs.water.seen.lock().unwrap().unwrap();
    assert_eq!((water.tile, water.band), (1, 0));
    assert!(approx(water.lake_fraction, 0.25, 1e-12));
    // 能量平衡先于水量平衡
    assert_eq!(water.new_ice_area, 123.0);
    // (3·0.6·0.2 + 3·0.3) · 1e6 / 1000
    assert!(approx(water.runoff_in, 1260.0, 1e-6));
    // (0.5·0.6·0.2 + 0.5·0.3) · 1e6 / 1000
    assert!(approx(water.baseflow_in, 210.0, 1e-6));
    assert!(approx(water.prec, 200.0, 1e-9));
}

#[test]
fn test_runoff_redistributed_to_lake() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    orchestrator.step(&fx.inputs(), &mut state).unwrap();

    let upland = &state.band(0, 0).soil;
    assert!(approx(upland.runoff, 2.4, 1e-12));
    assert!(approx(upland.baseflow, 0.4, 1e-12));
    let wetland = &state.band(1, 0).soil;
    assert_eq!(wetland.runoff, 0.0);
    assert_eq!(wetland.baseflow, 0.0);
    // 水量平衡可修改湿地状态
    assert_eq!(wetland.pot_evap, 1.0);
}

#[test]
fn test_lakes_disabled() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;
    state.lake.new_ice_area = 2.5e4;

    let report = orchestrator.step(&fx.inputs(), &mut state).unwrap();

    assert!(!report.lake_ran);
    assert!(!report.phases.contains(&StepPhase::LakeRunoff));
    assert_eq!(stubs.energy.calls.load(Ordering::SeqCst), 0);
    assert_eq!(stubs.water.calls.load(Ordering::SeqCst), 0);
    // 湖泊标记被忽略，湖泊块按普通植被块处理
    assert!(approx(report.processed_area, 1.0, 1e-12));
    assert_eq!(report.lake_area, 0.0);
    for tile in 0..2 {
        assert_eq!(state.band(tile, 0).soil.runoff, 3.0);
        assert_eq!(state.band(tile, 0).soil.baseflow, 0.5);
    }
    assert_eq!(state.lake.areai, 0.0);
    assert!(approx(state.averages.prec, 2.0, 1e-12));
}

#[test]
fn test_missing_lake_models_rejected() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, SubModels::new(&stubs.aero, &stubs.flux));
    let mut state = fx.state(&config);

    let result = orchestrator.step(&fx.inputs(), &mut state);
    assert!(matches!(result, Err(ComputationError::InconsistentState(_))));
    assert_eq!(stubs.flux.calls(), 0);
}

#[test]
fn test_lake_energy_failure_aborts() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let failing = FailingLakeEnergy;
    let models = SubModels::new(&stubs.aero, &stubs.flux).with_lake(&failing, &stubs.water);
    let orchestrator = StepOrchestrator::new(&config, models);
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    let mut trace = Vec::new();
    let result = orchestrator.step_traced(&fx.inputs(), &mut state, &mut trace);

    assert!(matches!(result, Err(ComputationError::LakeEnergy(_))));
    assert_eq!(stubs.water.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        &trace[trace.len() - 2..],
        &[StepPhase::LakeBalance, StepPhase::Aborted]
    );
}

#[test]
fn test_lake_water_failure_aborts() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let failing = FailingLakeWater::default();
    let models = SubModels::new(&stubs.aero, &stubs.flux).with_lake(&stubs.energy, &failing);
    let orchestrator = StepOrchestrator::new(&config, models);
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    let mut trace = Vec::new();
    let result = orchestrator.step_traced(&fx.inputs(), &mut state, &mut trace);

    assert!(matches!(result, Err(ComputationError::LakeWaterBalance(_))));
    assert_eq!(stubs.energy.calls.load(Ordering::SeqCst), 1);
    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        &trace[trace.len() - 2..],
        &[StepPhase::LakeBalance, StepPhase::Aborted]
    );
}

/// 湖面降水全部归为降雪
struct AllSnow;

impl RainSnowPartition for AllSnow {
    fn rain_only(
        &self,
        _air_temp: f64,
        _prec: f64,
        _max_snow_temp: f64,
        _min_rain_temp: f64,
    ) -> ComputeResult<f64> {
        Ok(0.0)
    }
}

#[test]
fn test_lake_partition_replaced() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models().with_partition(&AllSnow));
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    orchestrator.step(&fx.inputs(), &mut state).unwrap();

    // 气温 5 °C 时默认分相全为降雨
    let energy = stubs.energy.seen.lock().unwrap().unwrap();
    assert_eq!(energy.rain_prec, 0.0);
    assert!(approx(energy.snow_prec, 2.0, 1e-12));
}

#[test]
fn test_lake_partition_thresholds_invalid() {
    let fx = lake_fixture(vec![1.0]);
    let mut config = config(1).with_lakes(true);
    config.parameters.snow_max_snow_temp = -1.0;
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    let result = orchestrator.step(&fx.inputs(), &mut state);
    assert!(matches!(result, Err(ComputationError::RainSnowPartition { .. })));
    assert_eq!(stubs.energy.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_lake_precip_mixed_phase() {
    let mut fx = lake_fixture(vec![1.0]);
    fx.forcing.air_temp = 0.0;
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    orchestrator.step(&fx.inputs(), &mut state).unwrap();

    let energy = stubs.energy.seen.lock().unwrap().unwrap();
    assert!(approx(energy.rain_prec, 1.0, 1e-12));
    assert!(approx(energy.snow_prec, 1.0, 1e-12));
}

/// 湖面降雨与降雪都使用降雪校正系数
#[test]
fn test_lake_precip_uses_snow_gauge_factor() {
    let fx = lake_fixture(vec![1.0]);
    let mut config = config(1).with_lakes(true);
    config.options.corrprec = true;
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    orchestrator.step(&fx.inputs(), &mut state).unwrap();

    let gauge = stubs.flux.seen_gauge.lock().unwrap()[0];
    assert!(gauge.snow > 1.0);
    let energy = stubs.energy.seen.lock().unwrap().unwrap();
    assert!(approx(energy.rain_prec, 2.0 * gauge.snow, 1e-12));
}

#[test]
fn test_lake_fully_covers_tile() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 4.0e5;

    let report = orchestrator.step(&fx.inputs(), &mut state).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.tile == 1 && s.reason == SkipReason::LakeCovered));
    assert!(approx(report.lake_area, 0.4, 1e-12));
    assert!(approx(state.averages.prec, 2.0, 1e-12));
    assert_eq!(stubs.water.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lake_tile_single_band() {
    let fx = lake_fixture(vec![0.6, 0.4]);
    let config = config(2).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;

    let report = orchestrator.step(&fx.inputs(), &mut state).unwrap();

    assert_eq!(
        *stubs.flux.visited.lock().unwrap(),
        vec![(0, 0), (0, 1), (1, 0)]
    );
    let beyond = report
        .skipped
        .iter()
        .find(|s| s.reason == SkipReason::LakeSingleBand)
        .unwrap();
    assert_eq!((beyond.tile, beyond.band), (1, 1));
    assert!(approx(beyond.area, 0.12, 1e-12));
    assert!(approx(report.processed_area + report.skipped_area + report.lake_area, 1.0, 1e-12));
}

#[test]
fn test_negative_ice_area_clamped() {
    let fx = lake_fixture(vec![1.0]);
    let config = config(1).with_lakes(true);
    let stubs = LakeStubs::new();
    let orchestrator = StepOrchestrator::new(&config, stubs.models());
    let mut state = fx.state(&config);
    state.lake.sarea = 1.0e5;
    state.lake.new_ice_area = -5.0;

    orchestrator.step(&fx.inputs(), &mut state).unwrap();

    assert_eq!(state.lake.areai, 0.0);
    let energy = stubs.energy.seen.lock().unwrap().unwrap();
    assert_eq!(energy.ice_fraction, 0.0);
}

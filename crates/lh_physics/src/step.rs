// crates/lh_physics/src/step.rs

//! 单元时间步编排
//!
//! 状态机：
//!
//! ```text
//! Init → TileLoop → AlbedoAggregate → [LakeRunoff → LakeBalance] → Done
//!                     任一阶段失败 → Aborted
//! ```
//!
//! 出错不重试。已累加到 `CellState::averages` 的部分结果保留，
//! 调用方应把 `Err` 视为整个时间步无效。

use lh_config::ModelConfig;
use lh_foundation::LhError;

use crate::accumulator::{gridcell_albedo, AreaAccumulator, PrecipPartition};
use crate::aero;
use crate::canopy::{root_zone_moisture, soil_wetness, surface_attenuation, CanopyScale};
use crate::carbon;
use crate::error::ComputeResult;
use crate::forcing::{ForcingRecord, GlobalParams, StepDate};
use crate::lake::{redistribute_runoff, LakeCoupler, LakeStepContext};
use crate::models::{FluxInput, SubModels};
use crate::params::{LakeConfig, SoilProperties, TileKind, VegLibrary, VegetationConfig};
use crate::precip::GaugeCorrection;
use crate::state::{CellAverages, CellState};
use crate::tiles::{Decomposition, LakeFractions, SkippedPair, TileBand, TileDecomposer};

// ============================================================
// 阶段与结果
// ============================================================

/// 时间步阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepPhase {
    /// 初始化：校验维度、雨量计校正、清零累加量、湖泊面积比例
    Init,
    /// 逐 (植被块, 高程带) 求解
    TileLoop,
    /// 单元平均反照率
    AlbedoAggregate,
    /// 湖泊径流再分配
    LakeRunoff,
    /// 湖泊能量与水量平衡
    LakeBalance,
    /// 完成
    Done,
    /// 中止
    Aborted,
}

/// 时间步状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// 成功
    Ok,
    /// 失败
    Error,
}

impl<T> From<&ComputeResult<T>> for StepStatus {
    fn from(result: &ComputeResult<T>) -> Self {
        match result {
            Ok(_) => StepStatus::Ok,
            Err(_) => StepStatus::Error,
        }
    }
}

/// 单元时间步的只读输入
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    /// 大气驱动
    pub forcing: &'a ForcingRecord,
    /// 日期
    pub date: &'a StepDate,
    /// 全局参数
    pub global: &'a GlobalParams,
    /// 湖泊参数
    pub lake: &'a LakeConfig,
    /// 土壤参数
    pub soil: &'a SoilProperties,
    /// 植被块列表
    pub veg: &'a VegetationConfig,
    /// 植被类型库
    pub veg_lib: &'a VegLibrary,
}

/// 单元时间步报告
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// 依次经过的阶段
    pub phases: Vec<StepPhase>,
    /// 已处理的 (植被块, 高程带) 对，按处理顺序
    pub processed: Vec<TileBand>,
    /// 被跳过的对
    pub skipped: Vec<SkippedPair>,
    /// 地表通量求解次数
    pub flux_calls: usize,
    /// 空气动力学求解次数
    pub aero_calls: usize,
    /// 湖泊分支是否运行
    pub lake_ran: bool,
    /// 单元降水分相（含湖面）
    pub precip: PrecipPartition,
    /// 面积加权融雪量
    pub melt: f64,
    /// 参与计算的面积
    pub processed_area: f64,
    /// 被跳过的面积
    pub skipped_area: f64,
    /// 湖面面积
    pub lake_area: f64,
}

// ============================================================
// 编排器
// ============================================================

/// 单元时间步编排器
pub struct StepOrchestrator<'a> {
    config: &'a ModelConfig,
    models: SubModels<'a>,
}

impl<'a> StepOrchestrator<'a> {
    /// 创建编排器
    pub fn new(config: &'a ModelConfig, models: SubModels<'a>) -> Self {
        Self { config, models }
    }

    /// 模型配置
    #[inline]
    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    /// 推进一个时间步
    pub fn step(&self, inputs: &StepInputs<'_>, state: &mut CellState) -> ComputeResult<StepReport> {
        let mut trace = Vec::new();
        self.step_traced(inputs, state, &mut trace)
    }

    /// 推进一个时间步并返回状态码
    pub fn run_step(&self, inputs: &StepInputs<'_>, state: &mut CellState) -> StepStatus {
        StepStatus::from(&self.step(inputs, state))
    }

    /// 推进一个时间步，`trace` 记录经过的阶段
    ///
    /// 失败时 `trace` 以 [`StepPhase::Aborted`] 结尾。
    pub fn step_traced(
        &self,
        inputs: &StepInputs<'_>,
        state: &mut CellState,
        trace: &mut Vec<StepPhase>,
    ) -> ComputeResult<StepReport> {
        trace.clear();
        match self.execute(inputs, state, trace) {
            Ok(mut report) => {
                trace.push(StepPhase::Done);
                report.phases = trace.clone();
                Ok(report)
            }
            Err(err) => {
                log::debug!("时间步在 {:?} 阶段中止: {err}", trace.last());
                trace.push(StepPhase::Aborted);
                Err(err)
            }
        }
    }

    fn execute(
        &self,
        inputs: &StepInputs<'_>,
        state: &mut CellState,
        trace: &mut Vec<StepPhase>,
    ) -> ComputeResult<StepReport> {
        let options = &self.config.options;
        let params = &self.config.parameters;

        // ---------- Init ----------
        trace.push(StepPhase::Init);
        self.validate(inputs, state)?;

        let lake_idx = self.active_lake(inputs);
        let lake_models = match (lake_idx, self.models.lake) {
            (Some(_), None) => {
                return Err(LhError::invalid_input("启用了湖泊模型但未提供湖泊子模型").into());
            }
            (_, models) => models,
        };

        let gauge_correction =
            GaugeCorrection::for_step(options, params, inputs.forcing, inputs.global, inputs.soil);
        state.averages = CellAverages::default();

        let fractions = lake_idx.map(|_| LakeFractions::update(&mut state.lake, inputs.lake));
        let decomposition = TileDecomposer::new(inputs.veg, inputs.soil).decompose(fractions);

        let mut acc = AreaAccumulator::new();
        let mut report = StepReport {
            processed: decomposition.pairs().copied().collect(),
            skipped: decomposition.skipped().to_vec(),
            processed_area: decomposition.processed_area(),
            skipped_area: decomposition.skipped_area(),
            lake_area: decomposition.lake_area(),
            ..Default::default()
        };

        // ---------- TileLoop ----------
        trace.push(StepPhase::TileLoop);
        self.tile_loop(inputs, state, &decomposition, gauge_correction, &mut acc, &mut report)?;

        // ---------- AlbedoAggregate ----------
        trace.push(StepPhase::AlbedoAggregate);
        state.averages.albedo =
            gridcell_albedo(inputs.forcing.shortwave, &decomposition, &state.tiles);

        // ---------- Lake ----------
        if let (Some(lake_idx), Some(models), Some(fractions)) = (lake_idx, lake_models, fractions) {
            log::debug!(
                "湖泊分支: 植被块 {lake_idx}, 湖面比例 {:.4}, 冰盖比例 {:.4}",
                fractions.lake_fraction,
                fractions.ice_fraction
            );

            trace.push(StepPhase::LakeRunoff);
            let routed = redistribute_runoff(&decomposition, state, inputs.lake.rpercent);

            trace.push(StepPhase::LakeBalance);
            let coupler = LakeCoupler {
                config: inputs.lake,
                lake_idx,
                models,
                partition: self.models.partition,
                params,
            };
            let ctx = LakeStepContext {
                forcing: inputs.forcing,
                date: inputs.date,
                global: inputs.global,
                soil: inputs.soil,
                veg: inputs.veg,
                gauge_correction,
                fractions,
            };
            coupler.balance(&ctx, &routed, state, &mut acc)?;
            publish(&acc, &mut state.averages);
            report.lake_ran = true;
        }

        report.precip = acc.totals();
        report.melt = acc.melt();
        Ok(report)
    }

    /// 进入状态修改前的一致性检查
    fn validate(&self, inputs: &StepInputs<'_>, state: &CellState) -> ComputeResult<()> {
        let options = &self.config.options;
        inputs.soil.validate(options.n_layers, options.snow_bands)?;
        inputs.veg.validate(options.n_layers, inputs.veg_lib)?;
        state.validate_dimensions(
            inputs.veg,
            inputs.soil,
            options.n_layers,
            options.n_canopy_layers,
            options.carbon,
        )?;
        if options.carbon {
            for tile in &inputs.veg.tiles()[..inputs.veg.n_veg()] {
                LhError::check_size(
                    "veg.canopy_layer_bnd",
                    options.n_canopy_layers,
                    tile.canopy_layer_bnd.len(),
                )?;
            }
        }
        Ok(())
    }

    /// 本步有效的湖泊块索引
    fn active_lake(&self, inputs: &StepInputs<'_>) -> Option<usize> {
        if !self.config.options.lakes {
            return None;
        }
        match inputs.lake.lake_idx {
            Some(idx) if idx < inputs.veg.len() => Some(idx),
            Some(idx) => {
                log::warn!("湖泊块索引 {idx} 超出植被块数量 {}，跳过湖泊分支", inputs.veg.len());
                None
            }
            None => None,
        }
    }

    fn tile_loop(
        &self,
        inputs: &StepInputs<'_>,
        state: &mut CellState,
        decomposition: &Decomposition,
        gauge_correction: GaugeCorrection,
        acc: &mut AreaAccumulator,
        report: &mut StepReport,
    ) -> ComputeResult<()> {
        let options = &self.config.options;
        let params = &self.config.parameters;
        let forcing = inputs.forcing;
        let soil = inputs.soil;
        let n_veg = inputs.veg.n_veg();

        for plan in decomposition.tiles() {
            let veg_tile = inputs.veg.tile(plan.tile);
            let class = inputs.veg_lib.class(veg_tile.veg_class);

            // 植被块级量取第 0 个高程带的持久化冠层状态
            let band0 = &state.band(plan.tile, 0).canopy;
            let aero_input = aero::build_input(class, band0, soil, forcing.wind, params);
            let surf_atten = surface_attenuation(band0.fcanopy, class.rad_atten, band0.lai);
            let bare_albedo = match plan.kind {
                TileKind::BareSoil => params.albedo_bare_soil,
                TileKind::Vegetated => band0.albedo,
            };

            let profile = self.models.aero.profile(&aero_input)?;
            report.aero_calls += 1;

            for pair in &plan.bands {
                log::trace!("求解植被块 {} 高程带 {}", pair.tile, pair.band);
                let band = state.band_mut(pair.tile, pair.band);

                let moisture = self.models.energy_prep.prepare(&band.soil, &mut band.energy, soil);

                band.soil.aero_resist = profile.soil_resistance();
                band.soil.pot_evap = 0.0;

                let scale = CanopyScale::new(band.canopy.fcanopy, params.min_fcanopy);
                scale.to_local(&mut band.canopy, &mut band.snow, params.veg_lai_water_factor);

                band.energy.shortwave = 0.0;
                band.energy.longwave = 0.0;
                band.snow.vapor_flux = 0.0;
                band.snow.canopy_vapor_flux = 0.0;

                if plan.kind == TileKind::Vegetated {
                    band.canopy.rc = params.huge_resist;
                    if options.carbon {
                        carbon::prepare_band(
                            &mut band.canopy,
                            veg_tile,
                            class,
                            forcing.coszen,
                            inputs.date,
                            params.huge_resist,
                        );
                    }
                }

                let input = FluxInput {
                    tile: pair.tile,
                    band: pair.band,
                    kind: plan.kind,
                    n_veg,
                    veg_class: veg_tile.veg_class,
                    class,
                    veg_tile,
                    overstory: class.overstory,
                    bare_albedo,
                    moisture,
                    surf_atten,
                    aero: &profile,
                    gauge_correction,
                    n_layers: options.n_layers,
                    damping_depth: soil.dp,
                    forcing,
                    date: inputs.date,
                    global: inputs.global,
                    soil,
                };
                report.flux_calls += 1;
                let output = self.models.flux.solve(&input, band)?;

                band.soil.rootmoist = root_zone_moisture(&band.soil.layers, &veg_tile.root);
                band.soil.wetness = soil_wetness(&band.soil.layers, soil);

                scale.to_grid(&mut band.canopy, &mut band.snow);

                acc.add_pair(pair, &output.precip, output.melt);
                publish(acc, &mut state.averages);
            }
        }

        Ok(())
    }
}

/// 把累加器当前值写入单元平均量
fn publish(acc: &AreaAccumulator, averages: &mut CellAverages) {
    let totals = acc.totals();
    averages.prec = totals.prec;
    averages.rain = totals.rain;
    averages.snow = totals.snow;
}

// crates/lh_physics/src/lake.rs

//! 湖泊/湿地耦合
//!
//! 仅在启用湖泊模型且单元有有效湖泊块索引时运行，分两个阶段：
//!
//! 1. 径流再分配：湖泊块（湿地）的径流和基流全部汇入湖泊，本身清零；
//!    非湖泊块保留 (1 − rpercent)，其余 rpercent 汇入湖泊。
//! 2. 湖泊平衡：入流由深度换算为体积，湖面降水做雨雪分相，依次求解能量平衡
//!    与水量平衡。水量平衡消耗能量平衡的结果，顺序不可交换。

use lh_config::ModelParameters;
use lh_foundation::KahanSum;

use crate::accumulator::{AreaAccumulator, PrecipPartition};
use crate::constants::{MM_PER_M, PA_PER_KPA};
use crate::error::ComputeResult;
use crate::forcing::{ForcingRecord, GlobalParams, StepDate};
use crate::models::{LakeEnergyInput, LakeModels, LakeWaterInput, RainSnowPartition};
use crate::params::{LakeConfig, SoilProperties, VegetationConfig};
use crate::precip::GaugeCorrection;
use crate::state::CellState;
use crate::tiles::{Decomposition, LakeFractions};

/// 径流再分配结果（面积加权深度，mm）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunoffRedistribution {
    /// 非湖泊块径流之和
    pub sum_runoff: f64,
    /// 非湖泊块基流之和
    pub sum_baseflow: f64,
    /// 湿地径流
    pub wetland_runoff: f64,
    /// 湿地基流
    pub wetland_baseflow: f64,
}

/// 阶段 A：径流再分配
pub fn redistribute_runoff(
    decomposition: &Decomposition,
    cell: &mut CellState,
    rpercent: f64,
) -> RunoffRedistribution {
    let mut sum_runoff = KahanSum::new();
    let mut sum_baseflow = KahanSum::new();
    let mut wetland_runoff = KahanSum::new();
    let mut wetland_baseflow = KahanSum::new();

    for plan in decomposition.tiles() {
        for pair in &plan.bands {
            let w = pair.weight();
            let column = &mut cell.band_mut(pair.tile, pair.band).soil;
            if plan.lake {
                wetland_runoff.add(column.runoff * w);
                wetland_baseflow.add(column.baseflow * w);
                column.runoff = 0.0;
                column.baseflow = 0.0;
            } else {
                sum_runoff.add(column.runoff * w);
                sum_baseflow.add(column.baseflow * w);
                column.runoff *= 1.0 - rpercent;
                column.baseflow *= 1.0 - rpercent;
            }
        }
    }

    RunoffRedistribution {
        sum_runoff: sum_runoff.value(),
        sum_baseflow: sum_baseflow.value(),
        wetland_runoff: wetland_runoff.value(),
        wetland_baseflow: wetland_baseflow.value(),
    }
}

/// 湖泊耦合器
pub struct LakeCoupler<'a> {
    /// 湖泊参数
    pub config: &'a LakeConfig,
    /// 湖泊块索引
    pub lake_idx: usize,
    /// 湖泊子模型
    pub models: LakeModels<'a>,
    /// 雨雪分相
    pub partition: &'a dyn RainSnowPartition,
    /// 物理参数
    pub params: &'a ModelParameters,
}

/// 阶段 B 所需的时间步上下文
#[derive(Debug, Clone, Copy)]
pub struct LakeStepContext<'a> {
    /// 大气驱动
    pub forcing: &'a ForcingRecord,
    /// 日期
    pub date: &'a StepDate,
    /// 全局参数
    pub global: &'a GlobalParams,
    /// 土壤参数
    pub soil: &'a SoilProperties,
    /// 植被块列表
    pub veg: &'a VegetationConfig,
    /// 雨量计校正
    pub gauge_correction: GaugeCorrection,
    /// 湖泊面积比例
    pub fractions: LakeFractions,
}

impl<'a> LakeCoupler<'a> {
    /// 阶段 B：湖泊能量与水量平衡
    ///
    /// 返回湖面降水分相；其单元面积贡献已累加到 `acc`。
    pub fn balance(
        &self,
        ctx: &LakeStepContext<'_>,
        routed: &RunoffRedistribution,
        cell: &mut CellState,
        acc: &mut AreaAccumulator,
    ) -> ComputeResult<PrecipPartition> {
        let forcing = ctx.forcing;
        let soil = ctx.soil;
        let rpercent = self.config.rpercent;
        let lake = &mut cell.lake;

        lake.runoff_in =
            (routed.sum_runoff * rpercent + routed.wetland_runoff) * soil.cell_area / MM_PER_M;
        lake.baseflow_in =
            (routed.sum_baseflow * rpercent + routed.wetland_baseflow) * soil.cell_area / MM_PER_M;
        lake.channel_in = forcing.channel_in * soil.cell_area / MM_PER_M;
        lake.prec = forcing.prec * lake.sarea / MM_PER_M;

        let rain_only = self.partition.rain_only(
            forcing.air_temp,
            forcing.prec,
            self.params.snow_max_snow_temp,
            self.params.snow_min_rain_temp,
        )?;

        // 两个分量均使用降雪校正系数
        let snow_prec = ctx.gauge_correction.snow * (forcing.prec - rain_only);
        let rain_prec = ctx.gauge_correction.snow * rain_only;
        let lake_precip = PrecipPartition::from_phases(rain_prec, snow_prec);

        let lake_cv = ctx.veg.tile(self.lake_idx).cv * ctx.fractions.lake_fraction;
        acc.add_weighted(&lake_precip, lake_cv);

        let energy_input = LakeEnergyInput {
            snow_prec,
            rain_prec,
            air_temp: forcing.air_temp,
            wind: forcing.wind,
            vp: forcing.vp / PA_PER_KPA,
            shortwave: forcing.shortwave,
            longwave: forcing.longwave,
            vpd: forcing.vpd / PA_PER_KPA,
            pressure: forcing.pressure / PA_PER_KPA,
            density: forcing.density,
            soil,
            dt: ctx.global.dt,
            wind_h: ctx.global.wind_h,
            date: ctx.date,
            ice_fraction: ctx.fractions.ice_fraction,
        };
        self.models.energy.solve(&energy_input, lake)?;

        let water_input = LakeWaterInput {
            config: self.config,
            dt: ctx.global.dt,
            tile: self.lake_idx,
            band: 0,
            lake_fraction: ctx.fractions.lake_fraction,
            soil,
            veg_tile: ctx.veg.tile(self.lake_idx),
        };
        self.models.water.solve(&water_input, &mut cell.lake, &mut cell.tiles)?;

        Ok(lake_precip)
    }
}

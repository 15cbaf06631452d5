// crates/lh_physics/src/precip.rs

//! 降水校正与雨雪分相
//!
//! - [`GaugeCorrection`]: 雨量计风致漏测校正系数，整个网格单元共用
//! - [`LinearRainSnowPartition`]: 在两个温度阈值之间线性过渡的雨雪分相

use lh_config::{ModelOptions, ModelParameters};

use crate::error::{ComputationError, ComputeResult};
use crate::forcing::{ForcingRecord, GlobalParams};
use crate::models::RainSnowPartition;
use crate::params::SoilProperties;

/// 雨量计漏测校正系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeCorrection {
    /// 降雨校正系数
    pub rain: f64,
    /// 降雪校正系数
    pub snow: f64,
}

impl GaugeCorrection {
    /// 不校正
    pub const NONE: Self = Self { rain: 1.0, snow: 1.0 };

    /// 根据风速计算校正系数
    ///
    /// 风速先按对数廓线换算到雨量计高度，再代入经验关系
    /// `100 / exp(a − b · w^c)`。风速不为正时不校正。
    pub fn from_wind(wind: f64, wind_h: f64, rough: f64, snow_rough: f64, gauge_height: f64) -> Self {
        if wind <= 0.0 {
            return Self::NONE;
        }
        let snow_wind = gauge_wind(wind, wind_h, snow_rough, gauge_height);
        let rain_wind = gauge_wind(wind, wind_h, rough, gauge_height);
        Self {
            rain: 100.0 / (4.606 - 0.041 * rain_wind.powf(0.69)).exp(),
            snow: 100.0 / (4.61 - 0.04 * snow_wind.powf(1.75)).exp(),
        }
    }

    /// 本时间步的校正系数
    ///
    /// 仅在启用降水校正且有降水时计算。
    pub fn for_step(
        options: &ModelOptions,
        params: &ModelParameters,
        forcing: &ForcingRecord,
        global: &GlobalParams,
        soil: &SoilProperties,
    ) -> Self {
        if options.corrprec && forcing.prec > 0.0 {
            Self::from_wind(
                forcing.wind,
                global.wind_h,
                soil.rough,
                soil.snow_rough,
                params.gauge_height,
            )
        } else {
            Self::NONE
        }
    }
}

impl Default for GaugeCorrection {
    fn default() -> Self {
        Self::NONE
    }
}

fn gauge_wind(wind: f64, wind_h: f64, z0: f64, gauge_height: f64) -> f64 {
    if z0 > 0.0 && wind_h > z0 {
        wind * ((gauge_height + z0) / z0).ln() / (wind_h / z0).ln()
    } else {
        wind
    }
}

/// 线性雨雪分相
///
/// 气温不低于最高降雪气温时全部为雨，不高于最低降雨气温时全部为雪，
/// 两者之间线性过渡。
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRainSnowPartition;

impl RainSnowPartition for LinearRainSnowPartition {
    fn rain_only(
        &self,
        air_temp: f64,
        prec: f64,
        max_snow_temp: f64,
        min_rain_temp: f64,
    ) -> ComputeResult<f64> {
        if max_snow_temp <= min_rain_temp {
            return Err(ComputationError::RainSnowPartition {
                max_snow_temp,
                min_rain_temp,
            });
        }
        let rain = if air_temp >= max_snow_temp {
            prec
        } else if air_temp > min_rain_temp {
            (air_temp - min_rain_temp) / (max_snow_temp - min_rain_temp) * prec
        } else {
            0.0
        };
        Ok(rain)
    }
}

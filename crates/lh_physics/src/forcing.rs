// crates/lh_physics/src/forcing.rs

//! 时间步驱动数据
//!
//! 每个时间步由外部读取模块提供一次，核心只读不写。

use serde::{Deserialize, Serialize};

/// 单个时间步的大气驱动
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcingRecord {
    /// 降水 [mm]
    pub prec: f64,
    /// 风速 [m/s]
    pub wind: f64,
    /// 气温 [°C]
    pub air_temp: f64,
    /// 入射短波辐射 [W/m²]
    pub shortwave: f64,
    /// 入射长波辐射 [W/m²]
    pub longwave: f64,
    /// 水汽压 [Pa]
    pub vp: f64,
    /// 饱和水汽压差 [Pa]
    pub vpd: f64,
    /// 气压 [Pa]
    pub pressure: f64,
    /// 空气密度 [kg/m³]
    pub density: f64,
    /// 河道入流 [mm]
    pub channel_in: f64,
    /// 太阳天顶角余弦
    pub coszen: f64,
}

impl Default for ForcingRecord {
    fn default() -> Self {
        Self {
            prec: 0.0,
            wind: 2.0,
            air_temp: 10.0,
            shortwave: 200.0,
            longwave: 300.0,
            vp: 1000.0,
            vpd: 200.0,
            pressure: 101_325.0,
            density: 1.2,
            channel_in: 0.0,
            coszen: 0.5,
        }
    }
}

/// 时间步日期
///
/// 日历换算由外部模块完成，这里只保存结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDate {
    /// 年
    pub year: i32,
    /// 月 (1-12)
    pub month: u32,
    /// 日 (1-31)
    pub day: u32,
    /// 年内第几天 (1-366)
    pub day_in_year: u32,
    /// 当日已过秒数
    pub dayseconds: u32,
}

impl StepDate {
    /// 创建日期
    pub fn new(year: i32, month: u32, day: u32, day_in_year: u32) -> Self {
        Self {
            year,
            month,
            day,
            day_in_year,
            dayseconds: 0,
        }
    }

    /// 是否为一年的第一天
    #[inline]
    pub fn is_first_day_of_year(&self) -> bool {
        self.day_in_year == 1
    }
}

impl Default for StepDate {
    fn default() -> Self {
        Self::new(2000, 6, 1, 153)
    }
}

/// 全局运行参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    /// 时间步长 [s]
    pub dt: f64,
    /// 风速观测高度 [m]
    pub wind_h: f64,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            dt: 86_400.0,
            wind_h: 10.0,
        }
    }
}

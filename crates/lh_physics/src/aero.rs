// crates/lh_physics/src/aero.rs

//! 空气动力学廓线
//!
//! 廓线数组固定三层：地面、冠层（上层林冠）、参考高度，用 [`ProfileLevel`] 索引，
//! 顺序不可调整。本模块负责为每个植被块组装 [`AeroInput`]，实际的阻抗计算由
//! [`AerodynamicsEngine`](crate::models::AerodynamicsEngine) 完成。

use std::ops::{Index, IndexMut};

use lh_config::ModelParameters;

use crate::constants::MISSING;
use crate::params::{SoilProperties, VegClass};
use crate::state::CanopyState;

/// 廓线层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ProfileLevel {
    /// 地面（或下层植被）
    Ground = 0,
    /// 冠层 / 上层林冠
    Canopy = 1,
    /// 参考高度
    Reference = 2,
}

impl ProfileLevel {
    /// 全部层，按数组顺序
    pub const ALL: [ProfileLevel; 3] = [Self::Ground, Self::Canopy, Self::Reference];

    /// 数组下标
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 三层廓线数组
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroArray(pub [f64; 3]);

impl AeroArray {
    /// 只设置地面层，其余层为缺测
    #[inline]
    pub fn ground_only(value: f64) -> Self {
        Self([value, MISSING, MISSING])
    }

    /// 底层数组
    #[inline]
    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }
}

impl Default for AeroArray {
    fn default() -> Self {
        Self::ground_only(0.0)
    }
}

impl Index<ProfileLevel> for AeroArray {
    type Output = f64;

    #[inline]
    fn index(&self, level: ProfileLevel) -> &f64 {
        &self.0[level.index()]
    }
}

impl IndexMut<ProfileLevel> for AeroArray {
    #[inline]
    fn index_mut(&mut self, level: ProfileLevel) -> &mut f64 {
        &mut self.0[level.index()]
    }
}

/// 空气动力学求解输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroInput {
    /// 是否有上层林冠
    pub overstory: bool,
    /// 植被高度 [m]
    pub height: f64,
    /// 树干高度比
    pub trunk_ratio: f64,
    /// 雪面粗糙度 [m]
    pub snow_rough: f64,
    /// 裸土粗糙度 [m]
    pub soil_rough: f64,
    /// 冠层风速衰减系数
    pub wind_atten: f64,
    /// 风速 [m/s]，仅地面层有值
    pub wind: AeroArray,
    /// 零平面位移 [m]，仅地面层有值
    pub displacement: AeroArray,
    /// 参考高度 [m]，仅地面层有值
    pub ref_height: AeroArray,
    /// 粗糙度 [m]，仅地面层有值
    pub roughness: AeroArray,
}

/// 空气动力学廓线（求解结果）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AeroProfile {
    /// 各层空气动力学阻抗 [s/m]
    pub resistance: AeroArray,
    /// 各层风速 [m/s]
    pub wind: AeroArray,
    /// 各层零平面位移 [m]
    pub displacement: AeroArray,
    /// 各层参考高度 [m]
    pub ref_height: AeroArray,
    /// 各层粗糙度 [m]
    pub roughness: AeroArray,
}

impl AeroProfile {
    /// 写入土壤柱的两层阻抗（地面、冠层）
    #[inline]
    pub fn soil_resistance(&self) -> [f64; 2] {
        [
            self.resistance[ProfileLevel::Ground],
            self.resistance[ProfileLevel::Canopy],
        ]
    }
}

/// 由零平面位移估算植被高度
#[inline]
pub fn veg_height(displacement: f64, ratio_dh_height: f64) -> f64 {
    displacement / ratio_dh_height
}

/// 参考高度
///
/// 位移低于观测高度时直接取观测高度，否则抬升到位移之上。
#[inline]
pub fn reference_height(displacement: f64, wind_h: f64, roughness: f64) -> f64 {
    if displacement < wind_h {
        wind_h
    } else {
        displacement + wind_h + roughness
    }
}

/// 组装植被块的空气动力学输入
///
/// `canopy` 取该植被块第 0 个高程带的冠层状态；粗糙度为零时退回裸土粗糙度。
pub fn build_input(
    class: &VegClass,
    canopy: &CanopyState,
    soil: &SoilProperties,
    wind: f64,
    params: &ModelParameters,
) -> AeroInput {
    let displacement = canopy.displacement;
    let roughness = if canopy.roughness == 0.0 {
        soil.rough
    } else {
        canopy.roughness
    };
    let height = veg_height(displacement, params.veg_ratio_dh_height);

    AeroInput {
        overstory: class.overstory,
        height,
        trunk_ratio: class.trunk_ratio,
        snow_rough: soil.snow_rough,
        soil_rough: soil.rough,
        wind_atten: class.wind_atten,
        wind: AeroArray::ground_only(wind),
        displacement: AeroArray::ground_only(displacement),
        ref_height: AeroArray::ground_only(reference_height(displacement, class.wind_h, roughness)),
        roughness: AeroArray::ground_only(roughness),
    }
}

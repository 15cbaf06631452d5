// crates/lh_physics/src/carbon.rs

//! 碳循环相关的时间步初始化
//!
//! 仅在启用碳循环且为植被块（非裸土）时执行。

use crate::constants::{MIN_COSZEN, MIN_NSCALE_FACTOR};
use crate::forcing::StepDate;
use crate::params::{VegClass, VegetationTile};
use crate::state::CanopyState;

/// 计算各冠层分层的氮分配因子
///
/// 消光系数 `k12 = 0.5 / coszen`。启用氮分配且 LAI > 1 时，第 c 层（c ≥ 1）
/// 取 `exp(−k12 · bnd[c−1] · LAI)`，下限 1e-10；否则各层均为 1。
pub fn nscale_factors(
    nscale_flag: bool,
    canopy_layer_bnd: &[f64],
    lai: f64,
    coszen: f64,
    factors: &mut [f64],
) {
    let k12 = 0.5 / coszen.max(MIN_COSZEN);
    for (c, factor) in factors.iter_mut().enumerate() {
        *factor = if nscale_flag && lai > 1.0 && c > 0 {
            let bnd = canopy_layer_bnd[c - 1];
            (-k12 * bnd * lai).exp().max(MIN_NSCALE_FACTOR)
        } else {
            1.0
        };
    }
}

/// 年初滚动年净初级生产力
///
/// 返回是否发生了滚动。
pub fn roll_annual_npp(canopy: &mut CanopyState, date: &StepDate) -> bool {
    if date.is_first_day_of_year() {
        canopy.annual_npp_prev = canopy.annual_npp;
        canopy.annual_npp = 0.0;
        true
    } else {
        false
    }
}

/// 时间步开始时的碳循环状态初始化（冠层局部 LAI）
pub fn prepare_band(
    canopy: &mut CanopyState,
    tile: &VegetationTile,
    class: &VegClass,
    coszen: f64,
    date: &StepDate,
    huge_resist: f64,
) {
    canopy.rs_layer.fill(huge_resist);
    canopy.apar = 0.0;
    let lai = canopy.lai;
    nscale_factors(
        class.nscale_flag,
        &tile.canopy_layer_bnd,
        lai,
        coszen,
        &mut canopy.nscale_factor,
    );
    roll_annual_npp(canopy, date);
}

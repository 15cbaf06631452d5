// crates/lh_physics/src/models/prepare.rs

//! 默认能量预处理

use crate::constants::MM_PER_M;
use crate::params::SoilProperties;
use crate::state::{EnergyState, SoilColumnState};

use super::{EnergyPreparer, TopLayerMoisture};

/// 顶部两层土壤的深度加权含水量
///
/// 冻结含水量不超过总含水量；有冻结水时标记表层冻结。
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLayerPreparer;

impl EnergyPreparer for TopLayerPreparer {
    fn prepare(
        &self,
        column: &SoilColumnState,
        energy: &mut EnergyState,
        soil: &SoilProperties,
    ) -> TopLayerMoisture {
        let n = column.layers.len().min(2).min(soil.depth.len());
        let depth_mm: f64 = soil.depth[..n].iter().sum::<f64>() * MM_PER_M;
        if depth_mm <= 0.0 {
            energy.frozen = false;
            return TopLayerMoisture::default();
        }
        let moist: f64 = column.layers[..n].iter().map(|l| l.moist).sum();
        let ice: f64 = column.layers[..n].iter().map(|l| l.ice).sum();
        let moist0 = moist / depth_mm;
        let ice0 = (ice / depth_mm).min(moist0).max(0.0);
        energy.frozen = ice0 > 0.0;
        TopLayerMoisture { moist0, ice0 }
    }
}

// crates/lh_physics/src/constants.rs

//! 单位换算常数与缺测标记

/// 每米毫米数
pub const MM_PER_M: f64 = 1000.0;

/// 每千帕帕斯卡数
pub const PA_PER_KPA: f64 = 1000.0;

/// 缺测值标记（风速廓线中尚未计算的层）
pub const MISSING: f64 = -99999.0;

/// 太阳天顶角余弦下限，避免消光系数发散
pub const MIN_COSZEN: f64 = 1e-4;

/// 氮分配因子下限
pub const MIN_NSCALE_FACTOR: f64 = 1e-10;

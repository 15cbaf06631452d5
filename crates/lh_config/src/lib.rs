// crates/lh_config/src/lib.rs

//! LandHydro Config Layer (Layer 2)
//!
//! 配置层，提供模型开关选项和物理参数表。
//! 本层只包含纯数据结构，不依赖物理层。
//!
//! # 模块概览
//!
//! - [`options`]: 模型开关（碳循环、湖泊、降水校正、高程带数等）
//! - [`parameters`]: 物理参数（裸土反照率、冠层持水系数等）
//! - [`model_config`]: 组合配置及文件加载
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: lh_physics    ─> uses ModelConfig
//! Layer 2: lh_config     ─> ModelOptions, ModelParameters (本层)
//! Layer 1: lh_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model_config;
pub mod options;
pub mod parameters;

/// 层级标识
pub const LAYER: u8 = 2;

pub use error::ConfigError;
pub use model_config::ModelConfig;
pub use options::ModelOptions;
pub use parameters::ModelParameters;

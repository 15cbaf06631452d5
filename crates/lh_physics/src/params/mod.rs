// crates/lh_physics/src/params/mod.rs

//! 静态参数
//!
//! 土壤、植被、湖泊参数在整个运行期间不变，由外部参数读取模块构建。

pub mod lake;
pub mod soil;
pub mod vegetation;

pub use lake::LakeConfig;
pub use soil::SoilProperties;
pub use vegetation::{RoutingParams, TileKind, VegClass, VegLibrary, VegetationConfig, VegetationTile};

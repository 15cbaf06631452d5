// crates/lh_config/src/options.rs

//! 模型开关选项
//!
//! 决定单元时间步中启用哪些物理分支，以及各子网格维度的大小。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 模型开关选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// 是否启用碳循环（冠层氮分配、年净初级生产力）
    #[serde(default)]
    pub carbon: bool,

    /// 是否启用湖泊/湿地模型
    #[serde(default)]
    pub lakes: bool,

    /// 是否对降水做雨量计风致漏测校正
    #[serde(default)]
    pub corrprec: bool,

    /// 高程带数量
    #[serde(default = "default_snow_bands")]
    pub snow_bands: usize,

    /// 土壤层数
    #[serde(default = "default_n_layers")]
    pub n_layers: usize,

    /// 碳循环冠层分层数
    #[serde(default = "default_n_canopy_layers")]
    pub n_canopy_layers: usize,
}

fn default_snow_bands() -> usize { 1 }
fn default_n_layers() -> usize { 3 }
fn default_n_canopy_layers() -> usize { 10 }

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            carbon: false,
            lakes: false,
            corrprec: false,
            snow_bands: default_snow_bands(),
            n_layers: default_n_layers(),
            n_canopy_layers: default_n_canopy_layers(),
        }
    }
}

impl ModelOptions {
    /// 验证选项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snow_bands == 0 {
            return Err(ConfigError::invalid(
                "options.snow_bands",
                self.snow_bands,
                "至少需要一个高程带",
            ));
        }
        // 顶部两层用于能量预处理
        if self.n_layers < 2 {
            return Err(ConfigError::invalid(
                "options.n_layers",
                self.n_layers,
                "土壤层数不能少于 2",
            ));
        }
        if self.carbon && self.n_canopy_layers == 0 {
            return Err(ConfigError::invalid(
                "options.n_canopy_layers",
                self.n_canopy_layers,
                "启用碳循环时冠层分层数必须为正",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        let opts = ModelOptions::default();
        assert!(opts.validate().is_ok());
        assert!(!opts.carbon);
        assert!(!opts.lakes);
        assert_eq!(opts.snow_bands, 1);
    }

    #[test]
    fn test_zero_bands_rejected() {
        let opts = ModelOptions {
            snow_bands: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_carbon_requires_canopy_layers() {
        let opts = ModelOptions {
            carbon: true,
            n_canopy_layers: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }
}

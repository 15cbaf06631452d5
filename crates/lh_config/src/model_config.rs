// crates/lh_config/src/model_config.rs

//! ModelConfig - 单元求解核心的组合配置
//!
//! 由调用方在运行开始时加载一次，并以只读引用传入每个时间步。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::options::ModelOptions;
use crate::parameters::ModelParameters;

/// 组合配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型开关
    #[serde(default)]
    pub options: ModelOptions,

    /// 物理参数
    #[serde(default)]
    pub parameters: ModelParameters,
}

impl ModelConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到 JSON 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options.validate()?;
        self.parameters.validate()
    }

    /// 设置碳循环开关
    pub fn with_carbon(mut self, enabled: bool) -> Self {
        self.options.carbon = enabled;
        self
    }

    /// 设置湖泊开关
    pub fn with_lakes(mut self, enabled: bool) -> Self {
        self.options.lakes = enabled;
        self
    }

    /// 设置高程带数量
    pub fn with_snow_bands(mut self, n: usize) -> Self {
        self.options.snow_bands = n;
        self
    }

    /// 设置土壤层数
    pub fn with_layers(mut self, n: usize) -> Self {
        self.options.n_layers = n;
        self
    }
}

// crates/lh_physics/src/params/vegetation.rs

//! 植被块与植被类型库
//!
//! 每个网格单元由若干植被块组成，最后附加一个裸土块。植被块引用植被类型库中的一项，
//! 类型库作为显式参数传入时间步，不存在进程级的“当前类型库”。

use serde::{Deserialize, Serialize};

use lh_foundation::{KahanSum, LhError, LhResult};

/// 植被块类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// 有植被覆盖
    Vegetated,
    /// 附加在末尾的裸土块
    BareSoil,
}

/// 汇流参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingParams {
    /// 滞后一阶自相关系数
    pub lag_one: f64,
    /// 坡度方差
    pub sigma_slope: f64,
    /// 风区长度 [m]
    pub fetch: f64,
}

/// 植被块静态参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationTile {
    /// 面积比例 Cv
    pub cv: f64,
    /// 植被类型库索引
    pub veg_class: usize,
    /// 是否承载湖泊/湿地
    #[serde(default)]
    pub lake: bool,
    /// 各土壤层根系比例
    pub root: Vec<f64>,
    /// 碳循环冠层分层边界（累计 LAI 比例）
    #[serde(default)]
    pub canopy_layer_bnd: Vec<f64>,
    /// 汇流参数
    #[serde(default)]
    pub routing: RoutingParams,
}

impl VegetationTile {
    /// 创建植被块
    pub fn new(cv: f64, veg_class: usize, root: Vec<f64>) -> Self {
        Self {
            cv,
            veg_class,
            lake: false,
            root,
            canopy_layer_bnd: Vec::new(),
            routing: RoutingParams::default(),
        }
    }

    /// 标记为湖泊块
    pub fn with_lake(mut self) -> Self {
        self.lake = true;
        self
    }

    /// 设置冠层分层边界
    pub fn with_canopy_layers(mut self, bnd: Vec<f64>) -> Self {
        self.canopy_layer_bnd = bnd;
        self
    }

    /// 设置汇流参数
    pub fn with_routing(mut self, routing: RoutingParams) -> Self {
        self.routing = routing;
        self
    }
}

/// 单元的植被块列表（裸土块位于末尾）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationConfig {
    tiles: Vec<VegetationTile>,
}

impl VegetationConfig {
    /// 由植被块与裸土块构建
    pub fn new(vegetated: Vec<VegetationTile>, bare: VegetationTile) -> Self {
        let mut tiles = vegetated;
        tiles.push(bare);
        Self { tiles }
    }

    /// 植被块数（不含裸土块）
    #[inline]
    pub fn n_veg(&self) -> usize {
        self.tiles.len() - 1
    }

    /// 全部植被块（含裸土块）
    #[inline]
    pub fn tiles(&self) -> &[VegetationTile] {
        &self.tiles
    }

    /// 获取植被块
    #[inline]
    pub fn tile(&self, idx: usize) -> &VegetationTile {
        &self.tiles[idx]
    }

    /// 植被块总数（含裸土块）
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// 是否为空（构造保证至少有裸土块）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// 植被块类别
    #[inline]
    pub fn kind(&self, idx: usize) -> TileKind {
        if idx == self.n_veg() {
            TileKind::BareSoil
        } else {
            TileKind::Vegetated
        }
    }

    /// 名义面积比例之和
    pub fn cv_sum(&self) -> f64 {
        KahanSum::sum_iter(self.tiles.iter().map(|t| t.cv))
    }

    /// 检查根系数组、类型索引与面积比例之和
    pub fn validate(&self, n_layers: usize, lib: &VegLibrary) -> LhResult<()> {
        for tile in &self.tiles {
            LhError::check_size("veg.root", n_layers, tile.root.len())?;
            LhError::check_index("VegClass", tile.veg_class, lib.len())?;
            LhError::check_range("veg.cv", tile.cv, 0.0, 1.0)?;
        }
        let sum = self.cv_sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(LhError::invalid_input(format!("植被块面积比例之和为 {sum}，应为 1")));
        }
        Ok(())
    }
}

/// 植被类型参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegClass {
    /// 是否有上层林冠
    pub overstory: bool,
    /// 风速观测高度 [m]
    pub wind_h: f64,
    /// 树干高度占植被高度比例
    pub trunk_ratio: f64,
    /// 冠层内风速衰减系数
    pub wind_atten: f64,
    /// 冠层辐射消光系数
    pub rad_atten: f64,
    /// 是否按冠层深度分配氮
    #[serde(default)]
    pub nscale_flag: bool,
}

impl Default for VegClass {
    fn default() -> Self {
        Self {
            overstory: false,
            wind_h: 2.0,
            trunk_ratio: 0.2,
            wind_atten: 0.5,
            rad_atten: 0.5,
            nscale_flag: false,
        }
    }
}

/// 植被类型库
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VegLibrary {
    classes: Vec<VegClass>,
}

impl VegLibrary {
    /// 创建类型库
    pub fn new(classes: Vec<VegClass>) -> Self {
        Self { classes }
    }

    /// 获取类型参数
    #[inline]
    pub fn class(&self, idx: usize) -> &VegClass {
        &self.classes[idx]
    }

    /// 类型数
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

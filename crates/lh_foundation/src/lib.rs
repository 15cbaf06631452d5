// crates/lh_foundation/src/lib.rs

//! LandHydro Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型和数值工具。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 补偿求和与安全浮点运算
//!
//! # 示例
//!
//! ```
//! use lh_foundation::{approx_eq_rel, KahanSum, LhError, LhResult};
//!
//! fn check(n: usize) -> LhResult<()> {
//!     LhError::check_size("area_fract", 3, n)
//! }
//!
//! let mut sum = KahanSum::new();
//! sum.add(0.6);
//! sum.add(0.4);
//! assert!(approx_eq_rel(sum.value(), 1.0, 1e-15));
//! assert!(check(3).is_ok());
//! assert!(check(2).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

pub use error::{LhError, LhResult};
pub use float::{approx_eq_rel, safe_div, KahanSum};

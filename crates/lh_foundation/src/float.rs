// crates/lh_foundation/src/float.rs

//! 数值工具
//!
//! 面积加权累加需要与遍历顺序无关的结果，这里提供 Kahan 补偿求和器，
//! 以及带回退值的安全除法。

/// 安全除法的分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-14;

/// 安全除法
///
/// 分母接近零或结果非有限时返回 `fallback`。
#[inline]
pub fn safe_div(a: f64, b: f64, fallback: f64) -> f64 {
    if b.abs() < SAFE_DIV_EPSILON {
        fallback
    } else {
        let result = a / b;
        if result.is_finite() {
            result
        } else {
            fallback
        }
    }
}

/// 相对容差比较
#[inline]
pub fn approx_eq_rel(a: f64, b: f64, rel_tol: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel_tol * scale
}

/// 补偿求和器（Neumaier 形式）
///
/// 单元总量由各 (植被块, 高程带) 的 `值 × Cv × AreaFract` 累加而成，
/// 各项量级可相差多个数量级（如湖面体积与小面积高程带）。补偿项记录每次加法
/// 的舍入误差，使结果不依赖于植被块的遍历顺序。
///
/// # 示例
///
/// ```
/// use lh_foundation::float::KahanSum;
///
/// // 三个植被块各占 1/3，降水 2 mm
/// let mut total = KahanSum::new();
/// for _ in 0..3 {
///     total.add(2.0 / 3.0);
/// }
/// assert!((total.value() - 2.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 零累加器
    #[inline]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// 累加一项
    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        // 较小的加数丢失低位
        self.compensation += if self.sum.abs() >= value.abs() {
            (self.sum - t) + value
        } else {
            (value - t) + self.sum
        };
        self.sum = t;
    }

    /// 补偿后的总和
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }

    /// 清零
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 对迭代器求和
    pub fn sum_iter<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
        let mut acc = Self::new();
        acc.extend(iter);
        acc.value()
    }
}

impl Extend<f64> for KahanSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl std::iter::Sum<f64> for KahanSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

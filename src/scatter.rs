//! # 索引打散模块
//!
//! 根据种子字符串生成载体单元索引的确定性排列，使隐藏位分散在整个载体上。
//!
//! 伪随机源是以字符码之和作为初始状态的线性同余生成器，驱动 Fisher-Yates 洗牌。
//! 它**不是**密码学安全的：不同种子可能碰撞 (例如字符相同、顺序不同的种子)，
//! 周期也很短。算法必须与既有载体逐位兼容，因此不能替换为更强的生成器。

use std::ops::Range;

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};

/// 模 2^32 线性同余生成器。
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// 以种子的 UTF-16 码元之和 (模 2^32) 作为初始状态，最小为 1。
    pub fn from_seed(seed: &str) -> Self {
        let sum = seed
            .encode_utf16()
            .fold(0u32, |acc, unit| acc.wrapping_add(u32::from(unit)));
        Self { state: sum.max(1) }
    }

    /// 推进状态并返回 `[0, 1)` 区间内的浮点数。
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / LCG_MODULUS
    }
}

/// 返回 `[0, n)` 的一个排列。
///
/// 种子为空时返回恒等顺序；否则从最后一个位置向下到 1 做 Fisher-Yates 洗牌，
/// 第 `i` 步取 `j = floor(next() * (i + 1))` 并交换 `i` 与 `j`。
/// 相同的 `(n, seed)` 总是得到相同的结果。
pub fn permute(n: usize, seed: &str) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if seed.is_empty() {
        return order;
    }

    let mut rng = Lcg::from_seed(seed);
    for i in (1..n).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        order.swap(i, j);
    }
    order
}

/// 单次编解码调用使用的单元顺序。
///
/// 顺序放置时只保存区间，不分配索引表。
#[derive(Debug, Clone)]
pub enum CellOrder {
    Sequential(Range<usize>),
    Scattered(Vec<usize>),
}

impl CellOrder {
    pub fn iter(&self) -> CellIter<'_> {
        match self {
            Self::Sequential(range) => CellIter::Sequential(range.clone()),
            Self::Scattered(order) => CellIter::Scattered(order.iter()),
        }
    }
}

/// [`CellOrder::iter`] 返回的迭代器。
#[derive(Debug, Clone)]
pub enum CellIter<'a> {
    Sequential(Range<usize>),
    Scattered(std::slice::Iter<'a, usize>),
}

impl Iterator for CellIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Self::Sequential(range) => range.next(),
            Self::Scattered(order) => order.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Sequential(range) => range.size_hint(),
            Self::Scattered(order) => order.size_hint(),
        }
    }
}

/// 与 [`permute`] 给出相同的顺序，但空种子时不构建索引表。
pub fn cell_order(n: usize, seed: &str) -> CellOrder {
    if seed.is_empty() {
        CellOrder::Sequential(0..n)
    } else {
        CellOrder::Scattered(permute(n, seed))
    }
}

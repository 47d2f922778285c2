//! # 容量计算模块
//!
//! 每个载体单元承载 1 bit，其中前 32 个单元固定用于长度头部。

use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, ENVELOPE_OVERHEAD, HEADER_BYTES};

/// `cells` 个单元最多能隐藏的载荷字节数：`floor(cells / 8) - 4`，最小为 0。
///
/// 编码端的容量检查与解码端的长度校验都以此为界，二者互为逆运算。
pub fn capacity_for_cells(cells: usize) -> usize {
    (cells / BITS_PER_BYTE).saturating_sub(HEADER_BYTES)
}

/// 图像载体容量 (R, G, B 三个通道，不含 alpha)。
pub fn pixel_capacity(width: u32, height: u32) -> usize {
    let cells = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(CHANNELS_PER_PIXEL);
    capacity_for_cells(cells)
}

/// 16 位 PCM 音频载体容量 (每个采样 1 bit)。
pub fn sample_capacity(sample_count: usize) -> usize {
    capacity_for_cells(sample_count)
}

/// 启用加密信封后仍可容纳的明文字节数。
pub fn sealed_capacity(cells: usize) -> usize {
    capacity_for_cells(cells).saturating_sub(ENVELOPE_OVERHEAD)
}

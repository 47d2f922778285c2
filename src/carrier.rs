//! # 载体适配模块
//!
//! 将图像或音频缓冲区抽象为一组有序的 "单元"，每个单元的最低位可承载 1 bit。
//! 编解码器只通过 [`Carrier`] / [`CarrierMut`] 与载体交互，
//! 具体介质在调用入口处分派一次，而不是在逐位循环中反复判断。
//!
//! 两种实现都只借用调用者的缓冲区，写入时原地修改，不做内部拷贝。

use crate::constants::{CHANNELS_PER_PIXEL, REQUIRED_BITS_PER_SAMPLE, RGBA_STRIDE};
use crate::error::{Result, StegoError};

/// 只读载体：解码所需的全部能力。
pub trait Carrier {
    /// 载体单元总数 N。
    fn cell_count(&self) -> usize;

    /// 读取第 `cell` 个单元的最低位。`cell` 必须小于 [`Carrier::cell_count`]。
    fn read_bit(&self, cell: usize) -> bool;
}

/// 可写载体：编码时使用。写入只允许改变该单元的最低位。
pub trait CarrierMut: Carrier {
    fn write_bit(&mut self, cell: usize, bit: bool);
}

/// 像素通道载体。
///
/// 底层为扁平的 RGBA8 缓冲区，单元编号为 `pixel * 3 + channel`，
/// `channel` 取 0..3 (R, G, B)。alpha 通道不属于任何单元。
#[derive(Debug)]
pub struct PixelCarrier<B> {
    rgba: B,
    pixels: usize,
}

impl<B: AsRef<[u8]>> PixelCarrier<B> {
    /// 以 `width x height` 的 RGBA8 缓冲区构建载体。
    ///
    /// # Errors
    ///
    /// 如果缓冲区长度不等于 `width * height * 4`，返回 `UnsupportedCarrier`。
    pub fn new(rgba: B, width: u32, height: u32) -> Result<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| StegoError::UnsupportedCarrier("image dimensions overflow".into()))?;
        let expected = pixels.checked_mul(RGBA_STRIDE);
        let actual = rgba.as_ref().len();
        if expected != Some(actual) {
            return Err(StegoError::UnsupportedCarrier(format!(
                "expected a {width}x{height} RGBA8 buffer of {} bytes, got {actual}",
                pixels.saturating_mul(RGBA_STRIDE)
            )));
        }
        Ok(Self { rgba, pixels })
    }

    /// 单元编号到 RGBA 缓冲区字节偏移的映射。
    fn offset(cell: usize) -> usize {
        (cell / CHANNELS_PER_PIXEL) * RGBA_STRIDE + cell % CHANNELS_PER_PIXEL
    }
}

impl<B: AsRef<[u8]>> Carrier for PixelCarrier<B> {
    fn cell_count(&self) -> usize {
        self.pixels * CHANNELS_PER_PIXEL
    }

    fn read_bit(&self, cell: usize) -> bool {
        self.rgba.as_ref()[Self::offset(cell)] & 1 == 1
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> CarrierMut for PixelCarrier<B> {
    fn write_bit(&mut self, cell: usize, bit: bool) {
        let channel = &mut self.rgba.as_mut()[Self::offset(cell)];
        *channel = (*channel & !1) | u8::from(bit);
    }
}

/// 16 位有符号 PCM 采样载体，每个采样 (所有声道交错) 是一个单元。
#[derive(Debug)]
pub struct SampleCarrier<B> {
    samples: B,
}

impl<B: AsRef<[i16]>> SampleCarrier<B> {
    /// # Errors
    ///
    /// 位深不是 16 时返回 `UnsupportedCarrier`。
    pub fn new(samples: B, bits_per_sample: u16) -> Result<Self> {
        if bits_per_sample != REQUIRED_BITS_PER_SAMPLE {
            return Err(StegoError::UnsupportedCarrier(format!(
                "only {REQUIRED_BITS_PER_SAMPLE}-bit PCM audio is supported, got {bits_per_sample}-bit"
            )));
        }
        Ok(Self { samples })
    }
}

impl<B: AsRef<[i16]>> Carrier for SampleCarrier<B> {
    fn cell_count(&self) -> usize {
        self.samples.as_ref().len()
    }

    fn read_bit(&self, cell: usize) -> bool {
        self.samples.as_ref()[cell] & 1 == 1
    }
}

impl<B: AsRef<[i16]> + AsMut<[i16]>> CarrierMut for SampleCarrier<B> {
    fn write_bit(&mut self, cell: usize, bit: bool) {
        let sample = &mut self.samples.as_mut()[cell];
        *sample = (*sample & !1) | i16::from(bit);
    }
}

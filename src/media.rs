//! # 载体容器模块
//!
//! 负责把磁盘上的图像或 WAV 文件加载为可供隐写的内存缓冲区，并在隐写后写回。
//! 图像统一解码为 RGBA8；音频只接受 16 位整型 PCM。

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use image::{DynamicImage, ImageError, RgbaImage};

use crate::capacity::{capacity_for_cells, sealed_capacity};
use crate::carrier::{PixelCarrier, SampleCarrier};
use crate::constants::{CHANNELS_PER_PIXEL, REQUIRED_BITS_PER_SAMPLE};
use crate::error::{Result, StegoError};
use crate::steganography;

/// 已加载到内存中的载体。
#[derive(Debug)]
pub enum CoverMedia {
    Image {
        pixels: RgbaImage,
        /// 源图像是否带 alpha 通道；不带时以 RGB 保存。
        has_alpha: bool,
    },
    Audio {
        spec: WavSpec,
        /// 所有声道交错排列的采样。
        samples: Vec<i16>,
    },
}

/// 文件系统错误保留为 `Io`，格式错误归入 `Media`。
fn wav_error(err: hound::Error) -> StegoError {
    match err {
        hound::Error::IoError(io) => StegoError::Io(io),
        other => StegoError::Media(other.to_string()),
    }
}

fn image_error(err: ImageError) -> StegoError {
    match err {
        ImageError::IoError(io) => StegoError::Io(io),
        other => StegoError::Media(other.to_string()),
    }
}

/// 按扩展名判断是否为音频载体 (`.wav`，不区分大小写)。
pub fn is_audio_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

impl CoverMedia {
    /// 从文件加载载体。`.wav` 按音频处理，其余按图像解码。
    ///
    /// # Errors
    ///
    /// * 文件无法打开或读取时返回 `Io`。
    /// * 文件无法解码时返回 `Media`。
    /// * WAV 不是 16 位整型 PCM 时返回 `UnsupportedCarrier`。
    pub fn load(path: &Path) -> Result<Self> {
        let media = if is_audio_path(path) {
            let reader = WavReader::open(path).map_err(wav_error)?;
            Self::from_wav_reader(reader)?
        } else {
            let image = image::open(path).map_err(image_error)?;
            Self::from_image(image)
        };
        tracing::debug!(path = %path.display(), cells = media.cell_count(), "loaded carrier");
        Ok(media)
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self::Image {
            pixels: image.to_rgba8(),
            has_alpha,
        }
    }

    /// 读取 WAV 头部 (采样率、声道数、位深) 与全部交错采样。
    pub fn from_wav_reader<R: std::io::Read>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != REQUIRED_BITS_PER_SAMPLE
        {
            return Err(StegoError::UnsupportedCarrier(format!(
                "only {REQUIRED_BITS_PER_SAMPLE}-bit integer PCM WAV is supported, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(wav_error)?;
        Ok(Self::Audio { spec, samples })
    }

    /// 载体单元总数。
    pub fn cell_count(&self) -> usize {
        match self {
            Self::Image { pixels, .. } => {
                let (width, height) = pixels.dimensions();
                (width as usize) * (height as usize) * CHANNELS_PER_PIXEL
            }
            Self::Audio { samples, .. } => samples.len(),
        }
    }

    /// 不加密时可隐藏的最大字节数。
    pub fn capacity(&self) -> usize {
        capacity_for_cells(self.cell_count())
    }

    /// 加密时可隐藏的最大明文字节数。
    pub fn sealed_capacity(&self) -> usize {
        sealed_capacity(self.cell_count())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Audio { .. } => "audio",
        }
    }

    /// 在载体中隐藏载荷。介质类型在此处分派一次。
    pub fn hide(&mut self, payload: &[u8], seed: &str, password: Option<&str>) -> Result<()> {
        match self {
            Self::Image { pixels, .. } => {
                let (width, height) = pixels.dimensions();
                let channels: &mut [u8] = pixels;
                let mut carrier = PixelCarrier::new(channels, width, height)?;
                steganography::hide(&mut carrier, payload, seed, password)
            }
            Self::Audio { spec, samples } => {
                let mut carrier = SampleCarrier::new(&mut samples[..], spec.bits_per_sample)?;
                steganography::hide(&mut carrier, payload, seed, password)
            }
        }
    }

    /// 从载体中恢复载荷。
    pub fn recover(&self, seed: &str, password: Option<&str>) -> Result<Vec<u8>> {
        match self {
            Self::Image { pixels, .. } => {
                let (width, height) = pixels.dimensions();
                let channels: &[u8] = pixels;
                let carrier = PixelCarrier::new(channels, width, height)?;
                steganography::recover(&carrier, seed, password)
            }
            Self::Audio { spec, samples } => {
                let carrier = SampleCarrier::new(&samples[..], spec.bits_per_sample)?;
                steganography::recover(&carrier, seed, password)
            }
        }
    }

    /// 写回文件。图像格式由扩展名决定，必须是无损格式。
    ///
    /// # Errors
    ///
    /// 写入失败时返回 `Io`，编码失败时返回 `Media`。
    pub fn save(&self, path: &Path) -> Result<()> {
        match self {
            Self::Image { pixels, has_alpha } => {
                let result = if *has_alpha {
                    pixels.save(path)
                } else {
                    DynamicImage::ImageRgba8(pixels.clone()).to_rgb8().save(path)
                };
                result.map_err(image_error)?;
            }
            Self::Audio { spec, samples } => {
                let mut writer = WavWriter::create(path, *spec).map_err(wav_error)?;
                for &sample in samples {
                    writer.write_sample(sample).map_err(wav_error)?;
                }
                writer.finalize().map_err(wav_error)?;
            }
        }
        tracing::debug!(path = %path.display(), kind = self.kind(), "saved carrier");
        Ok(())
    }
}

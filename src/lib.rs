//! # lsb_weave 库
//!
//! 本库包含跨介质 LSB 隐写工具的核心逻辑：
//! 成帧 ([`framer`])、载体适配 ([`carrier`])、索引打散 ([`scatter`])、
//! 容量计算 ([`capacity`])、编解码 ([`steganography`]) 与加密信封 ([`envelope`])。

// 声明库包含的所有模块。

pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod framer;
pub mod handler;
pub mod media;
pub mod scatter;
pub mod steganography;

pub use error::{Result, StegoError};

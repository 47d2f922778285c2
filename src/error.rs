//! # 错误类型模块
//!
//! 隐写核心所有可能的失败都归入 [`StegoError`]。
//! 所有错误对当前调用都是终结性的，核心内部从不重试。

use thiserror::Error;

/// 编码、解码与加密信封过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    /// 载荷 (加 4 字节长度头) 超出载体容量。在任何写入之前报告。
    #[error("Carrier capacity exceeded: need {needed} bytes, available {available} bytes")]
    CapacityExceeded { needed: usize, available: usize },

    /// 载体的位深或通道布局不符合适配器的固定假设。
    #[error("Unsupported carrier: {0}")]
    UnsupportedCarrier(String),

    /// 解码读到的长度头在结构上不可信 (为 0，或超出剩余单元)。
    #[error("No hidden payload detected")]
    NoPayloadDetected,

    /// 认证失败。错误口令与密文损坏不作区分。
    #[error("Decryption failed")]
    DecryptionFailed,

    /// 零长度载荷无法与 "未检测到载荷" 区分，因此拒绝编码。
    #[error("Payload is empty")]
    EmptyPayload,

    #[error("Encryption failed")]
    EncryptionFailed,

    /// 载体容器 (图像或 WAV) 加载、保存失败。
    #[error("Media error: {0}")]
    Media(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;

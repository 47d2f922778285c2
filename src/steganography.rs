//! # 隐写编解码模块
//!
//! 串联成帧、打散与载体适配，完成端到端的隐藏与提取。
//! 所有函数都是 `(载体, 载荷, 种子, 可选口令)` 的纯函数，不持有任何跨调用状态；
//! 排列只在单次调用期间存在。

use crate::capacity::capacity_for_cells;
use crate::carrier::{Carrier, CarrierMut};
use crate::constants::{BITS_PER_BYTE, ENVELOPE_OVERHEAD, HEADER_BITS};
use crate::envelope;
use crate::error::{Result, StegoError};
use crate::framer::{assemble, frame, read_length};
use crate::scatter::cell_order;

/// 将原始载荷写入载体的最低位。
///
/// 容量在任何写入之前校验，失败时载体保持原样。
/// 种子为空时按顺序放置，否则按 [`crate::scatter::permute`] 给出的顺序放置。
///
/// # Errors
///
/// * `EmptyPayload` - 载荷长度为 0。
/// * `CapacityExceeded` - `8 * (4 + payload.len())` 大于载体单元数。
pub fn encode<C: CarrierMut + ?Sized>(carrier: &mut C, payload: &[u8], seed: &str) -> Result<()> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    let cells = carrier.cell_count();
    let available = capacity_for_cells(cells);
    if payload.len() > available {
        return Err(StegoError::CapacityExceeded {
            needed: payload.len(),
            available,
        });
    }

    tracing::debug!(cells, payload_len = payload.len(), "framing payload");
    let bits = frame(payload)?;

    tracing::debug!(cells, scattered = !seed.is_empty(), "computing cell order");
    let order = cell_order(cells, seed);

    tracing::debug!(bits = HEADER_BITS + payload.len() * BITS_PER_BYTE, "writing bits");
    order
        .iter()
        .zip(bits)
        .for_each(|(cell, bit)| carrier.write_bit(cell, bit));

    Ok(())
}

/// 从载体中提取原始载荷 (若编码时启用了信封，结果仍是密文)。
///
/// 必须使用与编码时相同的种子，否则读出的内容是无意义的数据。
///
/// # Errors
///
/// `NoPayloadDetected` - 长度头为 0，或 `32 + 8 * length` 超出载体单元数。
/// 这是唯一的结构性校验，无法发现长度合理但内容已损坏的情况。
pub fn decode<C: Carrier + ?Sized>(carrier: &C, seed: &str) -> Result<Vec<u8>> {
    let cells = carrier.cell_count();
    if cells < HEADER_BITS {
        return Err(StegoError::NoPayloadDetected);
    }

    let order = cell_order(cells, seed);
    let mut bits = order.iter().map(|cell| carrier.read_bit(cell));

    tracing::debug!(cells, "reading header");
    let header: Vec<bool> = bits.by_ref().take(HEADER_BITS).collect();
    let length = read_length(&header) as usize;

    tracing::debug!(length, "validating length");
    if length == 0 || length > capacity_for_cells(cells) {
        return Err(StegoError::NoPayloadDetected);
    }

    tracing::debug!(length, "reading payload");
    let payload: Vec<bool> = bits.take(length * BITS_PER_BYTE).collect();
    Ok(assemble(&payload))
}

/// 完整的隐藏流程：可选地先用口令封装，再写入载体。
///
/// `password` 为 `None` 或空字符串时跳过加密，载荷原样进入成帧器。
pub fn hide<C: CarrierMut + ?Sized>(
    carrier: &mut C,
    payload: &[u8],
    seed: &str,
    password: Option<&str>,
) -> Result<()> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    match password.filter(|p| !p.is_empty()) {
        Some(password) => {
            // 信封开销固定，容量在派生密钥之前即可确定。
            let needed = payload.len().saturating_add(ENVELOPE_OVERHEAD);
            let available = capacity_for_cells(carrier.cell_count());
            if needed > available {
                return Err(StegoError::CapacityExceeded { needed, available });
            }
            let sealed = envelope::seal(payload, password)?;
            encode(carrier, &sealed, seed)
        }
        None => encode(carrier, payload, seed),
    }
}

/// 完整的恢复流程：从载体提取，再用口令打开信封 (如果提供了口令)。
pub fn recover<C: Carrier + ?Sized>(
    carrier: &C,
    seed: &str,
    password: Option<&str>,
) -> Result<Vec<u8>> {
    let raw = decode(carrier, seed)?;
    match password.filter(|p| !p.is_empty()) {
        Some(password) => envelope::open(&raw, password),
        None => Ok(raw),
    }
}

//! # 位流成帧模块
//!
//! 帧格式: `[32 位大端长度][length 字节载荷]`，按字节高位在前展开为位序列。

use crate::constants::{BITS_PER_BYTE, HEADER_BITS, HEADER_BYTES};
use crate::error::{Result, StegoError};

/// 将单个字节按 MSB 在前展开为 8 个位。
fn byte_bits(byte: u8) -> impl Iterator<Item = bool> {
    (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1 == 1)
}

/// 载荷长度的 32 位大端编码。
///
/// # Errors
///
/// 长度超过 `u32::MAX` 时返回 `CapacityExceeded`。
pub fn frame_header(len: usize) -> Result<[u8; HEADER_BYTES]> {
    let len32 = u32::try_from(len).map_err(|_| StegoError::CapacityExceeded {
        needed: len,
        available: u32::MAX as usize,
    })?;
    Ok(len32.to_be_bytes())
}

/// 为载荷加上 32 位大端长度头，并返回完整帧的位序列。
///
/// 序列长度恒为 `32 + 8 * payload.len()`。
///
/// # Errors
///
/// 载荷超过 `u32::MAX` 字节时返回 `CapacityExceeded`，而不是截断长度头。
pub fn frame(payload: &[u8]) -> Result<impl Iterator<Item = bool> + '_> {
    let header = frame_header(payload.len())?;
    Ok(header
        .into_iter()
        .chain(payload.iter().copied())
        .flat_map(byte_bits))
}

/// 将前 32 个位解释为大端无符号长度。
///
/// 多于 32 个的位会被忽略；不足 32 个时按已有位计算。
pub fn read_length(bits: &[bool]) -> u32 {
    bits.iter()
        .take(HEADER_BITS)
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
}

/// 将位序列按 MSB 在前重新组合为字节。末尾不足 8 位的部分被丢弃。
pub fn assemble(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_prefixes_big_endian_length() {
        let bits: Vec<bool> = frame(b"A").unwrap().collect();
        assert_eq!(bits.len(), HEADER_BITS + 8);
        assert_eq!(read_length(&bits), 1);

        // 'A' = 0x41 = 0100_0001
        let tail = &bits[HEADER_BITS..];
        assert_eq!(
            tail,
            &[false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_read_length_is_big_endian() {
        let bits: Vec<bool> = frame(&[0u8; 0x0102]).unwrap().take(HEADER_BITS).collect();
        assert_eq!(read_length(&bits), 0x0102);
        assert_eq!(assemble(&bits), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_assemble_recovers_payload() {
        let payload = b"\x00\xffbinary\x80";
        let bits: Vec<bool> = frame(payload).unwrap().collect();
        assert_eq!(assemble(&bits[HEADER_BITS..]), payload.to_vec());
    }

    #[test]
    fn test_frame_header_bounds() {
        assert_eq!(frame_header(11).unwrap(), [0, 0, 0, 11]);
        assert_eq!(frame_header(u32::MAX as usize).unwrap(), [0xff; 4]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_frame_header_rejects_oversized_length() {
        let oversized = u32::MAX as usize + 1;
        assert!(matches!(
            frame_header(oversized),
            Err(StegoError::CapacityExceeded { needed, .. }) if needed == oversized
        ));
    }

    #[test]
    fn test_assemble_drops_partial_byte() {
        let bits = [true; 11];
        assert_eq!(assemble(&bits), vec![0xff]);
    }
}

use lsb_weave::{
    StegoError,
    capacity::{pixel_capacity, sample_capacity},
    carrier::{Carrier, PixelCarrier, SampleCarrier},
    scatter::permute,
    steganography::{decode, encode, hide, recover},
};
use rand::{Rng, RngCore};

/// 生成随机 RGBA 缓冲区
fn random_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut raw = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw);
    raw
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// 验证图像载体在多种种子下的往返一致性
#[test]
fn test_pixel_round_trip_with_various_seeds() {
    for seed in ["", "seed1", "correct horse", "种子"] {
        let mut rgba = random_rgba(40, 30);
        let payload = random_bytes(200);

        let mut carrier = PixelCarrier::new(&mut rgba[..], 40, 30).unwrap();
        encode(&mut carrier, &payload, seed).unwrap();

        let carrier = PixelCarrier::new(&rgba[..], 40, 30).unwrap();
        assert_eq!(decode(&carrier, seed).unwrap(), payload, "seed {seed:?}");
    }
}

/// 验证音频载体的往返一致性
#[test]
fn test_sample_round_trip() {
    let mut rng = rand::rng();
    let mut samples: Vec<i16> = (0..5_000).map(|_| rng.random()).collect();
    let payload = b"PCM carriers hold one bit per sample".to_vec();

    let mut carrier = SampleCarrier::new(&mut samples[..], 16).unwrap();
    encode(&mut carrier, &payload, "pcm").unwrap();

    let carrier = SampleCarrier::new(&samples[..], 16).unwrap();
    assert_eq!(decode(&carrier, "pcm").unwrap(), payload);
}

/// 验证隐写只改变 R/G/B 的最低位，alpha 与高位保持不变
#[test]
fn test_encoding_is_isolated_to_rgb_lsb() {
    let original = random_rgba(32, 32);
    let mut rgba = original.clone();
    let capacity = pixel_capacity(32, 32);

    let mut carrier = PixelCarrier::new(&mut rgba[..], 32, 32).unwrap();
    encode(&mut carrier, &random_bytes(capacity), "isolation").unwrap();

    for (i, (before, after)) in original.iter().zip(&rgba).enumerate() {
        if i % 4 == 3 {
            assert_eq!(before, after, "alpha changed at byte {i}");
        } else {
            assert_eq!(before & !1, after & !1, "high bits changed at byte {i}");
        }
    }
}

/// 验证容量边界：恰好等于容量时成功，多一个字节时失败且不修改载体
#[test]
fn test_capacity_boundary() {
    let capacity = pixel_capacity(10, 10);
    assert_eq!(capacity, 33);

    let mut rgba = random_rgba(10, 10);
    let mut carrier = PixelCarrier::new(&mut rgba[..], 10, 10).unwrap();
    encode(&mut carrier, &random_bytes(capacity), "").unwrap();

    let original = random_rgba(10, 10);
    let mut rgba = original.clone();
    let mut carrier = PixelCarrier::new(&mut rgba[..], 10, 10).unwrap();
    let result = encode(&mut carrier, &random_bytes(capacity + 1), "");
    assert!(matches!(
        result,
        Err(StegoError::CapacityExceeded { needed: 34, available: 33 })
    ));
    assert_eq!(rgba, original, "carrier must be untouched on failure");

    let mut samples = vec![0i16; 8 * 12];
    assert_eq!(sample_capacity(samples.len()), 8);
    let mut carrier = SampleCarrier::new(&mut samples[..], 16).unwrap();
    assert!(encode(&mut carrier, &[7u8; 8], "").is_ok());
    assert!(encode(&mut carrier, &[7u8; 9], "").is_err());
}

/// 验证 "hello world" 在 100x100 图像中按顺序、MSB 在前写入单元 0..120
#[test]
fn test_hello_world_sequential_layout() {
    let mut rgba = random_rgba(100, 100);
    let untouched = rgba.clone();
    let mut carrier = PixelCarrier::new(&mut rgba[..], 100, 100).unwrap();
    assert_eq!(carrier.cell_count(), 30_000);
    assert_eq!(pixel_capacity(100, 100), 3746);

    encode(&mut carrier, b"hello world", "").unwrap();

    let mut expected = vec![0u8, 0, 0, 11];
    expected.extend_from_slice(b"hello world");
    let expected_bits: Vec<bool> = expected
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect();
    assert_eq!(expected_bits.len(), 120);

    // 单元 k 对应像素 k / 3 的第 k % 3 个通道
    for (cell, &bit) in expected_bits.iter().enumerate() {
        let offset = (cell / 3) * 4 + cell % 3;
        assert_eq!(rgba[offset] & 1 == 1, bit, "cell {cell}");
    }
    // 第 120 个单元 (像素 40) 之后的内容保持不变
    assert_eq!(rgba[40 * 4..], untouched[40 * 4..]);
}

/// 验证同一种子的排列确定，不同种子的排列不同
#[test]
fn test_scatter_determinism() {
    for n in [33usize, 100, 1_000, 30_000] {
        let first = permute(n, "seed1");
        assert_eq!(first, permute(n, "seed1"));
        assert_ne!(first, permute(n, "seed2"), "n = {n}");
    }
}

/// 统计测试：用错误的种子解码永远得不到原始载荷
#[test]
fn test_wrong_seed_never_returns_payload() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let width = rng.random_range(8..40);
        let height = rng.random_range(8..40);
        let capacity = pixel_capacity(width, height);
        let len = rng.random_range(1..=capacity);
        let payload = random_bytes(len);

        let mut rgba = random_rgba(width, height);
        let mut carrier = PixelCarrier::new(&mut rgba[..], width, height).unwrap();
        encode(&mut carrier, &payload, "alpha").unwrap();

        let carrier = PixelCarrier::new(&rgba[..], width, height).unwrap();
        match decode(&carrier, "beta") {
            Err(StegoError::NoPayloadDetected) => {}
            Ok(bytes) => assert_ne!(bytes, payload),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}

/// 验证长度头为 0 或超出载体时报告未检测到载荷
#[test]
fn test_implausible_headers() {
    let rgba = vec![0u8; 10 * 10 * 4];
    let carrier = PixelCarrier::new(&rgba[..], 10, 10).unwrap();
    assert!(matches!(decode(&carrier, ""), Err(StegoError::NoPayloadDetected)));

    let rgba = vec![0xffu8; 10 * 10 * 4];
    let carrier = PixelCarrier::new(&rgba[..], 10, 10).unwrap();
    assert!(matches!(decode(&carrier, ""), Err(StegoError::NoPayloadDetected)));

    let samples = vec![0i16; 31];
    let carrier = SampleCarrier::new(&samples[..], 16).unwrap();
    assert!(matches!(decode(&carrier, ""), Err(StegoError::NoPayloadDetected)));
}

/// 验证空载荷被拒绝
#[test]
fn test_empty_payload_is_rejected() {
    let mut rgba = random_rgba(10, 10);
    let mut carrier = PixelCarrier::new(&mut rgba[..], 10, 10).unwrap();
    assert!(matches!(encode(&mut carrier, b"", ""), Err(StegoError::EmptyPayload)));
    assert!(matches!(
        hide(&mut carrier, b"", "", Some("pw")),
        Err(StegoError::EmptyPayload)
    ));
}

/// 验证加密信封与编解码器的组合
#[test]
fn test_hide_and_recover_with_password() {
    let mut rgba = random_rgba(50, 50);
    let payload = b"sealed then scattered".to_vec();

    let mut carrier = PixelCarrier::new(&mut rgba[..], 50, 50).unwrap();
    hide(&mut carrier, &payload, "scatter", Some("pw")).unwrap();

    let carrier = PixelCarrier::new(&rgba[..], 50, 50).unwrap();
    assert_eq!(recover(&carrier, "scatter", Some("pw")).unwrap(), payload);
    assert!(matches!(
        recover(&carrier, "scatter", Some("wrong")),
        Err(StegoError::DecryptionFailed)
    ));

    // 不带口令解码得到的是信封本身：salt + nonce + 密文 + tag
    let raw = decode(&carrier, "scatter").unwrap();
    assert_eq!(raw.len(), payload.len() + 44);
    assert_ne!(&raw[28..28 + payload.len()], &payload[..]);
}

/// 验证加密后容量不足时在派生密钥前即失败
#[test]
fn test_hide_with_password_respects_envelope_overhead() {
    let capacity = pixel_capacity(10, 10);
    let mut rgba = random_rgba(10, 10);
    let mut carrier = PixelCarrier::new(&mut rgba[..], 10, 10).unwrap();

    let result = hide(&mut carrier, &random_bytes(capacity), "", Some("pw"));
    assert!(matches!(result, Err(StegoError::CapacityExceeded { .. })));

    // 空口令等同于不加密
    assert!(hide(&mut carrier, &random_bytes(capacity), "", Some("")).is_ok());
}

//! # 加密信封模块
//!
//! 在载荷进入编解码器之前 (或离开之后) 施加基于口令的认证加密：
//!
//! - 密钥派生：PBKDF2-HMAC-SHA256，100,000 次迭代，每次封装使用新的 16 字节随机 salt
//! - 认证加密：AES-256-GCM，12 字节随机 nonce，16 字节认证标签附在密文之后
//!
//! 线格式：`salt (16) ‖ nonce (12) ‖ ciphertext ‖ tag (16)`。

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::{KEY_LEN, NONCE_LEN, PBKDF2_ITERATIONS, SALT_LEN, TAG_LEN};
use crate::error::{Result, StegoError};

/// 由口令与 salt 派生 256 位密钥。刻意缓慢。
fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    tracing::debug!(iterations = PBKDF2_ITERATIONS, "deriving key");
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// 加密载荷，返回 `salt ‖ nonce ‖ ciphertext+tag`。
///
/// salt 与 nonce 每次调用都重新随机生成，相同输入两次封装的结果不同。
///
/// # Errors
///
/// 仅当底层 AEAD 拒绝输入时返回 `EncryptionFailed`。
pub fn seal(payload: &[u8], password: &str) -> Result<Vec<u8>> {
    let mut rng = rand::rng();
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt);
    let cipher =
        Aes256Gcm::new_from_slice(&key[..]).map_err(|_| StegoError::EncryptionFailed)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), payload)
        .map_err(|_| StegoError::EncryptionFailed)?;

    let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// 解析并解密 [`seal`] 的输出。
///
/// # Errors
///
/// 长度不足、口令错误或任意字节被篡改，一律返回不带细节的 `DecryptionFailed`，
/// 且不产生任何部分输出。
pub fn open(blob: &[u8], password: &str) -> Result<Vec<u8>> {
    if blob.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(StegoError::DecryptionFailed);
    }
    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(password, salt);
    let cipher =
        Aes256Gcm::new_from_slice(&key[..]).map_err(|_| StegoError::DecryptionFailed)?;
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}

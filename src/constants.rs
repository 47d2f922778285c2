/// 长度头部占用的字节数。
/// 载荷长度以 32 位大端无符号整数存储，位于所有载荷位之前。
pub const HEADER_BYTES: usize = 4;

/// 长度头部占用的载体单元数 (每个单元隐藏 1 bit)。
pub const HEADER_BITS: usize = HEADER_BYTES * BITS_PER_BYTE;

pub const BITS_PER_BYTE: usize = 8;

/// 每个像素参与隐写的通道数 (R, G, B)，alpha 通道从不触碰。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// RGBA 缓冲区中每个像素占用的字节数。
pub const RGBA_STRIDE: usize = 4;

/// 音频载体唯一支持的采样位深。
pub const REQUIRED_BITS_PER_SAMPLE: u16 = 16;

/// 线性同余生成器参数 (Numerical Recipes)，模数为 2^32。
/// 必须与既有载体保持逐位兼容，不可替换。
pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 1_013_904_223;
pub const LCG_MODULUS: f64 = 4_294_967_296.0;

/// 加密信封：salt (16) ‖ nonce (12) ‖ ciphertext ‖ tag (16)。
pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

/// 信封相对明文增加的固定开销 (字节)。
pub const ENVELOPE_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// PBKDF2-HMAC-SHA256 迭代次数。
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// 未指定输出路径时生成默认文件名所用的前缀与扩展名。
pub const HIDDEN_PREFIX: &str = "doctored_";
pub const RECOVERED_PREFIX: &str = "recovered_";
pub const RECOVERED_EXTENSION: &str = "bin";

//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{Args, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损图像 (PNG, BMP 等) 或 16 位 PCM WAV 音频中隐藏或恢复任意数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损图像 (PNG, BMP, TIFF, WebP, QOI) 或 16 位 PCM WAV 音频中隐藏或恢复任意数据。\n可选地使用种子打散写入位置，并使用口令进行 AES-256-GCM 加密。"
)]
pub struct Cli {
    /// 输出调试日志 (写入 stderr)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在图像或 WAV 音频中隐藏文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像或音频中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 显示载体可隐藏的最大字节数。
    Capacity(CapacityArgs),
}

/// 隐藏与恢复共用的密钥参数。两端必须使用相同的值。
#[derive(Args, Debug, Clone, Default)]
pub struct SecretArgs {
    /// 打散写入位置所用的种子。留空则按顺序写入。
    #[arg(short, long, default_value = "")]
    pub seed: String,

    /// 加密口令。提供时载荷先经 AES-256-GCM 加密。
    #[arg(short, long)]
    pub password: Option<String>,
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的图像 (PNG, BMP, ...) 或 16 位 WAV 文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的数据文件路径。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 隐写完成后保存结果的输出路径。默认为载体同目录下的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    #[command(flatten)]
    pub secret: SecretArgs,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像或 WAV 文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 恢复数据后的保存路径。默认为载体同目录下的 `recovered_<文件名>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub secret: SecretArgs,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像或 WAV 文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,
}

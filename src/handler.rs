//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_PREFIX, RECOVERED_EXTENSION, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::media::CoverMedia;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 在载体所在目录下生成带前缀的文件路径。
///
/// `extension` 为 `None` 时保留载体的原始文件名 (含扩展名)。
fn sibling_path(carrier: &Path, prefix: &str, extension: Option<&str>) -> PathBuf {
    let name = match extension {
        Some(ext) => {
            let stem = carrier
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{prefix}{stem}.{ext}")
        }
        None => {
            let file_name = carrier
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{prefix}{file_name}")
        }
    };
    carrier.with_file_name(name)
}

/// 若目标文件已存在且未指定 `--force`，拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn load_carrier(path: &Path) -> Result<CoverMedia> {
    CoverMedia::load(path).with_context(|| {
        format!(
            "Unable to load carrier file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体和数据文件、检查隐写空间是否足够、调用隐写核心函数隐藏数据，
/// 最后将结果写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及密钥参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的载体或数据文件。
/// * 载体没有足够的空间来隐藏数据。
/// * 无法写入到目标文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| sibling_path(&args.carrier, HIDDEN_PREFIX, None));
    ensure_writable(&dest, args.force)?;

    let mut media = load_carrier(&args.carrier)?;

    let payload = fs::read(&args.input).with_context(|| {
        format!(
            "Unable to read input file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let password = args.secret.password.as_deref();
    media
        .hide(&payload, &args.secret.seed, password)
        .map_err(|err| match err {
            StegoError::CapacityExceeded { needed, available } => anyhow::anyhow!(
                "Not enough space in the {} to hide the data. \nRequired: {} bytes, Available: {} bytes",
                media.kind(),
                needed.to_string().red().bold(),
                available.to_string().green().bold()
            ),
            other => anyhow::Error::new(other).context(format!(
                "Failed to hide the data in {}.",
                args.carrier.to_string_lossy().red().bold()
            )),
        })?;

    media.save(&dest).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的载体文件、调用恢复核心函数提取 (并解密) 数据，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及密钥参数的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的载体文件。
/// * 载体中未检测到隐藏数据，或解密失败。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let output = args.output.unwrap_or_else(|| {
        sibling_path(&args.carrier, RECOVERED_PREFIX, Some(RECOVERED_EXTENSION))
    });
    ensure_writable(&output, args.force)?;

    let media = load_carrier(&args.carrier)?;

    let password = args.secret.password.as_deref();
    let payload = media
        .recover(&args.secret.seed, password)
        .with_context(|| {
            format!(
                "Failed to recover hidden data from '{}'. \nThe carrier may not contain hidden data, or the seed/password is wrong.",
                args.carrier.to_string_lossy().red().bold()
            )
        })?;

    fs::write(&output, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been successfully recovered and saved: {}",
        payload.len().to_string().green().bold(),
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 打印载体的单元数，以及不加密 / 加密两种情况下可隐藏的最大字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let media = load_carrier(&args.carrier)?;

    println!(
        "Carrier: {} ({})",
        args.carrier.to_string_lossy().green().bold(),
        media.kind()
    );
    println!("Cells: {}", media.cell_count().to_string().green().bold());
    println!(
        "Capacity: {} bytes ({} bytes with a password)",
        media.capacity().to_string().green().bold(),
        media.sealed_capacity().to_string().green().bold()
    );
    Ok(())
}

// setter.rs - 系统壁纸设置模块

use crate::error::{Error, Result};
use log::info;
use std::path::Path;

/// 将指定路径的图片设置为系统壁纸
///
/// # 参数
/// - `path`: 图片的绝对路径
pub fn set_from_path(path: impl AsRef<Path>) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref
        .to_str()
        .ok_or_else(|| Error::WallpaperSet(format!("path is not valid UTF-8: {}", path_ref.display())))?;

    info!("setting wallpaper to {}", path_ref.display());

    // 这个库会自动识别操作系统和桌面环境并调用相应的 API
    wallpaper::set_from_path(path_str).map_err(|e| Error::WallpaperSet(e.to_string()))
}

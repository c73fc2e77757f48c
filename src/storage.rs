// storage.rs - 把下载的图片写入壁纸目录

use crate::error::{Error, Result};
use chrono::Local;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// 文件名时间戳格式，精确到秒
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// 以当前本地时间生成文件名，如 `20240131235959.jpg`
pub fn timestamp_file_name() -> String {
    format!("{}.jpg", Local::now().format(TIMESTAMP_FORMAT))
}

/// 把 `reader` 的全部内容流式写入 `dir` 下的新文件，返回文件路径
///
/// 目录不存在时会先创建。同一秒内的两次写入使用同一个文件名，后者覆盖前者。
/// 复制中途失败时删除写了一半的文件；读取响应体失败归为 `Network`，
/// 其他失败归为 `Io`（见 `Error::from_stream`）。
pub fn save_stream(reader: &mut dyn Read, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let save_path = dir.join(timestamp_file_name());
    let mut file = File::create(&save_path)?;
    let written = match io::copy(reader, &mut file) {
        Ok(written) => written,
        Err(e) => {
            drop(file);
            if let Err(remove_err) = fs::remove_file(&save_path) {
                warn!("could not remove partial file {}: {}", save_path.display(), remove_err);
            }
            return Err(Error::from_stream(e));
        }
    };

    info!("saved {} bytes to {}", written, save_path.display());
    Ok(save_path)
}

// config.rs - 配置管理模块
// 从 ~/.gosplash/.env 读取 Unsplash 凭据，进程环境变量优先于文件内容

use crate::error::{Error, Result};
use shellexpand::tilde; // 用于展开 ~
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// 展开路径中的 ~
fn expand_path(path_str: &str) -> PathBuf {
    PathBuf::from(tilde(path_str).into_owned())
}

/// 应用全局配置项
///
/// 启动时读取一次，之后只读，通过构造函数显式传给客户端。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API 基础 URL（不带结尾的 /）
    pub api_url: String,
    /// Unsplash Access Key（优先级：ENV > .env）
    pub access_key: String,
    /// 壁纸保存目录
    pub wallpaper_dir: PathBuf,
    /// 单次 HTTP 请求的超时时间
    pub timeout: Duration,
}

impl AppConfig {
    /// 从当前用户的 home 目录和进程环境变量加载配置
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::ConfigMissing("could not determine home directory".to_string()))?;
        Self::load_from(&home, |key| std::env::var(key).ok())
    }

    /// `env` 用于查询进程环境变量，测试中可以替换
    pub fn load_from<F>(home: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = Self::env_path(home);
        let file_vars = read_env_file(&env_path)?;

        // 与 dotenv 一致：已存在的环境变量不会被文件覆盖
        let lookup = |key: &str| env(key).or_else(|| file_vars.get(key).cloned());

        let access_key = lookup("ACCESS_KEY").unwrap_or_default().trim().to_string();
        if access_key.is_empty() {
            return Err(Error::ConfigMissing(format!(
                "ACCESS_KEY not found in {}",
                env_path.display()
            )));
        }

        let api_url = match lookup("API_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => DEFAULT_API_URL.to_string(),
        };
        match reqwest::Url::parse(&api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(Error::ConfigInvalid(format!(
                    "API_URL is not an http(s) URL: {}",
                    api_url
                )));
            }
        }

        // 壁纸目录：
        // 1. 未配置：$HOME/wallpapers
        // 2. 配置了：展开 ~，相对路径则相对于 $HOME
        let wallpaper_dir = match lookup("WALLPAPER_DIR") {
            Some(dir) if !dir.trim().is_empty() => {
                let p = expand_path(dir.trim());
                if p.is_absolute() { p } else { home.join(p) }
            }
            _ => home.join("wallpapers"),
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(Error::ConfigInvalid(format!(
                        "HTTP_TIMEOUT_SECS must be a positive integer, got \"{}\"",
                        raw
                    )));
                }
            },
            _ => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            access_key,
            wallpaper_dir,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 凭据文件固定位于 ~/.gosplash/.env
    pub fn env_path(home: &Path) -> PathBuf {
        home.join(".gosplash").join(".env")
    }
}

/// 用 dotenvy 读取 .env 文件中的键值对，不修改进程环境变量
///
/// 文件不存在或无法读取时返回 `ConfigMissing`，语法错误返回 `ConfigInvalid`。
fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        Error::ConfigMissing(format!("could not read {}: {}", path.display(), e))
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| match e {
            dotenvy::Error::Io(e) => {
                Error::ConfigMissing(format!("could not read {}: {}", path.display(), e))
            }
            e => Error::ConfigInvalid(format!("{}: {}", path.display(), e)),
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}

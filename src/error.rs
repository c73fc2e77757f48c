// error.rs - 统一错误类型
// 每个失败原因对应一个变体，调用方通过 `?` 原样向上传递，不做二次包装

use std::io;

/// 程序中所有可能出现的错误
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 缺少 home 目录、缺少 .env 文件，或 ACCESS_KEY 为空
    #[error("configuration missing: {0}")]
    ConfigMissing(String),

    /// 配置项存在但无法解析（如 API_URL、HTTP_TIMEOUT_SECS）
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// API 没有返回可用的 full 图片地址
    #[error("could not get full image url: {0}")]
    Resolution(String),

    /// 按主题搜索没有任何结果
    #[error("no image found for topic \"{0}\"")]
    NoResults(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API 返回了非 2xx 状态码
    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to set wallpaper: {0}")]
    WallpaperSet(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 读取响应体时出现的 IO 错误
    ///
    /// reqwest 的阻塞响应在读取失败（如下载中途超时）时把 `reqwest::Error`
    /// 包在 `io::Error` 里，这类错误归为 `Network`，其余仍是 `Io`。
    pub fn from_stream(err: io::Error) -> Self {
        let is_network = err
            .get_ref()
            .is_some_and(|inner| inner.is::<reqwest::Error>());
        if !is_network {
            return Error::Io(err);
        }

        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
            Some(Ok(inner)) => Error::Network(*inner),
            Some(Err(inner)) => Error::Io(io::Error::new(kind, inner)),
            None => Error::Io(io::Error::from(kind)),
        }
    }
}

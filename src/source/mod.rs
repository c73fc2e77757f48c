// source/mod.rs - 壁纸源模块入口
pub mod http;
pub mod unsplash;

use crate::error::Result;
use std::path::PathBuf;

/// 壁纸源的抽象 Trait
///
/// 上层只依赖这个 Trait，目前唯一的实现是 `UnsplashClient`，
/// 测试中可以替换成不联网的假实现。三个方法都返回下载后文件的路径。
pub trait WallpaperSource {
    /// 下载指定 URL 的图片
    fn download(&self, url: &str) -> Result<PathBuf>;

    /// 下载一张任意主题的随机图片
    fn download_random(&self) -> Result<PathBuf>;

    /// 按主题搜索，从结果中随机挑一张下载
    fn download_random_topic(&self, topic: &str) -> Result<PathBuf>;
}

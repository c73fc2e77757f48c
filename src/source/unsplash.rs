// unsplash.rs - Unsplash API 客户端模块
// 负责把"随机"或"按主题随机"解析成一张图片的 full 地址，并下载到壁纸目录

use super::WallpaperSource;
use super::http::{HttpGet, redact};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::storage;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize; // 反序列化 trait，用于将 JSON 转为 Rust 结构体
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// 搜索接口每页最多返回的条数
const PER_PAGE: &str = "100";

/// Unsplash 搜索响应的顶层结构
/// GET /search/photos 返回的 JSON 根对象
#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    /// 搜索结果列表，缺失时视为空
    #[serde(default)]
    pub results: Vec<Photo>,
}

/// 单张图片的数据结构
///
/// JSON 中多余的字段会被 serde 忽略，缺失的字段取默认值
#[derive(Deserialize, Debug, Default)]
pub struct Photo {
    /// 图片唯一标识符（如 "LBI7cgq3pbM"）
    #[serde(default)]
    pub id: Option<String>,

    /// 图片描述，Unsplash 经常返回 null
    #[serde(default)]
    pub description: Option<String>,

    /// 各尺寸图片 URL 集合
    #[serde(default)]
    pub urls: PhotoUrls,
}

/// 图片 URL 集合，只有 full 会被使用
#[derive(Deserialize, Debug, Default)]
pub struct PhotoUrls {
    #[allow(dead_code)]
    pub raw: Option<String>,

    /// 最高质量图片（带 q=80&fm=jpg）
    pub full: Option<String>,

    #[allow(dead_code)]
    pub regular: Option<String>,

    #[allow(dead_code)]
    pub small: Option<String>,
}

impl Photo {
    /// 非空的 full 地址；为空时不回退到其他尺寸
    ///
    /// 返回前会去掉首尾空白，只含空白的地址视为空。
    pub fn full_url(&self) -> Option<&str> {
        self.urls
            .full
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    fn log_choice(&self) {
        info!(
            "photo {}: {}",
            self.id.as_deref().unwrap_or("<unknown>"),
            self.description.as_deref().unwrap_or("<no description>")
        );
    }
}

/// 从候选图片中均匀随机地选一张，列表为空时返回 None
pub fn choose_photo<'a, R>(photos: &'a [Photo], rng: &mut R) -> Option<&'a Photo>
where
    R: Rng + ?Sized,
{
    photos.choose(rng)
}

/// 以当前时间为种子的随机数生成器，只用于挑选壁纸，不要求可复现
fn time_seeded_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos)
}

/// Unsplash API 客户端
///
/// Access Key 通过 `client_id` 查询参数传递。`H` 是 HTTP 传输层，
/// 生产环境使用 `BlockingHttp`。
pub struct UnsplashClient<H> {
    http: H,

    /// API 基础 URL
    base_url: String,

    /// Unsplash Access Key
    access_key: String,

    /// 下载的图片保存到这里
    save_dir: PathBuf,
}

impl<H: HttpGet> UnsplashClient<H> {
    pub fn new(config: &AppConfig, http: H) -> Self {
        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            save_dir: config.wallpaper_dir.clone(),
        }
    }

    /// 拼接 `{api}{path}?client_id=...` 并附加额外参数，参数值会被编码
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut pairs = vec![("client_id", self.access_key.as_str())];
        pairs.extend_from_slice(params);

        let url = reqwest::Url::parse_with_params(&format!("{}{}", self.base_url, path), &pairs)
            .map_err(|e| Error::ConfigInvalid(format!("bad API URL {}: {}", self.base_url, e)))?;
        Ok(url.to_string())
    }

    /// GET 并把响应体解析为 JSON；解析失败视为拿不到可用地址
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut body = String::new();
        self.http
            .get(url)?
            .read_to_string(&mut body)
            .map_err(Error::from_stream)?;

        serde_json::from_str(&body).map_err(|e| {
            Error::Resolution(format!("unexpected response from {}: {}", redact(url), e))
        })
    }
}

impl<H: HttpGet> WallpaperSource for UnsplashClient<H> {
    fn download(&self, url: &str) -> Result<PathBuf> {
        // 先发请求，请求失败时不会创建任何目录或文件
        let mut body = self.http.get(url)?;
        storage::save_stream(&mut body, &self.save_dir)
    }

    fn download_random(&self) -> Result<PathBuf> {
        let url = self.endpoint("/photos/random/", &[])?;
        let photo: Photo = self.get_json(&url)?;

        let image_url = photo
            .full_url()
            .ok_or_else(|| Error::Resolution("random photo has no full url".to_string()))?;
        photo.log_choice();

        self.download(image_url)
    }

    fn download_random_topic(&self, topic: &str) -> Result<PathBuf> {
        let url = self.endpoint(
            "/search/photos",
            &[("query", topic), ("per_page", PER_PAGE)],
        )?;
        let search: SearchResponse = self.get_json(&url)?;
        debug!("{} candidates for topic \"{}\"", search.results.len(), topic);

        let photo = choose_photo(&search.results, &mut time_seeded_rng())
            .ok_or_else(|| Error::NoResults(topic.to_string()))?;

        let image_url = photo.full_url().ok_or_else(|| {
            Error::Resolution(format!("selected photo for \"{}\" has no full url", topic))
        })?;
        photo.log_choice();

        self.download(image_url)
    }
}

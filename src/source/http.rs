// http.rs - HTTP 传输层
// 把"发一个 GET 并拿到响应体"抽象成 trait，测试时可以换成不联网的实现

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ERROR_BODY: usize = 200;

/// 发起单次 GET 请求，返回可流式读取的响应体
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Box<dyn Read>>;
}

/// 基于 reqwest 阻塞客户端的实现
pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    /// `timeout` 覆盖从连接开始到响应体读完的整个过程
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gosplash/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpGet for BlockingHttp {
    fn get(&self, url: &str) -> Result<Box<dyn Read>> {
        debug!("GET {}", redact(url));

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }

        // reqwest::blocking::Response 实现了 Read，读取时才从网络拉取数据
        Ok(Box::new(response))
    }
}

/// Unsplash 的错误响应体：{"errors": ["..."]}
#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

/// 从错误响应体中提取可读的信息
pub fn api_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

/// 日志中隐藏 client_id 的值
pub fn redact(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(mut parsed) if parsed.query_pairs().any(|(k, _)| k == "client_id") => {
            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| {
                    let v = if k == "client_id" { "***".to_string() } else { v.into_owned() };
                    (k.into_owned(), v)
                })
                .collect();
            parsed.query_pairs_mut().clear().extend_pairs(pairs);
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsplash_error_list_is_joined() {
        let body = r#"{"errors":["OAuth error: The access token is invalid","Rate Limit Exceeded"]}"#;
        assert_eq!(
            api_message(body),
            "OAuth error: The access token is invalid; Rate Limit Exceeded"
        );
    }

    #[test]
    fn plain_bodies_are_trimmed_and_truncated() {
        assert_eq!(api_message("  Rate Limit Exceeded\n"), "Rate Limit Exceeded");
        assert_eq!(api_message(""), "empty response body");
        assert_eq!(api_message(&"x".repeat(500)).len(), MAX_ERROR_BODY);
    }

    #[test]
    fn redacts_client_id_only() {
        let url = "https://api.example.test/search/photos?client_id=abc123&query=mountain&per_page=100";
        let redacted = redact(url);
        assert!(!redacted.contains("abc123"));
        assert!(redacted.contains("query=mountain"));
        assert!(redacted.contains("per_page=100"));

        let image = "https://img.test/1.jpg";
        assert_eq!(redact(image), image);
    }

    #[test]
    fn fake_records_requests_and_serves_bodies() {
        let http = fake::FakeHttp::new().with("https://img.test/1.jpg", b"0123456789".to_vec());

        let mut body = Vec::new();
        http.get("https://img.test/1.jpg")
            .unwrap()
            .read_to_end(&mut body)
            .unwrap();
        assert_eq!(body.len(), 10);

        assert!(matches!(
            http.get("https://img.test/2.jpg"),
            Err(Error::Api { status: 404, .. })
        ));
        assert_eq!(
            http.requests(),
            vec!["https://img.test/1.jpg", "https://img.test/2.jpg"]
        );
    }
}

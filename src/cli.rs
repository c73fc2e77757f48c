// cli.rs - 命令行接口定义模块
// 使用 clap 的 derive 模式，只有一个可选的 -t 参数，没有子命令

use clap::Parser;

/// 从 Unsplash 获取一张图片并设置为桌面壁纸
///
/// 不带参数时设置一张任意主题的随机壁纸。
///
/// 用法示例:
///   gosplash
///   gosplash -t mountain
#[derive(Parser, Debug)]
#[command(name = "gosplash")]
#[command(version)] // 自动从 Cargo.toml 读取 version 字段
#[command(about = "Fetch a photo from Unsplash and set it as the desktop wallpaper")]
pub struct Cli {
    /// 以该主题的图片作为壁纸（如 "mountain", "ocean"）
    #[arg(short, long, value_name = "TOPIC")]
    pub topic: Option<String>,
}

impl Cli {
    /// 空白主题等同于不指定主题
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

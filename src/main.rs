// main.rs - 程序入口
// 负责初始化日志与多语言、解析命令行参数、按顺序执行 解析 -> 下载 -> 设置壁纸

mod cli;
mod config;
mod error;
mod setter;
mod source;
mod storage;

// 初始化多语言支持，嵌入 locales 目录下的所有翻译
rust_i18n::i18n!("locales");

use clap::Parser;
use cli::Cli;
use config::AppConfig;
use error::{Error, Result};
use log::error;
use rust_i18n::t; // 引入翻译宏
use source::WallpaperSource;
use source::http::BlockingHttp;
use source::unsplash::UnsplashClient;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // 自动检测系统语言并设置
    let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
    if locale.starts_with("zh") {
        rust_i18n::set_locale("zh-CN");
    } else {
        rust_i18n::set_locale("en");
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            println!("{}", t!("set_done"));
            ExitCode::SUCCESS
        }
        Err(Error::ConfigMissing(reason)) => {
            eprintln!("{}", t!("config_missing", reason => reason));
            eprintln!("{}", t!("setup_step_signup"));
            eprintln!("{}", t!("setup_step_access_key"));
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{:?}", e);
            eprintln!("{}", t!("error_failed", reason => e));
            ExitCode::FAILURE
        }
    }
}

/// 读取配置，下载一张壁纸并设置为桌面背景
fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load()?;
    let http = BlockingHttp::new(config.timeout)?;
    let client = UnsplashClient::new(&config, http);

    println!("{}", t!("starting"));
    if let Some(topic) = cli.topic() {
        println!("{}", t!("topic", topic => topic));
    }

    let image_path = fetch_wallpaper(&client, cli.topic())?;
    println!("{}", t!("save_path", path => image_path.display()));

    setter::set_from_path(&image_path)
}

/// 有主题时按主题随机，否则完全随机
fn fetch_wallpaper(source: &dyn WallpaperSource, topic: Option<&str>) -> Result<PathBuf> {
    match topic {
        Some(topic) => source.download_random_topic(topic),
        None => source.download_random(),
    }
}

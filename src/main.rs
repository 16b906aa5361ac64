//! # PWA 图标生成工具 — 命令行入口
//!
//! 本文件只负责参数解析、日志初始化与结果输出，
//! 执行流程见 `app` 模块。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use pwa_icons::app::{self, RunOptions};
use pwa_icons::assets;
use pwa_icons::icon_generator::{
    CandidateFinder, DirectoryScanFinder, DisabledFinder, GenerationReport,
};
use pwa_icons::{AppError, IconConfig};

/// 将 logo 图片转换为 192×192 与 512×512 的 PWA 图标。
#[derive(Parser, Debug)]
#[command(name = "pwa-icons")]
#[command(version, about, long_about = None)]
struct Args {
    /// 源图片路径；省略时在下载目录与临时目录中自动查找。
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Web 项目根目录，图标写入其下的 `public/`。
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// 直接指定输出目录（优先于 --project-root）。
    #[arg(long, value_name = "DIR")]
    public_dir: Option<PathBuf>,

    /// 不自动查找候选图片。
    #[arg(long)]
    no_scan: bool,

    /// 以 JSON 输出结果。
    #[arg(long)]
    json: bool,

    /// 输出调试日志。
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = run(&args);
    let status = app::exit_status(&result);

    match result {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{text}"),
                    Err(err) => {
                        log::error!("{}", AppError::from(err));
                        return ExitCode::from(app::EXIT_FAILURE);
                    }
                }
            } else {
                for output in &report.outputs {
                    println!("{}", output.path.display());
                }
            }
        }
        Err(err) => {
            log::error!("❌ {err}");
            if args.json {
                println!("{}", json!({ "error": err, "kind": err.kind() }));
            }
        }
    }

    ExitCode::from(status)
}

fn run(args: &Args) -> Result<GenerationReport, AppError> {
    let project_root = match &args.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let options = RunOptions {
        image: args.image.clone(),
        output_dir: assets::public_assets_dir(&project_root, args.public_dir.as_deref()),
        config: IconConfig::default(),
    };

    let finder: Box<dyn CandidateFinder> = if args.no_scan {
        Box::new(DisabledFinder)
    } else {
        Box::new(DirectoryScanFinder::default_locations())
    };

    app::run(&options, finder.as_ref())
}

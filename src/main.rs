use anyhow::{Context, Result};
use std::path::Path;
use work_presenters::utils::logging;
use work_presenters::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = match std::env::var("WORK_PRESENTERS_CONFIG") {
        Ok(path) => Config::from_file(Path::new(&path))?,
        Err(_) => Config::from_env()?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    let work_id = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WORK_ID").ok())
        .context("用法: work_presenters <work-id>（或设置 WORK_ID）")?;

    // 初始化并运行应用
    let found = App::initialize(config)?.run(&work_id).await?;
    if !found {
        std::process::exit(1);
    }

    Ok(())
}

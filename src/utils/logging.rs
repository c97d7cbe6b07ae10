/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 verbose 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作品展示器启动");
    info!("🔎 Solr: {}", config.solr_url);
    info!("📊 成员查询上限: {}", config.row_limit);
    info!("{}", "=".repeat(60));
}

/// 记录一组成员
///
/// # 参数
/// - `label`: 分组名称
/// - `entries`: (ID, 显示名) 列表
pub fn log_members(label: &str, entries: &[(String, String)]) {
    info!("{} ({} 个)", label, entries.len());
    for (index, (id, name)) in entries.iter().enumerate() {
        info!("  {}. [{}] {}", index + 1, id, truncate_text(name, 60));
    }
}

/// 记录作品摘要结束
pub fn log_summary_end(work_id: &str) {
    info!("{}", "─".repeat(60));
    info!("✓ 作品 {} 展示完成", work_id);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::path::Path;
use tracing::info;

use crate::error::{AppError, AppResult};

/// 初始化报告文件（写入带时间戳的占位内容，确认路径可写）
///
/// # 参数
/// - `report_path`: 报告文件路径
pub fn init_report_file(report_path: &str) -> AppResult<()> {
    if let Some(parent) = Path::new(report_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AppError::file_write_failed(report_path, e))?;
    }
    let header = serde_json::json!({
        "generated_at": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "documents": [],
    });
    std::fs::write(report_path, serde_json::to_string_pretty(&header)?)
        .map_err(|e| AppError::file_write_failed(report_path, e))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 题目来源描述
/// - `max_concurrent`: 最大并发求解数
pub fn log_startup(source: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 选择题检测模式 ({})", source);
    info!("📊 最大并发求解数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录单个文档的检测结果
pub fn log_document_detected(name: &str, count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📄 {}: 检测到 {} 道选择题", name, count);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `documents`: 文档数量
/// - `detected`: 检测到的题目数
/// - `solved`: 成功求解的题目数
/// - `failed`: 求解失败的题目数
/// - `report_path`: 报告文件路径
pub fn print_final_stats(documents: usize, detected: usize, solved: usize, failed: usize, report_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 文档: {}", documents);
    info!("🔍 题目: {}", detected);
    info!("✅ 求解成功: {}", solved);
    info!("❌ 求解失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path);
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

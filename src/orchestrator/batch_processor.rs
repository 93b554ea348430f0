//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责文档的批量检测和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：准备报告文件，页面模式下连接浏览器、创建 JsExecutor
//! 2. **批量加载**：页面快照或文本目录（`Vec<TextDocument>`）
//! 3. **并发控制**：使用 Semaphore 限制同时求解的题目数量
//! 4. **报告输出**：所有文档处理完后写入 JSON 报告
//! 5. **全局统计**：汇总检测和求解结果

use std::sync::Arc;

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::browser;
use crate::config::{Config, SourceKind};
use crate::infrastructure::JsExecutor;
use crate::models::{load_all_text_files, Mcq};
use crate::orchestrator::document_processor::{process_document, DocumentReport, DocumentStats};
use crate::services::McqDetector;
use crate::tree::parse_html;
use crate::utils::logging::{init_report_file, log_startup, print_final_stats};
use crate::workflow::SolveFlow;

/// 整次运行的报告
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub documents: Vec<DocumentReport>,
}

impl RunReport {
    pub fn stats(&self) -> DocumentStats {
        self.documents
            .iter()
            .map(DocumentReport::stats)
            .fold(DocumentStats::default(), |acc, s| DocumentStats {
                detected: acc.detected + s.detected,
                solved: acc.solved + s.solved,
                failed: acc.failed + s.failed,
            })
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    detector: McqDetector,
    solve_flow: Option<Arc<SolveFlow>>,
    _browser: Option<Browser>,
    executor: Option<JsExecutor>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_report_file(&config.report_file)
            .with_context(|| format!("无法初始化报告文件: {}", config.report_file))?;

        let source = match config.source {
            SourceKind::Page => "页面",
            SourceKind::Text => "文本",
        };
        log_startup(source, config.max_concurrent_solves);

        let (browser, executor) = match config.source {
            SourceKind::Page => {
                let target = Some(config.target_url.as_str()).filter(|u| !u.is_empty());
                let (browser, page) =
                    browser::connect_to_browser_and_page(config.browser_debug_port, target).await?;
                (Some(browser), Some(JsExecutor::new(page)))
            }
            SourceKind::Text => (None, None),
        };

        let solve_flow = config.solve_answers.then(|| Arc::new(SolveFlow::new(&config)));
        if solve_flow.is_none() {
            info!("💡 未开启求解 (SOLVE_ANSWERS=false)，只输出检测结果");
        }

        Ok(Self {
            config,
            detector: McqDetector::new(),
            solve_flow,
            _browser: browser,
            executor,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        let documents = self.detect_documents().await?;
        if documents.is_empty() {
            warn!("⚠️ 没有找到待处理的文档，程序结束");
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_solves));
        let mut reports = Vec::with_capacity(documents.len());
        for (name, mcqs) in documents {
            let report = process_document(&name, mcqs, self.solve_flow.clone(), Arc::clone(&semaphore)).await;
            reports.push(report);
        }

        let report = RunReport {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            documents: reports,
        };
        self.write_report(&report).await?;

        let stats = report.stats();
        print_final_stats(
            report.documents.len(),
            stats.detected,
            stats.solved,
            stats.failed,
            &self.config.report_file,
        );
        Ok(report)
    }

    /// 按来源检测题目，返回 (文档名, 题目列表)
    async fn detect_documents(&self) -> Result<Vec<(String, Vec<Mcq>)>> {
        match (&self.config.source, &self.executor) {
            (SourceKind::Page, Some(executor)) => {
                info!("\n🌐 正在读取当前页面...");
                let url = executor.page_url().await?;
                let html = executor.page_html().await?;
                let tree = parse_html(&html);
                Ok(vec![(url, self.detector.detect_tree(&tree))])
            }
            (SourceKind::Page, None) => anyhow::bail!("页面模式下没有可用的浏览器页面"),
            (SourceKind::Text, _) => {
                info!("\n📁 正在扫描文本目录: {}", self.config.input_folder);
                let documents = load_all_text_files(&self.config.input_folder).await?;
                Ok(documents
                    .into_iter()
                    .map(|doc| {
                        let mcqs = self.detector.detect_text(&doc.content);
                        (doc.name, mcqs)
                    })
                    .collect())
            }
        }
    }

    async fn write_report(&self, report: &RunReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&self.config.report_file, json)
            .await
            .with_context(|| format!("写入报告失败: {}", self.config.report_file))?;
        Ok(())
    }
}

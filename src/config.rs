use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 题目来源
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// 当前浏览器页面
    Page,
    /// 文本文件目录（OCR 结果）
    Text,
}

impl std::str::FromStr for SourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "page" => Ok(SourceKind::Page),
            "text" => Ok(SourceKind::Text),
            _ => Err(AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: "MCQ_SOURCE".to_string(),
                value: s.to_string(),
                expected_type: "page | text".to_string(),
            })),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题目来源
    pub source: SourceKind,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标URL，为空时使用浏览器当前页面
    pub target_url: String,
    /// 文本文件存放目录
    pub input_folder: String,
    /// 同时求解的题目数量
    pub max_concurrent_solves: usize,
    /// 是否调用 LLM 求解
    pub solve_answers: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出报告文件
    pub report_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Text,
            browser_debug_port: 9222,
            target_url: String::new(),
            input_folder: "input_text".to_string(),
            max_concurrent_solves: 4,
            solve_answers: false,
            verbose_logging: false,
            report_file: "mcq_report.json".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

/// 读取并解析一个环境变量；未设置时返回 None
fn env_parse<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 配置文件（`MCQ_CONFIG_FILE`，可选）+ 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("MCQ_CONFIG_FILE") {
            Ok(path) => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| AppError::file_read_failed(&path, e))?;
                Self::from_toml_str(&content).map_err(|e| match e {
                    AppError::Config(ConfigError::TomlParseFailed { source, .. }) => {
                        AppError::Config(ConfigError::TomlParseFailed { path, source })
                    }
                    other => other,
                })?
            }
            Err(_) => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 解析 TOML 配置，缺失的字段使用默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Some(v) = env_parse("MCQ_SOURCE", "page | text")? {
            self.source = v;
        }
        if let Some(v) = env_parse("BROWSER_DEBUG_PORT", "u16")? {
            self.browser_debug_port = v;
        }
        if let Ok(v) = std::env::var("TARGET_URL") {
            self.target_url = v;
        }
        if let Ok(v) = std::env::var("INPUT_FOLDER") {
            self.input_folder = v;
        }
        if let Some(v) = env_parse("MAX_CONCURRENT_SOLVES", "usize")? {
            self.max_concurrent_solves = v;
        }
        if let Some(v) = env_parse("SOLVE_ANSWERS", "bool")? {
            self.solve_answers = v;
        }
        if let Some(v) = env_parse("VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        if let Ok(v) = std::env::var("REPORT_FILE") {
            self.report_file = v;
        }
        if let Ok(v) = std::env::var("LLM_API_KEY") {
            self.llm_api_key = v;
        }
        if let Ok(v) = std::env::var("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Ok(v) = std::env::var("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        // 并发数至少为 1，否则信号量永远拿不到许可
        self.max_concurrent_solves = self.max_concurrent_solves.max(1);
        Ok(self)
    }
}

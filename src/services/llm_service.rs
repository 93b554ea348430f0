//! LLM 服务 - 业务能力层
//!
//! 只负责"向模型提问并拿回原始回答"，答案如何映射回选项由解析器决定。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::{option_letter, AiAnswer, Mcq};

const SYSTEM_PROMPT: &str = "You answer multiple-choice questions. \
Reply with a single JSON object and nothing else: \
{\"answer\": \"<the text of the chosen option>\", \"confidence\": <0-100>, \"explanation\": \"<one sentence>\"}";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 回答单道选择题
/// - 提供通用的 LLM 调用接口
/// - 不关心流程顺序，也不做选项匹配
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

fn build_failed(e: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::Llm(LlmError::RequestBuildFailed { source: Box::new(e) })
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去掉首尾空白）
    ///
    /// # 示例
    /// ```no_run
    /// # use mcq_detect::services::LlmService;
    /// # async fn example(service: &LlmService) -> mcq_detect::AppResult<()> {
    /// let response = service.send_to_llm("Say hello", Some("Be brief.")).await?;
    /// println!("LLM 响应: {}", response);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_to_llm(&self, user_message: &str, system_message: Option<&str>) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .max_tokens(512u32)
            .build()
            .map_err(build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 让模型回答一道选择题
    pub async fn ask_answer(&self, mcq: &Mcq) -> AppResult<AiAnswer> {
        let prompt = build_answer_prompt(mcq);
        let response = self.send_to_llm(&prompt, Some(SYSTEM_PROMPT)).await?;
        Ok(parse_ai_answer(&response))
    }
}

/// 构建提问内容：题干 + 带字母的选项
pub fn build_answer_prompt(mcq: &Mcq) -> String {
    let mut prompt = format!("Question: {}\n\nOptions:\n", mcq.question);
    for (i, option) in mcq.options.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", option_letter(i), option.text));
    }
    prompt.push_str("\nAnswer with the JSON object only.");
    prompt
}

/// 解析模型回答
///
/// 容忍代码块和前后的说明文字；实在解析不了时，把原文当作答案、置信度记为 0。
pub fn parse_ai_answer(response: &str) -> AiAnswer {
    let trimmed = response.trim();

    let json_slice = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&trimmed[start..=end]),
        _ => None,
    };

    if let Some(slice) = json_slice {
        match serde_json::from_str::<AiAnswer>(slice) {
            Ok(answer) => return answer,
            Err(e) => debug!("LLM 响应 JSON 解析失败: {}", e),
        }
    }

    warn!("无法解析 LLM 响应: '{}'，按原文处理", trimmed);
    AiAnswer {
        answer: trimmed
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
            .to_string(),
        confidence: 0.0,
        explanation: String::new(),
    }
}

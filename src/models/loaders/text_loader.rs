use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{AppError, FileError};

/// 一份待识别的纯文本文档（通常是外部 OCR 的输出）
#[derive(Debug, Clone, Serialize)]
pub struct TextDocument {
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(skip)]
    pub content: String,
}

/// 读取单个文本文件
pub async fn load_text_document(path: &Path) -> Result<TextDocument> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取文本文件: {}", path.display()))?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(TextDocument {
        name,
        path: path.to_path_buf(),
        content,
    })
}

/// 从文件夹中加载所有 .txt 文件，按文件名排序
pub async fn load_all_text_files(folder_path: &str) -> Result<Vec<TextDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::from(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        })
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_text_document(&path).await {
            Ok(doc) => {
                tracing::info!("成功加载 {} 个字符", doc.content.chars().count());
                documents.push(doc);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}

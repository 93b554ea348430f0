use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult, BrowserError};

/// 连接到已开启调试端口的浏览器并获取页面
///
/// - `target_url` 为 None：使用浏览器当前的第一个页面
/// - `target_url` 为 Some：优先复用 URL 相同的页面，否则新建页面并导航
pub async fn connect_to_browser_and_page(port: u16, target_url: Option<&str>) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标 URL: {:?}", target_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    let Some(url) = target_url.filter(|u| !u.is_empty()) else {
        let page = pages.into_iter().next().ok_or(AppError::Browser(BrowserError::NoPage))?;
        info!("✓ 使用当前页面");
        return Ok((browser, page));
    };

    for p in pages.iter() {
        if let Ok(Some(page_url)) = p.url().await {
            if page_url == url {
                info!("✓ 找到目标页面: {}", page_url);
                return Ok((browser, p.clone()));
            }
        }
    }

    debug!("未找到匹配的页面，创建新页面并导航到: {}", url);
    let page = browser.new_page("about:blank").await?;
    page.goto(url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", url, e);
        AppError::Browser(BrowserError::NavigationFailed {
            url: url.to_string(),
            source: Box::new(e),
        })
    })?;
    info!("已导航到: {}", url);

    Ok((browser, page))
}

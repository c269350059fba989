//! 策略文件导入导出

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::policy::PolicyDraft;
use crate::error::ConsoleResult;

/// 把草稿内容原样写入 `{dir}/{name}.cedar`
pub async fn export_policy(dir: &Path, draft: &PolicyDraft) -> ConsoleResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(draft.export_file_name());
    tokio::fs::write(&path, &draft.content).await?;

    info!(path = %path.display(), bytes = draft.content.len(), "Policy exported");
    Ok(path)
}

/// 读取策略文件内容，不做任何校验
pub async fn import_policy(path: &Path) -> ConsoleResult<String> {
    let content = tokio::fs::read_to_string(path).await?;
    info!(path = %path.display(), bytes = content.len(), "Policy imported");
    Ok(content)
}

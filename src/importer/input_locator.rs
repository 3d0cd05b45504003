// ==========================================
// 批次发货缺口分析 - 输入文件定位
// ==========================================
// 规则: 每个输入目录有且仅有一个文件，文件名不限
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::fs;
use std::path::{Path, PathBuf};

/// 定位目录中唯一的输入文件
///
/// # 参数
/// - dir: 输入目录
/// - label: 目录用途（用于诊断信息，如 "Demand"）
///
/// # 返回
/// - Ok(PathBuf): 唯一文件路径
/// - Err: 目录不存在 / 无文件 / 多于一个文件
///
/// 以 '.' 开头的隐藏文件不计入
pub fn locate_single_file(dir: &Path, label: &str) -> ImportResult<PathBuf> {
    if !dir.is_dir() {
        return Err(ImportError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false);
        if hidden {
            continue;
        }
        files.push(path);
    }

    match files.len() {
        0 => Err(ImportError::NoInputFile {
            label: label.to_string(),
            dir: dir.display().to_string(),
        }),
        1 => {
            let file = files.remove(0);
            tracing::info!(input = label, file = %file.display(), "定位输入文件");
            Ok(file)
        }
        count => Err(ImportError::AmbiguousInput {
            label: label.to_string(),
            dir: dir.display().to_string(),
            count,
        }),
    }
}

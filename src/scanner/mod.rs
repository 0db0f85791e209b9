use crate::error::{OrganizerError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct PdfFile {
    pub path: PathBuf,
    pub file_name: String,
}

const PDF_EXTENSIONS: &[&str] = &["pdf", "PDF"];

/// 入力フォルダ直下のPDFをファイル名順に列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<PdfFile>> {
    if !folder.is_dir() {
        return Err(OrganizerError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（仕分け先フォルダには潜らない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension() else {
            continue;
        };
        if !is_pdf_extension(&ext.to_string_lossy()) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        files.push(PdfFile {
            path: path.to_path_buf(),
            file_name,
        });
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

fn is_pdf_extension(ext: &str) -> bool {
    PDF_EXTENSIONS.contains(&ext)
}

//! Plain-text document loader: one chunk per non-empty paragraph.

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::NewChunk;

pub fn load_text_documents(data_dir: &Path) -> Result<Vec<NewChunk>> {
    let files = list_txt_files(data_dir);
    if files.is_empty() {
        info!(dir = %data_dir.display(), "no .txt files found");
        return Ok(vec![]);
    }
    let mut all_chunks = Vec::new();
    for (file_index, file_path) in files.iter().enumerate() {
        debug!(file = file_index + 1, total = files.len(), path = %file_path.display(), "loading");
        let content = read_file_content(file_path)?;
        all_chunks.extend(split_paragraphs(&content, &source_name(file_path)));
    }
    info!(files = files.len(), chunks = all_chunks.len(), "loaded text documents");
    Ok(all_chunks)
}

fn split_paragraphs(content: &str, source: &str) -> Vec<NewChunk> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut chunk = NewChunk::new(p, source);
            chunk.metadata.insert("file_type".to_string(), Value::String("txt".to_string()));
            chunk
        })
        .collect()
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}

fn source_name(file_path: &Path) -> String {
    file_path.file_name().map_or_else(|| file_path.display().to_string(), |n| n.to_string_lossy().to_string())
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    txt_files.sort();
    txt_files
}

//! Batch input expansion and the parallel per-file driver.

use std::path::{Path, PathBuf};

use fdml_core::config::ScanConfig;
use fdml_core::errors::ScanError;
use rayon::prelude::*;
use walkdir::WalkDir;

fn is_document(path: &Path, scan: &ScanConfig) -> bool {
    path.file_name()
        .map(|name| scan.is_document_name(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// Expand files and directories into the document paths to validate.
///
/// Files are kept as given when their extension matches. Directories are
/// walked recursively with siblings in name order, so each directory
/// contributes its documents in lexicographic path order.
pub fn expand_inputs(inputs: &[PathBuf], scan: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut out = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            if is_document(input, scan) {
                out.push(input.clone());
            } else {
                tracing::debug!(file = %input.display(), "skipping non-document input");
            }
            continue;
        }

        let walker = WalkDir::new(input)
            .follow_links(scan.effective_follow_symlinks())
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Walk {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| input.clone()),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && is_document(entry.path(), scan) {
                out.push(entry.into_path());
            }
        }
    }
    tracing::debug!(inputs = inputs.len(), files = out.len(), "expanded batch inputs");
    Ok(out)
}

/// Apply `f` to every file in parallel, returning results in input order.
/// `scan.threads > 0` runs on a dedicated pool of that size.
pub fn run_parallel<T, F>(files: &[PathBuf], scan: &ScanConfig, f: F) -> Result<Vec<T>, ScanError>
where
    T: Send,
    F: Fn(&Path) -> T + Sync + Send,
{
    let threads = scan.effective_threads();
    if threads == 0 {
        return Ok(files.par_iter().map(|p| f(p)).collect());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ScanError::ThreadPool(e.to_string()))?;
    Ok(pool.install(|| files.par_iter().map(|p| f(p)).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<fdml/>").unwrap();
    }

    #[test]
    fn test_directory_walk_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.xml"));
        touch(&dir.path().join("a.fdml"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub/c.XML"));

        let files = expand_inputs(&[dir.path().to_path_buf()], &ScanConfig::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.fdml", "b.xml", "sub/c.XML"]);
    }

    #[test]
    fn test_explicit_files_keep_input_order() {
        let inputs = vec![PathBuf::from("z.xml"), PathBuf::from("a.xml"), PathBuf::from("readme.md")];
        let files = expand_inputs(&inputs, &ScanConfig::default()).unwrap();
        assert_eq!(files, vec![PathBuf::from("z.xml"), PathBuf::from("a.xml")]);
    }

    #[test]
    fn test_custom_extensions() {
        let scan = ScanConfig {
            extensions: vec![".dance".to_string()],
            ..ScanConfig::default()
        };
        let files = expand_inputs(&[PathBuf::from("x.dance"), PathBuf::from("y.xml")], &scan).unwrap();
        assert_eq!(files, vec![PathBuf::from("x.dance")]);
    }

    #[test]
    fn test_vanished_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        fs::create_dir(&gone).unwrap();
        let inputs = vec![gone.clone()];
        fs::remove_dir(&gone).unwrap();
        assert!(expand_inputs(&inputs, &ScanConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_preserves_order() {
        let files: Vec<PathBuf> = (0..64).map(|i| PathBuf::from(format!("{i:03}.xml"))).collect();
        let out = run_parallel(&files, &ScanConfig::default(), |p| p.to_path_buf()).unwrap();
        assert_eq!(out, files);

        let pooled = ScanConfig {
            threads: Some(2),
            ..ScanConfig::default()
        };
        let out = run_parallel(&files, &pooled, |p| p.display().to_string()).unwrap();
        assert_eq!(out[10], "010.xml");
    }
}

use crate::config::Config;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DiagramFile {
    pub path: PathBuf,
    pub size: u64,
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walks the source directory and collects every diagram file matching
    /// the configured extension and size cutoff. Results are sorted by path
    /// so the merged output is stable regardless of directory order.
    pub fn discover_files(&self) -> crate::Result<Vec<DiagramFile>> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.config.source_directory)
            .standard_filters(true)
            .hidden(false)
            .build();

        for result in walker {
            let entry = result?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if let Some(file) = self.process_file(path)? {
                files.push(file);
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn process_file(&self, path: &Path) -> crate::Result<Option<DiagramFile>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        if extension.as_deref() != Some(self.config.file_extension.as_str()) {
            return Ok(None);
        }

        let metadata = fs::metadata(path)?;
        let size = metadata.len();

        if size > self.config.max_file_size as u64 {
            return Ok(None);
        }

        Ok(Some(DiagramFile {
            path: path.to_path_buf(),
            size,
        }))
    }
}

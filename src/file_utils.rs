use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @checks: Case-insensitive file extension
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Check that the input is an existing `.xml` file
    pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("Input file {:?} does not exist", path));
        }
        if !Self::has_extension(path, "xml") {
            return Err(anyhow!("Input file {:?} is not an xml file", path));
        }
        Ok(())
    }

    /// Check that the output directory can be used.
    ///
    /// The directory itself may be missing, its parent may not. An empty
    /// parent (a bare relative name) is the current directory.
    pub fn validate_output_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Output path is empty"));
        }
        if Self::file_exists(path) {
            return Err(anyhow!("Output path {:?} is a file, expected a directory", path));
        }

        // Trailing separators are ignored: `out/` and `out` share a parent
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !Self::dir_exists(parent) {
            return Err(anyhow!("Output path {:?} is not a valid path", path));
        }
        Ok(())
    }

    // @generates: Package path inside the output directory
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, filename: &str) -> PathBuf {
        output_dir.as_ref().join(filename)
    }
}

use serde::Serialize;
use std::path::Path;

/// Suffix appended to the source path to name the downloaded copy.
pub const DOWNLOAD_SUFFIX: &str = ".downloaded";

/// How the object key is derived from the local file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Use the final path component (`dir/hello.txt` -> `hello.txt`)
    #[default]
    Basename,
    /// Use the path exactly as given on the command line
    Path,
}

/// Derive the object key for `file_path`.
///
/// Falls back to the full path when it has no final component (e.g. `..`).
#[must_use]
pub fn object_key(file_path: &Path, mode: KeyMode) -> String {
    match mode {
        KeyMode::Path => file_path.to_string_lossy().into_owned(),
        KeyMode::Basename => file_path.file_name().map_or_else(
            || file_path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        ),
    }
}

/// `hello.txt` -> `hello.txt.downloaded`, keeping the directory.
#[must_use]
pub fn download_path(file_path: &Path) -> std::path::PathBuf {
    let mut raw = file_path.as_os_str().to_owned();
    raw.push(DOWNLOAD_SUFFIX);
    raw.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn basename_strips_directories() {
        let key = object_key(Path::new("some/dir/hello.txt"), KeyMode::Basename);
        assert_eq!(key, "hello.txt");
    }

    #[test]
    fn path_mode_keeps_input_verbatim() {
        let key = object_key(Path::new("some/dir/hello.txt"), KeyMode::Path);
        assert_eq!(key, "some/dir/hello.txt");
    }

    #[test]
    fn modes_agree_on_bare_file_names() {
        let p = Path::new("hello.txt");
        assert_eq!(
            object_key(p, KeyMode::Basename),
            object_key(p, KeyMode::Path)
        );
    }

    #[test]
    fn download_path_appends_marker() {
        assert_eq!(
            download_path(Path::new("dir/hello.txt")),
            PathBuf::from("dir/hello.txt.downloaded")
        );
    }
}

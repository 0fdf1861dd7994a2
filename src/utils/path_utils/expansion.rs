use home::home_dir;
use std::path::{Path, PathBuf};

/// Replace a leading `~` with the user's home directory.
pub(crate) fn expand_tilde(path: &Path) -> Result<PathBuf, String> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    home_dir()
        .map(|home| home.join(rest))
        .ok_or_else(|| "Home directory could not be determined.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        let p = Path::new("data/hello.txt");
        assert_eq!(expand_tilde(p).unwrap(), PathBuf::from("data/hello.txt"));
    }

    #[test]
    fn tilde_is_expanded_when_home_is_known() {
        if let Some(home) = home_dir() {
            let p = Path::new("~/creds/key");
            assert_eq!(expand_tilde(p).unwrap(), home.join("creds/key"));
        }
    }
}

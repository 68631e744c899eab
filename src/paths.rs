use std::path::{Path, PathBuf};

const LOCAL_ROOT: &str = ".contas";

/// Returns the directory holding `config.yaml`.
///
/// Resolution order:
/// 1. `CONTAS_ROOT` environment variable (if set)
/// 2. `.contas` in the current working directory, when it exists
/// 3. The per-user config directory (e.g. `~/.config/contas`)
pub fn contas_root() -> PathBuf {
    if let Ok(root) = std::env::var("CONTAS_ROOT")
        && !root.is_empty()
    {
        return PathBuf::from(root);
    }

    if Path::new(LOCAL_ROOT).is_dir() {
        return PathBuf::from(LOCAL_ROOT);
    }

    directories::ProjectDirs::from("", "", "contas")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(LOCAL_ROOT))
}

/// Returns the path to the configuration file.
pub fn config_file() -> PathBuf {
    contas_root().join("config.yaml")
}

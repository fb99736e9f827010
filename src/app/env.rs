//! `.env` loading.

use std::path::Path;

use log::debug;

/// Loads a `.env` file into the process environment.
///
/// Tries the current directory first, then the directory of the executable.
/// A missing file is not an error: the credential may come from the real
/// environment or `--api-key`.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
        }
    }
}

/// Reads `var` from the env file at `path` without touching the process
/// environment.
///
/// Returns `None` if the file cannot be read or does not define `var`.
pub fn read_env_file_var(path: &Path, var: &str) -> Option<String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            debug!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };
    iter.filter_map(Result::ok)
        .find(|(key, _)| key == var)
        .map(|(_, value)| value)
}

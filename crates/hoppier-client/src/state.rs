use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const DATA_DIR_ENV: &str = "HOPPIER_DATA_DIR";

/// Resolves where the three record exports live.
///
/// Order: explicit override, then `HOPPIER_DATA_DIR`, then `~/.hoppier`.
pub fn resolve_data_dir(dir_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match dir_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(env_path) = std::env::var_os(DATA_DIR_ENV) {
                PathBuf::from(env_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".hoppier")
            } else {
                return Err(ClientError::data_dir_unresolved(
                    Path::new("."),
                    "Could not resolve a home directory.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::data_dir_unresolved(path, &error.to_string()))
}

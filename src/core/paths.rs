use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base classmv config directory (~/.config/classmv/ on Unix-likes)
pub fn classmv() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("classmv"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("classmv"))
    }
}

/// Global classmv.json config file path
pub fn classmv_json() -> Result<PathBuf> {
    Ok(classmv()?.join("classmv.json"))
}

use std::path::PathBuf;

const LOG_FILE_NAME: &str = "timelog.txt";

pub fn default_log_path() -> PathBuf {
    if let Ok(path) = std::env::var("TIMELOG_FILE") {
        return PathBuf::from(path);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(LOG_FILE_NAME);
    }
    PathBuf::from(LOG_FILE_NAME)
}

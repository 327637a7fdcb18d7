use crate::{try_result, try_option};

use std::fs::{OpenOptions, File};
use std::io::Read;
use std::path::Path;

pub fn read(file_name: &str) -> Result<String, String> {
    let file_result = OpenOptions::new()
        .read(true)
        .write(false)
        .create(false)
        .open(file_name);
    let mut file: File = try_result!(file_result, format!("Could not open file '{}' for reading", file_name));

    let mut file_content = String::new();
    try_result!(file.read_to_string(&mut file_content), format!("Could not read from file '{}'", file_name));

    return Ok(file_content);
}

/// File name without directories and extension
pub fn stem(file_name: &str) -> Result<String, String> {
    let stem = try_option!(Path::new(file_name).file_stem(), format!("Path '{}' has no file name", file_name));
    return Ok(stem.to_string_lossy().into_owned());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_directory_and_extension() {
        assert_eq!(stem("scenarios/bottleneck.scenario").unwrap(), "bottleneck");
        assert_eq!(stem("plain").unwrap(), "plain");
        assert!(stem("/").is_err());
    }

    #[test]
    fn reading_missing_file_fails() {
        assert!(read("/nonexistent/file.scenario").is_err());
    }
}

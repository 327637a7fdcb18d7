use crate::try_result;

use std::fs::File;
use std::io::BufReader;

use serde_json::Value;
use serde::Deserialize;
use std::path::Path;

pub fn from_file<T>(file_name: &Path) -> Result<T, String> where for<'de> T: Deserialize<'de> {
    let file = try_result!(File::open(file_name), format!("Could not open file '{}' for reading", file_name.display()));
    let buf_reader = BufReader::new(file);

    let result: Result<T,_> = serde_json::from_reader(buf_reader);
    return result.map_err(|err| {
        let msg = format!("Failed reading the file '{}': {}", file_name.display(), err);
        error!("{}", msg);
        msg
    });
}

pub fn from_value<T>(value: Value) -> Result<T,String> where for<'de> T: Deserialize<'de> {
    let result: Result<T,_> = serde_json::from_value(value);
    return result.map_err(|err| format!("Could not parse object from json value: {}", err));
}

/// Parse a command line argument as json value, falling back to a plain string
pub fn from_argument(argument: &str) -> Value {
    return serde_json::from_str(argument).unwrap_or_else(|_| Value::String(argument.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arguments_are_parsed_as_json_if_possible() {
        assert_eq!(from_argument("5"), json!(5));
        assert_eq!(from_argument("2.5"), json!(2.5));
        assert_eq!(from_argument("\"quoted\""), json!("quoted"));
        assert_eq!(from_argument("scenarios/basic.scenario"), json!("scenarios/basic.scenario"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = from_file::<Value>(Path::new("/nonexistent/simcontrol.json"));
        assert!(result.unwrap_err().contains("/nonexistent/simcontrol.json"));
    }
}

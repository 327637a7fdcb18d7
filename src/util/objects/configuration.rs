use crate::modules::object::Arguments;
use crate::util::io::json;

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

fn default_type() -> String { String::from("traci") }
fn default_host() -> String { String::from("localhost") }
fn default_port() -> u16 { 9999 }
fn default_retries() -> u32 { 5 }
fn default_retry_delay() -> u64 { 1000 }

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Configuration {
    #[serde(rename(deserialize = "type"), default="default_type")]
    pub control_type: String,

    #[serde(default="default_host")]
    pub host: String,

    #[serde(default="default_port")]
    pub port: u16,

    #[serde(default="default_retries")]
    pub connect_retries: u32,

    #[serde(default="default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Socket read/write timeout in seconds
    pub timeout: Option<u64>
}

impl Configuration {
    /**
      * Load the configuration file if one is given and apply the command line
      * overrides. Without a file, every value has its default.
      */
    pub fn load(args: &Arguments) -> Result<Configuration, String> {
        let mut config = match args.config.as_ref() {
            Some(file) => {
                debug!("Loading configuration from '{}'", file);
                json::from_file::<Configuration>(Path::new(file))?
            },
            None => json::from_value::<Configuration>(Value::Object(Default::default()))?
        };

        if let Some(host) = args.host.as_ref() {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if args.dry_run {
            config.control_type = String::from("dry-run");
        }

        return Ok(config);
    }
}

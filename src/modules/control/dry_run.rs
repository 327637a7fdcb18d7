use crate::modules::traits::{Control, Operation};
use crate::dry_run;

use serde_json::Value;

/// Logs the calls instead of sending them anywhere
pub struct DryRunControl {}

impl DryRunControl {
    pub const MODULE_NAME: &'static str = "dry-run";

    pub fn new() -> Box<Self> {
        return Box::new(DryRunControl {});
    }

    fn call(&self, operation: Operation, args: &[Value]) -> Result<Value, String> {
        dry_run!(format!("{}({})", operation.remote_name(),
            args.iter().map(|arg| arg.to_string()).collect::<Vec<String>>().join(", ")));
        return Ok(Value::Null);
    }
}

impl Control for DryRunControl {
    fn send_file(&mut self, args: &[Value]) -> Result<Value, String> {
        return self.call(Operation::SendFile, args);
    }

    fn get_version(&mut self) -> Result<Value, String> {
        return self.call(Operation::GetVersion, &[]);
    }

    fn next_sim_time_step(&mut self, args: &[Value]) -> Result<Value, String> {
        return self.call(Operation::NextSimTimeStep, args);
    }

    fn close(&mut self) -> Result<Value, String> {
        return self.call(Operation::Close, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_call_succeeds_with_null() {
        let mut control = DryRunControl::new();
        assert_eq!(control.send_file(&[json!("scenario.json")]), Ok(Value::Null));
        assert_eq!(control.get_version(), Ok(Value::Null));
        assert_eq!(control.next_sim_time_step(&[json!(0.4)]), Ok(Value::Null));
        assert_eq!(control.close(), Ok(Value::Null));
        assert_eq!(control.close(), Ok(Value::Null));
    }
}

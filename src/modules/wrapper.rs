use crate::modules::traits::{Control, Operation};
use crate::try_result;

use serde_json::Value;
use std::io::{self, Stdout, Write};

/**
  * Forwards calls to a control delegate and prints every returned value to the output.
  *
  * The delegate is required on construction and owned by the wrapper. Arguments and
  * errors pass through unchanged; nothing is validated, retried or translated here.
  */
pub struct ControlWrapper<C: Control, W: Write = Stdout> {
    delegate: C,
    output: W
}

impl<C: Control> ControlWrapper<C> {
    pub fn new(delegate: C) -> Self {
        return ControlWrapper::with_output(delegate, io::stdout());
    }
}

impl<C: Control, W: Write> ControlWrapper<C, W> {
    pub fn with_output(delegate: C, output: W) -> Self {
        return ControlWrapper { delegate, output };
    }

    pub fn send_file(&mut self, args: &[Value]) -> Result<Value, String> {
        debug!("Forwarding {} with {} argument(s)", Operation::SendFile.remote_name(), args.len());
        let value = self.delegate.send_file(args)?;
        return self.print(value);
    }

    pub fn get_version(&mut self) -> Result<Value, String> {
        debug!("Forwarding {}", Operation::GetVersion.remote_name());
        let value = self.delegate.get_version()?;
        return self.print(value);
    }

    /// Forwarded as `nextSimTimeStep`
    pub fn next_step(&mut self, args: &[Value]) -> Result<Value, String> {
        debug!("Forwarding {} with {} argument(s)", Operation::NextSimTimeStep.remote_name(), args.len());
        let value = self.delegate.next_sim_time_step(args)?;
        return self.print(value);
    }

    /**
      * Should be called at most once. Every call is forwarded, so a second close
      * returns whatever the delegate does when closed twice.
      */
    pub fn close(&mut self) -> Result<Value, String> {
        debug!("Forwarding {}", Operation::Close.remote_name());
        let value = self.delegate.close()?;
        return self.print(value);
    }

    fn print(&mut self, value: Value) -> Result<Value, String> {
        let line = match &value {
            Value::String(text) => text.clone(),
            other => other.to_string()
        };
        try_result!(writeln!(self.output, "{}", line), "Could not write result to output");
        return Ok(value);
    }
}

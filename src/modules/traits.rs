use serde_json::Value;

/// The operations a remote simulation controller offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SendFile,
    GetVersion,
    NextSimTimeStep,
    Close
}

impl Operation {
    /// Method name on the remote side
    pub fn remote_name(&self) -> &'static str {
        return match self {
            Operation::SendFile => "sendFile",
            Operation::GetVersion => "getVersion",
            Operation::NextSimTimeStep => "nextSimTimeStep",
            Operation::Close => "close"
        }
    }
}

/**
  * Contract of a remote simulation controller. Arguments are positional and passed
  * as given; rejecting arguments of the wrong type or arity is up to the implementation.
  *
  * Errors of the remote side or the transport are returned as message.
  */
pub trait Control {
    fn send_file(&mut self, args: &[Value]) -> Result<Value, String>;
    fn get_version(&mut self) -> Result<Value, String>;
    fn next_sim_time_step(&mut self, args: &[Value]) -> Result<Value, String>;
    fn close(&mut self) -> Result<Value, String>;
}

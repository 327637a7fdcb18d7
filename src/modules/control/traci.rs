use crate::modules::traits::{Control, Operation};
use crate::util::io::file;
use crate::util::objects::configuration::Configuration;
use crate::util::traci::buffer::{TraciPacket, TraciReader, TraciWriter};
use crate::util::traci::cmd::TraciCmd;
use crate::util::traci::response::{SimStepResponse, StatusResponse, VersionResponse};
use crate::util::traci::socket::{ConnectOptions, TraciSocket};
use crate::{try_option, try_result};

use serde_json::Value;
use std::time::Duration;

/// Controls a remote simulator over a TraCI connection
pub struct TraciControl {
    socket: Option<TraciSocket>
}

impl TraciControl {
    pub const MODULE_NAME: &'static str = "traci";

    pub fn new(config: &Configuration) -> Result<Box<Self>, String> {
        let options = ConnectOptions {
            host: config.host.clone(),
            port: config.port,
            retries: config.connect_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            timeout: config.timeout.map(Duration::from_secs)
        };

        let socket = TraciSocket::connect(&options)?;
        return Ok(Box::new(TraciControl::from_socket(socket)));
    }

    pub fn from_socket(socket: TraciSocket) -> Self {
        return TraciControl { socket: Some(socket) };
    }

    /// Send a single command and return the status and the rest of the response packet
    fn request(&mut self, cmd: TraciCmd, payload: &[u8]) -> Result<(StatusResponse, TraciReader), String> {
        let socket = try_option!(self.socket.as_mut(), "TraCI connection is closed");

        let mut packet = TraciPacket::new();
        packet.add_command(cmd, payload)?;
        socket.send_exact(&packet)?;

        let data = socket.receive_exact()?;
        let mut reader = TraciReader::from_bytes(data);
        let status = StatusResponse::read(&mut reader)?;
        status.expect_ok(cmd)?;
        debug!("TraCI command {:?} done: '{}'", cmd, status.description);

        return Ok((status, reader));
    }
}

impl Control for TraciControl {
    fn send_file(&mut self, args: &[Value]) -> Result<Value, String> {
        let (name, content) = match args {
            [Value::String(path)] => (file::stem(path)?, file::read(path)?),
            [Value::String(name), Value::String(content)] => (name.clone(), content.clone()),
            _ => return Err(invalid_arguments(Operation::SendFile, "a file path or a name and content", args))
        };

        info!("Sending scenario '{}' ({} bytes)", name, content.len());
        let mut writer = TraciWriter::new();
        writer.write_string(&name)?.write_string(&content)?;

        let (status, _) = self.request(TraciCmd::SendFile, &writer.into_bytes())?;
        return Ok(Value::String(status.description));
    }

    fn get_version(&mut self) -> Result<Value, String> {
        let (_, mut rest) = self.request(TraciCmd::GetVersion, &[])?;
        let version = VersionResponse::read(&mut rest)?;
        return Ok(try_result!(serde_json::to_value(version), "Could not convert version response"));
    }

    fn next_sim_time_step(&mut self, args: &[Value]) -> Result<Value, String> {
        let target_time = match args {
            [] => 0.0,
            [Value::Number(time)] => try_option!(time.as_f64(), "Simulation time is not representable as double"),
            _ => return Err(invalid_arguments(Operation::NextSimTimeStep, "no argument or a simulation time", args))
        };

        trace!("Advancing simulation to {}", target_time);
        let mut writer = TraciWriter::new();
        writer.write_double(target_time);

        let (_, mut rest) = self.request(TraciCmd::SimStep, &writer.into_bytes())?;
        let step = SimStepResponse::read(&mut rest)?;
        return Ok(try_result!(serde_json::to_value(step), "Could not convert sim step response"));
    }

    fn close(&mut self) -> Result<Value, String> {
        let (status, _) = self.request(TraciCmd::Close, &[])?;

        if let Some(socket) = self.socket.take() {
            socket.close();
        }
        info!("TraCI connection closed");

        return Ok(Value::String(status.description));
    }
}

fn invalid_arguments(operation: Operation, expected: &str, args: &[Value]) -> String {
    let msg = format!("Invalid arguments for {}: expected {}, got {}",
        operation.remote_name(), expected, Value::Array(args.to_vec()));
    error!("{}", msg);
    return msg;
}

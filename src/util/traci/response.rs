use crate::util::traci::buffer::TraciReader;
use crate::util::traci::cmd::{StatusCode, TraciCmd};

use serde::Serialize;

/// First command of every response packet
#[derive(Debug, PartialEq)]
pub struct StatusResponse {
    pub cmd: TraciCmd,
    pub code: StatusCode,
    pub description: String
}

#[derive(Debug, PartialEq, Serialize)]
pub struct VersionResponse {
    pub api_version: i32,
    pub identifier: String
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SubscriptionResult {
    pub id: u8,
    pub len: usize
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SimStepResponse {
    pub subscriptions: Vec<SubscriptionResult>
}

impl StatusResponse {
    pub fn read(reader: &mut TraciReader) -> Result<StatusResponse, String> {
        let (id, mut content) = reader.read_command()?;
        let cmd = TraciCmd::from_id(id)?;
        let code = StatusCode::from_id(content.read_u8()?)?;
        let description = content.read_string()?;

        return Ok(StatusResponse { cmd, code, description });
    }

    /**
      * Fail if the response does not belong to the expected command or if the server
      * reported an error.
      */
    pub fn expect_ok(&self, expected: TraciCmd) -> Result<(), String> {
        if self.cmd != expected {
            let msg = format!("TraCI status response for {:?} received, expected {:?}", self.cmd, expected);
            error!("{}", msg);
            return Err(msg);
        }

        if self.code != StatusCode::Ok {
            let msg = format!("TraCI command {:?} failed with status 0x{:02X} ({:?}): {}",
                self.cmd, self.code.id(), self.code, self.description);
            error!("{}", msg);
            return Err(msg);
        }

        return Ok(());
    }
}

impl VersionResponse {
    pub fn read(reader: &mut TraciReader) -> Result<VersionResponse, String> {
        let (id, mut content) = reader.read_command()?;
        if id != TraciCmd::GetVersion.id() {
            let msg = format!("Expected version response, got command 0x{:02X}", id);
            error!("{}", msg);
            return Err(msg);
        }

        let api_version = content.read_int()?;
        let identifier = content.read_string()?;
        return Ok(VersionResponse { api_version, identifier });
    }
}

impl SimStepResponse {
    /**
      * The sim step response does not follow the standard command structure: after
      * the status command there is an int with the number of subscription results,
      * followed by the results as framed commands.
      */
    pub fn read(reader: &mut TraciReader) -> Result<SimStepResponse, String> {
        let count = reader.read_int()?;
        if count < 0 {
            let msg = format!("Negative number of subscription results: {}", count);
            error!("{}", msg);
            return Err(msg);
        }

        // the count comes from the peer, results are only collected as they are read
        let mut subscriptions = Vec::new();
        for _ in 0..count {
            let (id, content) = reader.read_command()?;
            subscriptions.push(SubscriptionResult { id, len: content.remaining() });
        }

        if reader.has_remaining() {
            warn!("Ignoring {} unexpected bytes after sim step response", reader.remaining());
        }

        return Ok(SimStepResponse { subscriptions });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::traci::buffer::{TraciPacket, TraciWriter};

    fn status_bytes(cmd: TraciCmd, code: u8, description: &str) -> Vec<u8> {
        let mut payload = vec![code];
        let mut writer = TraciWriter::new();
        writer.write_string(description).unwrap();
        payload.extend(writer.into_bytes());

        let mut packet = TraciPacket::new();
        packet.add_command(cmd, &payload).unwrap();
        packet.to_bytes().unwrap()[4..].to_vec()
    }

    #[test]
    fn ok_status_is_accepted() {
        let data = status_bytes(TraciCmd::Close, 0x00, "");
        let status = StatusResponse::read(&mut TraciReader::new(&data)).unwrap();
        assert_eq!(status.code, StatusCode::Ok);
        assert!(status.expect_ok(TraciCmd::Close).is_ok());
    }

    #[test]
    fn error_status_carries_description() {
        let data = status_bytes(TraciCmd::SendFile, 0xFF, "scenario could not be parsed");
        let status = StatusResponse::read(&mut TraciReader::new(&data)).unwrap();
        let err = status.expect_ok(TraciCmd::SendFile).unwrap_err();
        assert!(err.contains("scenario could not be parsed"));
        assert!(err.contains("0xFF"));
    }

    #[test]
    fn status_for_other_command_is_rejected() {
        let data = status_bytes(TraciCmd::GetVersion, 0x00, "");
        let status = StatusResponse::read(&mut TraciReader::new(&data)).unwrap();
        assert!(status.expect_ok(TraciCmd::SimStep).is_err());
    }

    #[test]
    fn version_response_is_decoded() {
        let mut writer = TraciWriter::new();
        writer.write_int(20).write_string("Vadere Simulator").unwrap();
        let mut packet = TraciPacket::new();
        packet.add_command(TraciCmd::GetVersion, &writer.into_bytes()).unwrap();
        let data = packet.to_bytes().unwrap();

        let version = VersionResponse::read(&mut TraciReader::new(&data[4..])).unwrap();
        assert_eq!(version, VersionResponse { api_version: 20, identifier: String::from("Vadere Simulator") });
    }

    #[test]
    fn sim_step_subscriptions_are_counted() {
        let mut data = 2i32.to_be_bytes().to_vec();
        data.extend_from_slice(&[4, 0xE1, 9, 9]);
        data.extend_from_slice(&[0, 0, 0, 0, 7, 0xE2, 1]);

        let step = SimStepResponse::read(&mut TraciReader::new(&data)).unwrap();
        assert_eq!(step.subscriptions, vec![
            SubscriptionResult { id: 0xE1, len: 2 },
            SubscriptionResult { id: 0xE2, len: 1 }
        ]);
    }

    #[test]
    fn sim_step_count_beyond_data_fails() {
        let data = i32::MAX.to_be_bytes();
        assert!(SimStepResponse::read(&mut TraciReader::new(&data)).is_err());

        let data = (-1i32).to_be_bytes();
        assert!(SimStepResponse::read(&mut TraciReader::new(&data)).is_err());
    }

    #[test]
    fn status_with_overflowing_length_fails() {
        let data = [0u8, 0x80, 0, 0, 0, 0x00];
        assert!(StatusResponse::read(&mut TraciReader::new(&data)).is_err());
    }
}

/// TraCI control commands used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraciCmd {
    GetVersion,
    SimStep,
    SendFile,
    Close
}

impl TraciCmd {
    pub fn id(&self) -> u8 {
        return match self {
            TraciCmd::GetVersion => 0x00,
            TraciCmd::SimStep => 0x02,
            TraciCmd::SendFile => 0x75,
            TraciCmd::Close => 0x7F
        }
    }

    pub fn from_id(id: u8) -> Result<TraciCmd, String> {
        return Ok(match id {
            0x00 => TraciCmd::GetVersion,
            0x02 => TraciCmd::SimStep,
            0x75 => TraciCmd::SendFile,
            0x7F => TraciCmd::Close,
            unknown => {
                let msg = format!("Unknown TraCI command identifier: 0x{:02X}", unknown);
                error!("{}", msg);
                return Err(msg);
            }
        })
    }
}

/// Result code of a status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    NotImplemented,
    Err
}

impl StatusCode {
    pub fn id(&self) -> u8 {
        return match self {
            StatusCode::Ok => 0x00,
            StatusCode::NotImplemented => 0x01,
            StatusCode::Err => 0xFF
        }
    }

    pub fn from_id(id: u8) -> Result<StatusCode, String> {
        return Ok(match id {
            0x00 => StatusCode::Ok,
            0x01 => StatusCode::NotImplemented,
            0xFF => StatusCode::Err,
            unknown => {
                let msg = format!("Unknown TraCI status code: 0x{:02X}", unknown);
                error!("{}", msg);
                return Err(msg);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_ids_are_stable() {
        assert_eq!(TraciCmd::GetVersion.id(), 0x00);
        assert_eq!(TraciCmd::SimStep.id(), 0x02);
        assert_eq!(TraciCmd::SendFile.id(), 0x75);
        assert_eq!(TraciCmd::Close.id(), 0x7F);
        assert_eq!(TraciCmd::from_id(0x75), Ok(TraciCmd::SendFile));
    }

    #[test]
    fn unknown_identifiers_are_rejected() {
        assert!(TraciCmd::from_id(0xA4).is_err());
        assert!(StatusCode::from_id(0x02).is_err());
        assert_eq!(StatusCode::from_id(0xFF), Ok(StatusCode::Err));
    }
}

use crate::util::traci::cmd::TraciCmd;
use crate::try_result;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::convert::TryFrom;

/// Length of the packet length field that precedes every packet
pub const PACKET_LEN_LENGTH: usize = 4;

/// Command length (1 ubyte + 1 int) of the extended length field itself
const EXTENDED_LEN_LENGTH: i32 = 5;

/**
  * Builds the payload of a single command. The command framing (length field and
  * identifier) is added by `TraciPacket::add_command`.
  */
pub struct TraciWriter {
    data: BytesMut
}

impl TraciWriter {
    pub fn new() -> Self {
        return TraciWriter { data: BytesMut::new() };
    }

    pub fn write_int(&mut self, value: i32) -> &mut Self {
        self.data.put_i32(value);
        return self;
    }

    pub fn write_double(&mut self, value: f64) -> &mut Self {
        self.data.put_f64(value);
        return self;
    }

    pub fn write_string(&mut self, value: &str) -> Result<&mut Self, String> {
        let len = try_result!(i32::try_from(value.len()), "String is too long for a TraCI command");
        self.data.put_i32(len);
        self.data.put_slice(value.as_bytes());
        return Ok(self);
    }

    pub fn into_bytes(self) -> Bytes {
        return self.data.freeze();
    }
}

/**
  * A packet as sent over the socket: the commands it holds, without the leading
  * packet length (added when the packet is sent).
  */
pub struct TraciPacket {
    data: BytesMut
}

impl TraciPacket {
    pub fn new() -> Self {
        return TraciPacket { data: BytesMut::new() };
    }

    /**
      * Append one command. Uses the short length field if the whole command fits
      * into 255 bytes, the extended length field (0 followed by an int) otherwise.
      */
    pub fn add_command(&mut self, cmd: TraciCmd, payload: &[u8]) -> Result<&mut Self, String> {
        let short_len = 1 + 1 + payload.len();
        if short_len <= 255 {
            self.data.put_u8(short_len as u8);
        } else {
            let extended_len = try_result!(i32::try_from(short_len + 4), "Command is too long for a TraCI packet");
            self.data.put_u8(0);
            self.data.put_i32(extended_len);
        }
        self.data.put_u8(cmd.id());
        self.data.put_slice(payload);
        return Ok(self);
    }

    /// Packet bytes including the leading length field
    pub fn to_bytes(&self) -> Result<Bytes, String> {
        let total = try_result!(i32::try_from(PACKET_LEN_LENGTH + self.data.len()), "Packet is too long");
        let mut bytes = BytesMut::with_capacity(PACKET_LEN_LENGTH + self.data.len());
        bytes.put_i32(total);
        bytes.put_slice(&self.data);
        return Ok(bytes.freeze());
    }
}

/// Reads primitive values and framed commands from a received packet
#[derive(Debug)]
pub struct TraciReader {
    data: Bytes
}

impl TraciReader {
    pub fn new(data: &[u8]) -> Self {
        return TraciReader::from_bytes(Bytes::copy_from_slice(data));
    }

    pub fn from_bytes(data: Bytes) -> Self {
        return TraciReader { data };
    }

    pub fn has_remaining(&self) -> bool {
        return self.data.has_remaining();
    }

    pub fn remaining(&self) -> usize {
        return self.data.remaining();
    }

    fn ensure(&self, len: usize) -> Result<(), String> {
        if self.data.remaining() < len {
            let msg = format!("Unexpected end of TraCI data: {} bytes requested, {} available", len, self.data.remaining());
            error!("{}", msg);
            return Err(msg);
        }
        return Ok(());
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, String> {
        self.ensure(len)?;
        return Ok(self.data.copy_to_bytes(len));
    }

    pub fn read_u8(&mut self) -> Result<u8, String> {
        self.ensure(1)?;
        return Ok(self.data.get_u8());
    }

    pub fn read_int(&mut self) -> Result<i32, String> {
        self.ensure(4)?;
        return Ok(self.data.get_i32());
    }

    pub fn read_string(&mut self) -> Result<String, String> {
        let len = self.read_int()?;
        if len < 0 {
            let msg = format!("Negative string length in TraCI data: {}", len);
            error!("{}", msg);
            return Err(msg);
        }

        let bytes = self.read_bytes(len as usize)?;
        let value = try_result!(String::from_utf8(bytes.to_vec()), "TraCI string is not valid UTF-8");
        return Ok(value);
    }

    /**
      * Read the length field of a command and return the number of bytes that follow
      * it (identifier and payload).
      */
    pub fn read_command_len(&mut self) -> Result<usize, String> {
        let short_len = self.read_u8()?;
        let (field, len) = if short_len == 0 {
            let extended_len = self.read_int()?;
            (extended_len, extended_len.checked_sub(EXTENDED_LEN_LENGTH))
        } else {
            (short_len as i32, Some(short_len as i32 - 1))
        };

        return match len {
            Some(len) if len >= 1 => Ok(len as usize),
            _ => {
                let msg = format!("Invalid TraCI command length: {}", field);
                error!("{}", msg);
                Err(msg)
            }
        };
    }

    /// Read one framed command, returning its raw identifier and a reader over its payload
    pub fn read_command(&mut self) -> Result<(u8, TraciReader), String> {
        let len = self.read_command_len()?;
        let mut content = self.read_bytes(len)?;
        let id = content.get_u8();
        return Ok((id, TraciReader::from_bytes(content)));
    }
}

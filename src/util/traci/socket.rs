use crate::util::traci::buffer::{TraciPacket, PACKET_LEN_LENGTH};
use crate::try_result;

use bytes::{Buf, Bytes, BytesMut};
use dns_lookup::lookup_host;
use std::io::{Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpStream};
use std::thread::sleep;
use std::time::Duration;

/// Largest packet accepted from the peer, including the packet length field
pub const MAX_PACKET_LEN: i32 = 64 * 1024 * 1024;

/// Settings needed to open a TraCI connection
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub retries: u32,
    pub retry_delay: Duration,
    pub timeout: Option<Duration>
}

/// Blocking TCP socket that sends and receives whole TraCI packets
#[derive(Debug)]
pub struct TraciSocket {
    stream: TcpStream
}

impl TraciSocket {
    pub fn connect(options: &ConnectOptions) -> Result<TraciSocket, String> {
        let addresses = resolve(&options.host, options.port)?;

        let mut attempt = 0;
        loop {
            for address in addresses.iter() {
                trace!("Trying to connect to TraCI server at '{}'", address);
                match TcpStream::connect(address) {
                    Ok(stream) => {
                        info!("Connected to TraCI server at '{}'", address);
                        return TraciSocket::from_stream(stream, options.timeout);
                    },
                    Err(err) => debug!("Connection to '{}' failed: {}", address, err)
                }
            }

            if attempt >= options.retries {
                let msg = format!("Could not connect to TraCI server '{}:{}' after {} attempts", options.host, options.port, attempt + 1);
                error!("{}", msg);
                return Err(msg);
            }

            attempt += 1;
            warn!("TraCI server '{}:{}' not reachable, retrying in {:?} ({}/{})", options.host, options.port, options.retry_delay, attempt, options.retries);
            sleep(options.retry_delay);
        }
    }

    pub fn from_stream(stream: TcpStream, timeout: Option<Duration>) -> Result<TraciSocket, String> {
        try_result!(stream.set_read_timeout(timeout), "Could not set read timeout on TraCI socket");
        try_result!(stream.set_write_timeout(timeout), "Could not set write timeout on TraCI socket");
        try_result!(stream.set_nodelay(true), "Could not disable Nagle's algorithm on TraCI socket");
        return Ok(TraciSocket { stream });
    }

    pub fn send_exact(&mut self, packet: &TraciPacket) -> Result<(), String> {
        let bytes = packet.to_bytes()?;
        trace!("Sending TraCI packet of {} bytes", bytes.len());
        try_result!(self.stream.write_all(&bytes), "Could not send TraCI packet");
        try_result!(self.stream.flush(), "Could not flush TraCI socket");
        return Ok(());
    }

    /// Receive one packet and return its content without the packet length field
    pub fn receive_exact(&mut self) -> Result<Bytes, String> {
        let mut len_buf = [0u8; PACKET_LEN_LENGTH];
        try_result!(self.stream.read_exact(&mut len_buf), "Could not read TraCI packet length");

        let total = (&len_buf[..]).get_i32();
        if total <= PACKET_LEN_LENGTH as i32 || total > MAX_PACKET_LEN {
            let msg = format!("Invalid TraCI packet length: {}", total);
            error!("{}", msg);
            return Err(msg);
        }

        let mut data = BytesMut::zeroed(total as usize - PACKET_LEN_LENGTH);
        try_result!(self.stream.read_exact(&mut data), "Could not read TraCI packet content");
        trace!("Received TraCI packet of {} bytes", total);
        return Ok(data.freeze());
    }

    pub fn close(self) {
        // the peer may already have dropped the connection after answering
        if let Err(err) = self.stream.shutdown(Shutdown::Both) {
            warn!("Could not shut down TraCI socket: {}", err);
        }
    }
}

fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, String> {
    let ips: Vec<IpAddr> = match host.parse::<IpAddr>() {
        Ok(ip) => vec![ip],
        Err(_) => try_result!(lookup_host(host), format!("Could not resolve host '{}'", host))
    };

    if ips.is_empty() {
        let msg = format!("Host '{}' did not resolve to any address", host);
        error!("{}", msg);
        return Err(msg);
    }

    return Ok(ips.into_iter().map(|ip| SocketAddr::new(ip, port)).collect());
}

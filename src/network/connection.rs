//! Device Connection
//!
//! A single short-lived TCP connection to a jambel.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{JambelError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// One request/response exchange with a device
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to the configured endpoint
    ///
    /// Every resolved address is tried in turn; the last failure is returned.
    pub fn open(config: &Config) -> Result<Self> {
        let endpoint = &config.endpoint;
        tracing::debug!("Connecting to {}...", endpoint);

        let addrs = (endpoint.host.as_str(), endpoint.port).to_socket_addrs()?;

        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            let attempt = if config.connect_timeout_ms > 0 {
                TcpStream::connect_timeout(&addr, Duration::from_millis(config.connect_timeout_ms))
            } else {
                TcpStream::connect(addr)
            };
            match attempt {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = match (stream, last_err) {
            (Some(stream), _) => stream,
            (None, Some(e)) => return Err(JambelError::Communication(e)),
            (None, None) => {
                return Err(JambelError::Communication(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} did not resolve to any address", endpoint),
                )))
            }
        };

        Self::from_stream(stream, config.read_timeout_ms, config.write_timeout_ms)
    }

    /// Wrap an established stream and configure timeouts
    pub fn from_stream(stream: TcpStream, read_ms: u64, write_ms: u64) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Commands are tiny; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        if read_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Send one command and wait for its response line
    pub fn request(&mut self, command: &Command) -> Result<Response> {
        tracing::debug!("Send command {:?} to {}", command, self.peer_addr);
        write_command(&mut self.writer, command)?;

        let response = read_response(&mut self.reader)?;
        tracing::debug!("Received response {:?} from {}", response, self.peer_addr);
        Ok(response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

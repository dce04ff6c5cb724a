//! Device Simulator
//!
//! An in-process TCP server that speaks the jambel line protocol. It keeps
//! raw per-module codes so tests can inject states a real device might
//! report, and records the request lines it receives in a bounded log.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::config::Endpoint;
use crate::error::{JambelError, Result};
use crate::protocol::{encode_command, read_command, write_response, Command, Response, MAX_MILLIS};
use crate::light::LampState;

/// Default blink on/off time reported after a reset (milliseconds)
pub const DEFAULT_BLINK_MILLIS: u32 = 500;

/// Request lines kept by [`Simulator::start`] until drained
pub const DEFAULT_REQUEST_LOG_CAPACITY: usize = 1024;

/// How the simulator answers requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMode {
    /// Execute the command and answer per protocol
    Normal,

    /// Answer every request with this exact line
    Fixed(String),

    /// Read requests but never answer
    Silent,
}

/// Simulated device state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Raw state codes, module 1 first
    pub modules: [u8; 3],

    /// Global blink on-time (milliseconds)
    pub blink_time_on: u32,

    /// Global blink off-time (milliseconds)
    pub blink_time_off: u32,

    /// Per-module blink (on, off) times, module 1 first
    pub module_blink_times: [(u32, u32); 3],
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            modules: [LampState::Off.code(); 3],
            blink_time_on: DEFAULT_BLINK_MILLIS,
            blink_time_off: DEFAULT_BLINK_MILLIS,
            module_blink_times: [(DEFAULT_BLINK_MILLIS, DEFAULT_BLINK_MILLIS); 3],
        }
    }
}

/// State shared between the acceptor and connection threads
struct Shared {
    device: Mutex<DeviceState>,
    reply: Mutex<ReplyMode>,
    shutdown: AtomicBool,
    /// `None` when request logging is off
    log: Option<Sender<String>>,
}

impl Shared {
    /// Append to the request log; lines past capacity are dropped
    fn record(&self, line: String) {
        if let Some(log) = &self.log {
            if log.try_send(line).is_err() {
                tracing::trace!("Simulator request log full, dropping line");
            }
        }
    }
}

/// Simulated jambel listening on a TCP port
pub struct Simulator {
    local_addr: SocketAddr,
    shared: Arc<Shared>,
    received: Receiver<String>,
    acceptor: Option<JoinHandle<()>>,
}

impl Simulator {
    /// Bind and start accepting connections in the background
    ///
    /// Keeps up to [`DEFAULT_REQUEST_LOG_CAPACITY`] undrained request lines.
    pub fn start(addr: impl ToSocketAddrs) -> Result<Self> {
        Self::start_with_log_capacity(addr, DEFAULT_REQUEST_LOG_CAPACITY)
    }

    /// Like [`Simulator::start`], keeping at most `capacity` undrained request
    /// lines; 0 turns request logging off
    pub fn start_with_log_capacity(addr: impl ToSocketAddrs, capacity: usize) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;
        let (log_tx, log_rx) = if capacity > 0 {
            let (tx, rx) = channel::bounded(capacity);
            (Some(tx), rx)
        } else {
            (None, channel::never())
        };

        let shared = Arc::new(Shared {
            device: Mutex::new(DeviceState::default()),
            reply: Mutex::new(ReplyMode::Normal),
            shutdown: AtomicBool::new(false),
            log: log_tx,
        });

        let acceptor_shared = Arc::clone(&shared);
        let acceptor = std::thread::Builder::new()
            .name("jambel-sim-acceptor".to_string())
            .spawn(move || accept_loop(listener, acceptor_shared))?;

        tracing::info!("Simulator listening on {}", local_addr);

        Ok(Self {
            local_addr,
            shared,
            received: log_rx,
            acceptor: Some(acceptor),
        })
    }

    /// Start on an ephemeral loopback port
    pub fn start_local() -> Result<Self> {
        Self::start("127.0.0.1:0")
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Endpoint a client should use to reach this simulator
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.local_addr.ip().to_string(), self.local_addr.port())
    }

    /// Snapshot of the simulated device
    pub fn state(&self) -> DeviceState {
        self.shared.device.lock().clone()
    }

    /// Raw state codes, module 1 first
    pub fn modules(&self) -> [u8; 3] {
        self.shared.device.lock().modules
    }

    /// Overwrite raw state codes; values outside the state table are allowed
    pub fn set_modules(&self, modules: [u8; 3]) {
        self.shared.device.lock().modules = modules;
    }

    pub fn set_reply_mode(&self, mode: ReplyMode) {
        *self.shared.reply.lock() = mode;
    }

    /// Answer every request with `line`
    pub fn reply_with(&self, line: impl Into<String>) {
        self.set_reply_mode(ReplyMode::Fixed(line.into()));
    }

    /// Request lines received since the last call, oldest first
    ///
    /// Only well-formed commands are recorded, in their canonical form.
    pub fn received(&self) -> Vec<String> {
        self.received.try_iter().collect()
    }

    /// Block until the acceptor stops
    pub fn wait(mut self) {
        if let Some(handle) = self.acceptor.take() {
            let _ = handle.join();
        }
    }

    /// Stop accepting connections
    pub fn shutdown(&mut self) {
        if self.shared.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }
        // Wake the blocking accept
        let _ = TcpStream::connect(self.local_addr);
        if let Some(handle) = self.acceptor.take() {
            let _ = handle.join();
        }
        tracing::info!("Simulator on {} stopped", self.local_addr);
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Connection Handling
// =============================================================================

fn accept_loop(listener: TcpListener, shared: Arc<Shared>) {
    for stream in listener.incoming() {
        if shared.shutdown.load(Ordering::SeqCst) {
            break;
        }
        match stream {
            Ok(stream) => {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    if let Err(e) = handle_client(stream, &shared) {
                        tracing::warn!("Simulator connection error: {}", e);
                    }
                });
            }
            Err(e) => tracing::warn!("Simulator accept failed: {}", e),
        }
    }
}

/// Serve request lines until the client disconnects
fn handle_client(stream: TcpStream, shared: &Shared) -> Result<()> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    tracing::debug!("Simulator connection from {}", peer_addr);

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    loop {
        // Undecodable lines still get an answer; only transport errors end the loop
        let request = match read_command(&mut reader) {
            Ok(command) => Ok(command),
            Err(JambelError::Protocol(reason)) => Err(reason),
            Err(JambelError::Communication(ref e))
                if matches!(
                    e.kind(),
                    ErrorKind::UnexpectedEof
                        | ErrorKind::ConnectionReset
                        | ErrorKind::ConnectionAborted
                ) =>
            {
                tracing::debug!("Client {} disconnected", peer_addr);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match &request {
            Ok(command) => {
                tracing::trace!("Simulator received {:?} from {}", command, peer_addr);
                shared.record(encode_command(command));
            }
            Err(reason) => tracing::warn!("Bad request from {}: {}", peer_addr, reason),
        }

        let response = match &*shared.reply.lock() {
            ReplyMode::Silent => continue,
            ReplyMode::Fixed(line) => Response::Text(line.clone()),
            ReplyMode::Normal => match request {
                Ok(command) => execute(&mut shared.device.lock(), command),
                Err(reason) => Response::error(&reason),
            },
        };

        write_response(&mut writer, &response)?;
    }
}

/// Apply a command to the simulated device
fn execute(device: &mut DeviceState, command: Command) -> Response {
    match command {
        Command::Set { module, state } => {
            device.modules[(module - 1) as usize] = state.code();
            Response::Ok
        }
        Command::SetTimed { module, millis } => {
            if millis == 0 || millis > MAX_MILLIS {
                return Response::error("duration out of range");
            }
            // Timer expiry is not simulated
            device.modules[(module - 1) as usize] = LampState::On.code();
            Response::Ok
        }
        Command::SetAll { codes } => {
            device.modules = codes;
            Response::Ok
        }
        Command::Reset => {
            *device = DeviceState::default();
            Response::Ok
        }
        Command::BlinkTimeOn { millis } => {
            device.blink_time_on = millis;
            Response::Ok
        }
        Command::BlinkTimeOff { millis } => {
            device.blink_time_off = millis;
            Response::Ok
        }
        Command::BlinkTime {
            module,
            on_millis,
            off_millis,
        } => {
            device.module_blink_times[(module - 1) as usize] = (on_millis, off_millis);
            Response::Ok
        }
        Command::Status => {
            let [m1, m2, m3] = device.modules;
            Response::status(&[m1, m2, m3], &[0])
        }
        Command::Test => Response::Ok,
        Command::Version => Response::Text(format!("jambel-sim {}", crate::VERSION)),
    }
}

//! Raw TCP printers (port 9100)
//!
//! A connected [`TcpStream`] is already a [`Transport`](crate::Transport).
//! [`NetworkPrinter`] only knows where the printer is and how long to wait
//! for it; a session then writes straight onto the socket.

use std::io;
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::config::SessionConfig;
use crate::error::{PrintError, PrintResult};
use crate::session::Session;

/// Raw printing port used when an address has none
pub const DEFAULT_PORT: u16 = 9100;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const MIN_TIMEOUT: Duration = Duration::from_millis(1);
const ONLINE_CHECK_TIMEOUT: Duration = Duration::from_millis(500);

/// Address and timeout of one network printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse "192.168.1.100:9100", or a bare IP for port 9100
    pub fn parse(addr: &str) -> PrintResult<Self> {
        addr.parse::<SocketAddr>()
            .or_else(|_| {
                addr.parse::<IpAddr>()
                    .map(|ip| SocketAddr::new(ip, DEFAULT_PORT))
            })
            .map(Self::new)
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid printer address: {addr}")))
    }

    /// Connect, read and write timeout; clamped to at least 1 ms
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open the socket to the printer
    #[instrument(fields(addr = %self.addr))]
    pub fn connect(&self) -> PrintResult<TcpStream> {
        let stream = TcpStream::connect_timeout(&self.addr, self.timeout)
            .map_err(|e| self.connect_error(e))?;
        stream
            .set_write_timeout(Some(self.timeout))
            .and_then(|_| stream.set_read_timeout(Some(self.timeout)))
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected to printer");
        Ok(stream)
    }

    /// Connect and start a session on the socket
    pub fn open_session(&self, config: &SessionConfig) -> PrintResult<Session<TcpStream>> {
        Ok(Session::from_config(self.connect()?, config))
    }

    /// Whether the printer accepts a connection within 500 ms
    #[instrument(fields(addr = %self.addr))]
    pub fn is_online(&self) -> bool {
        match TcpStream::connect_timeout(&self.addr, ONLINE_CHECK_TIMEOUT) {
            Ok(_) => {
                info!("Printer online");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }

    fn connect_error(&self, e: io::Error) -> PrintError {
        match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                PrintError::Timeout(format!("Connection timeout: {}", self.addr))
            }
            _ => PrintError::Connection(format!("{}: {}", self.addr, e)),
        }
    }
}

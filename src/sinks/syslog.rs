//! Syslog sink over the local syslog socket. Unix-like platforms only.
//!
//! Records are written in the BSD format (RFC 3164) used for local
//! delivery: `<PRI>Mmm dd hh:mm:ss TAG[PID]: MESSAGE`. A datagram socket is
//! tried first, then a stream socket, on the configured path or on the
//! platform's well-known paths.
//!
//! The connection is shared between the sink (owned by the dispatch thread)
//! and a [`SyslogHandle`] kept by the logger, so it can be closed from the
//! application while dispatching continues.

use crate::core::timestamp::rfc3164;
use crate::core::{Facility, LogLevel, LoggerError, Result, Sink, SyslogConfig};
use chrono::Local;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::os::unix::net::{UnixDatagram, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sockets tried in order when no path is configured
pub const DEFAULT_SOCKET_PATHS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

enum Transport {
    Datagram(UnixDatagram),
    Stream(UnixStream),
}

impl Transport {
    fn connect(path: &Path) -> io::Result<Self> {
        let datagram = UnixDatagram::unbound().and_then(|socket| {
            socket.connect(path)?;
            Ok(socket)
        });

        match datagram {
            Ok(socket) => Ok(Transport::Datagram(socket)),
            Err(_) => UnixStream::connect(path).map(Transport::Stream),
        }
    }

    fn send(&mut self, record: &[u8]) -> io::Result<()> {
        match self {
            Transport::Datagram(socket) => socket.send(record).map(|_| ()),
            Transport::Stream(stream) => stream.write_all(record),
        }
    }
}

struct Connection {
    transport: Mutex<Option<Transport>>,
    path: PathBuf,
}

/// Closes the syslog connection from outside the dispatch thread.
#[derive(Clone)]
pub struct SyslogHandle {
    connection: Arc<Connection>,
}

impl SyslogHandle {
    pub fn is_open(&self) -> bool {
        self.connection.transport.lock().is_some()
    }

    /// Socket the connection was made on
    pub fn path(&self) -> &Path {
        &self.connection.path
    }

    /// Close the connection. Fails if it is already closed.
    pub fn close(&self) -> Result<()> {
        match self.connection.transport.lock().take() {
            Some(_) => Ok(()),
            None => Err(LoggerError::sink_unavailable(
                "syslog",
                format!("connection to {} already closed", self.path().display()),
            )),
        }
    }
}

pub struct SyslogSink {
    identity: String,
    facility: Facility,
    pid: u32,
    connection: Arc<Connection>,
}

impl SyslogSink {
    /// Open the syslog connection described by `config`.
    pub fn connect(config: &SyslogConfig) -> Result<Self> {
        let (transport, path) = match &config.socket_path {
            Some(path) => {
                let transport = Transport::connect(path).map_err(|e| {
                    LoggerError::sink_unavailable("syslog", format!("{}: {}", path.display(), e))
                })?;
                (transport, path.clone())
            }
            None => Self::connect_first(&DEFAULT_SOCKET_PATHS.map(Path::new))?,
        };

        Ok(Self {
            identity: Self::identity_or_program_name(&config.identity),
            facility: config.facility,
            pid: std::process::id(),
            connection: Arc::new(Connection {
                transport: Mutex::new(Some(transport)),
                path,
            }),
        })
    }

    /// Connect to the first socket in `candidates` that accepts.
    fn connect_first(candidates: &[&Path]) -> Result<(Transport, PathBuf)> {
        let mut last_error = None;
        for path in candidates {
            match Transport::connect(path) {
                Ok(transport) => return Ok((transport, path.to_path_buf())),
                Err(e) => last_error = Some(format!("{}: {}", path.display(), e)),
            }
        }
        Err(LoggerError::sink_unavailable(
            "syslog",
            last_error.unwrap_or_else(|| "no socket path to try".to_string()),
        ))
    }

    fn identity_or_program_name(identity: &str) -> String {
        if !identity.is_empty() {
            return identity.to_string();
        }
        std::env::args()
            .next()
            .as_deref()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn handle(&self) -> SyslogHandle {
        SyslogHandle {
            connection: Arc::clone(&self.connection),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// PRI value: facility * 8 + severity
    pub fn priority(&self, level: LogLevel) -> u8 {
        self.facility.code() * 8 + level.syslog_severity()
    }

    fn format_record(&self, level: LogLevel, message: &str) -> String {
        let mut record = format!(
            "<{}>{} {}[{}]: {}",
            self.priority(level),
            rfc3164(&Local::now()),
            self.identity,
            self.pid,
            message
        );
        if !record.ends_with('\n') {
            record.push('\n');
        }
        record
    }
}

impl Sink for SyslogSink {
    fn write(&mut self, level: LogLevel, message: &str) -> Result<()> {
        let record = self.format_record(level, message);
        let mut transport = self.connection.transport.lock();

        match transport.as_mut() {
            Some(transport) => transport
                .send(record.as_bytes())
                .map_err(|e| LoggerError::write("syslog", e.to_string())),
            None => Err(LoggerError::write("syslog", "connection closed")),
        }
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

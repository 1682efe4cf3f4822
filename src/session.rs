use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt as _, StreamExt as _};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, info, trace, warn};

use crate::protocol::{self, Bank, Codec, Command, DEFAULT_PORT, Reply, Request};
use crate::register_map::{LengthMismatch, RegisterMap};

pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Held across every request/response exchange of every session in the process.
///
/// Luxtronik controllers become unstable when socket operations overlap, even across separate
/// connections.
static EXCHANGE_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("`{0}` is not a valid `host[:port]` address")]
    InvalidAddress(String),
    #[error("lookup of `{1}` failed")]
    LookupHost(#[source] std::io::Error, String),
    #[error("could not connect to `{1}` over TCP")]
    Connect(#[source] std::io::Error, String),
    #[error("connecting to `{1}` did not complete within {0:?}")]
    ConnectTimeout(Duration, String),
    #[error("could not configure the connection to `{1}`")]
    ConfigureSocket(#[source] std::io::Error, String),
    #[error("the session is not connected")]
    NotConnected,
    #[error("the session has been closed")]
    Closed,
    #[error("could not send out the {1} request")]
    Send(#[source] std::io::Error, Command),
    #[error("could not read the reply to {1}")]
    Receive(#[source] std::io::Error, Command),
    #[error("could not shut down the connection")]
    Shutdown(#[source] std::io::Error),
    #[error("no reply to {1} within {0:?}")]
    Timeout(Duration, Command),
    #[error("the controller closed the connection instead of replying to {0}")]
    ConnectionClosed(Command),
    #[error("the reply to {1} is malformed")]
    Framing(#[source] protocol::Error, Command),
    #[error("the controller replied to {0} with the wrong kind of reply")]
    UnexpectedReply(Command),
    #[error("the reply to {1} does not fit the register map")]
    LengthMismatch(#[source] LengthMismatch, Command),
}

impl Error {
    /// The connection itself failed, or could not be established.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::LookupHost(..)
                | Error::Connect(..)
                | Error::ConnectTimeout(..)
                | Error::ConfigureSocket(..)
                | Error::Send(..)
                | Error::Receive(..)
                | Error::Shutdown(..)
                | Error::Timeout(..)
                | Error::ConnectionClosed(..)
        )
    }

    /// The controller sent something that does not follow the protocol.
    pub fn is_framing(&self) -> bool {
        matches!(self, Error::Framing(..) | Error::UnexpectedReply(..))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAddress(s.to_string());
        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, rest) = rest.split_once(']').ok_or_else(invalid)?;
            match rest {
                "" => (host, None),
                _ => (host, Some(rest.strip_prefix(':').ok_or_else(invalid)?)),
            }
        } else if s.matches(':').count() > 1 {
            // A bare IPv6 address has no room for a port.
            s.parse::<std::net::Ipv6Addr>().map_err(|_| invalid())?;
            (s, None)
        } else {
            match s.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            }
        };
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let port = match port {
            None => DEFAULT_PORT,
            Some(port) => port.parse().map_err(|_| invalid())?,
        };
        Ok(Address { host: host.to_string(), port })
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

pub type OnConnect = Arc<dyn Fn(&TcpStream) -> std::io::Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct Options {
    /// Limit on resolving and connecting. Zero selects [`DEFAULT_DIAL_TIMEOUT`].
    pub dial_timeout: Duration,
    pub safe_mode: bool,
    /// Limit on a single request and its reply. No limit if `None`.
    pub exchange_timeout: Option<Duration>,
    /// Invoked with the freshly connected socket, e.g. to adjust socket options.
    pub on_connect: Option<OnConnect>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            safe_mode: false,
            exchange_timeout: None,
            on_connect: None,
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("dial_timeout", &self.dial_timeout)
            .field("safe_mode", &self.safe_mode)
            .field("exchange_timeout", &self.exchange_timeout)
            .field("on_connect", &self.on_connect.is_some())
            .finish()
    }
}

#[derive(clap::Parser, Clone)]
#[group(id = "session::Args")]
pub struct Args {
    /// Address of the heat pump controller, as `host[:port]`. The port defaults to 8889.
    #[arg(long, short = 'a', env = "HEATPUMP_IP")]
    address: String,

    /// Give up if resolving and connecting to the controller takes longer than this.
    #[arg(long, default_value = "1m")]
    dial_timeout: humantime::Duration,

    /// Consider a request failed if the controller does not reply to it within this time.
    ///
    /// The connection is dropped after a timeout, as any late reply would desynchronize it.
    #[arg(long)]
    exchange_timeout: Option<humantime::Duration>,

    /// Flag the session as running in safe mode. Currently only reported in the logs.
    #[arg(long)]
    safe_mode: bool,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            dial_timeout: *self.dial_timeout,
            safe_mode: self.safe_mode,
            exchange_timeout: self.exchange_timeout.map(Into::into),
            on_connect: None,
        }
    }

    pub async fn connect(&self) -> Result<Session, Error> {
        let mut session = Session::new(&self.address, self.options())?;
        session.connect().await?;
        Ok(session)
    }
}

enum State<T> {
    Unconnected(Address),
    Connected(Framed<T, Codec>),
    Closed,
}

/// One connection to one controller.
pub struct Session<T = TcpStream> {
    address: String,
    options: Options,
    state: State<T>,
}

impl Session {
    pub fn new(address: &str, mut options: Options) -> Result<Self, Error> {
        let parsed = address.parse::<Address>()?;
        if options.dial_timeout.is_zero() {
            options.dial_timeout = DEFAULT_DIAL_TIMEOUT;
        }
        Ok(Self { address: parsed.to_string(), options, state: State::Unconnected(parsed) })
    }

    /// Connect to the controller, unless already connected.
    pub async fn connect(&mut self) -> Result<(), Error> {
        let address = match &self.state {
            State::Connected(_) => return Ok(()),
            State::Closed => return Err(Error::Closed),
            State::Unconnected(address) => address,
        };
        info!(message = "connecting...", address = %self.address);
        let limit = self.options.dial_timeout;
        let socket = match tokio::time::timeout(limit, dial(address, &self.address)).await {
            Ok(socket) => socket?,
            Err(_) => return Err(Error::ConnectTimeout(limit, self.address.clone())),
        };
        let nodelay_result = socket.set_nodelay(true);
        trace!(message = "setting nodelay", is_error = ?nodelay_result.err());
        if let Some(on_connect) = &self.options.on_connect {
            on_connect(&socket).map_err(|e| Error::ConfigureSocket(e, self.address.clone()))?;
        }
        info!(message = "connected", safe_mode = self.options.safe_mode);
        self.state = State::Connected(Framed::new(socket, Codec::new()));
        Ok(())
    }
}

async fn dial(address: &Address, label: &str) -> Result<TcpStream, Error> {
    let addresses = tokio::net::lookup_host((address.host.as_str(), address.port))
        .await
        .map_err(|e| Error::LookupHost(e, label.to_string()))?
        .collect::<Vec<_>>();
    debug!(message = "resolved", ?addresses);
    TcpStream::connect(&*addresses).await.map_err(|e| Error::Connect(e, label.to_string()))
}

impl<T: AsyncRead + AsyncWrite + Unpin> Session<T> {
    /// A connected session over an already established transport.
    pub fn from_transport(io: T, options: Options) -> Self {
        Self {
            address: String::from("transport"),
            options,
            state: State::Connected(Framed::new(io, Codec::new())),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Flush and shut down the connection. Does nothing unless connected.
    pub async fn close(&mut self) -> Result<(), Error> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Connected(mut io) => {
                info!(message = "closing the connection", address = %self.address);
                io.close().await.map_err(Error::Shutdown)
            }
            State::Unconnected(address) => {
                self.state = State::Unconnected(address);
                Ok(())
            }
            State::Closed => Ok(()),
        }
    }

    /// Read a whole bank into `map`, which must have exactly as many registers as the bank.
    pub async fn read(&mut self, bank: Bank, map: &mut RegisterMap) -> Result<(), Error> {
        let command = bank.read_command();
        match self.exchange(Request::Read(bank)).await? {
            Reply::Registers { status, values, .. } => {
                if let Some(status) = status {
                    trace!(message = "status word", %command, status);
                }
                debug!(message = "received registers", %bank, count = values.len());
                map.set_raw_values(&values).map_err(|e| Error::LengthMismatch(e, command))
            }
            Reply::Written { .. } => Err(Error::UnexpectedReply(command)),
        }
    }

    pub async fn read_parameters(&mut self, map: &mut RegisterMap) -> Result<(), Error> {
        self.read(Bank::Parameters, map).await
    }

    pub async fn read_calculations(&mut self, map: &mut RegisterMap) -> Result<(), Error> {
        self.read(Bank::Calculations, map).await
    }

    pub async fn read_visibilities(&mut self, map: &mut RegisterMap) -> Result<(), Error> {
        self.read(Bank::Visibilities, map).await
    }

    /// Write a raw value to the parameter at `index`, returning the controller's acknowledgement.
    pub async fn write_parameter(&mut self, index: u32, raw: u32) -> Result<u32, Error> {
        info!(message = "writing parameter", index, raw, safe_mode = self.options.safe_mode);
        match self.exchange(Request::WriteParameter { index, value: raw }).await? {
            Reply::Written { value } => Ok(value),
            Reply::Registers { .. } => Err(Error::UnexpectedReply(Command::ParametersWrite)),
        }
    }

    async fn exchange(&mut self, request: Request) -> Result<Reply, Error> {
        let command = request.command();
        let _guard = EXCHANGE_LOCK.lock().await;
        // Taken out only once the lock is held. A future dropped during the roundtrip leaves the
        // session closed, never out of sync. One dropped while waiting for the lock changes
        // nothing.
        let mut io = match std::mem::replace(&mut self.state, State::Closed) {
            State::Connected(io) => io,
            State::Unconnected(address) => {
                self.state = State::Unconnected(address);
                return Err(Error::NotConnected);
            }
            State::Closed => return Err(Error::Closed),
        };
        debug!(message = "exchanging", %command);
        let result = match self.options.exchange_timeout {
            None => roundtrip(&mut io, request).await,
            Some(limit) => match tokio::time::timeout(limit, roundtrip(&mut io, request)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(limit, command)),
            },
        };
        match &result {
            Err(e) if e.is_transport() || e.is_framing() => {
                warn!(
                    message = "dropping the connection",
                    address = %self.address,
                    error = (e as &dyn std::error::Error)
                );
            }
            _ => self.state = State::Connected(io),
        }
        result
    }
}

async fn roundtrip<T: AsyncRead + AsyncWrite + Unpin>(
    io: &mut Framed<T, Codec>,
    request: Request,
) -> Result<Reply, Error> {
    let command = request.command();
    io.send(request).await.map_err(|e| Error::Send(e, command))?;
    match io.next().await {
        Some(Ok(reply)) => {
            trace!(message = "decoded a reply", %command);
            Ok(reply)
        }
        Some(Err(protocol::Error::Io(e))) => Err(Error::Receive(e, command)),
        Some(Err(e)) => Err(Error::Framing(e, command)),
        None => Err(Error::ConnectionClosed(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(s: &str) -> Result<Address, Error> {
        s.parse()
    }

    #[test]
    fn parses_addresses() {
        assert_eq!(
            address("192.168.0.121").unwrap(),
            Address { host: "192.168.0.121".into(), port: 8889 }
        );
        assert_eq!(address("heatpump.lan:9000").unwrap().port, 9000);
        let v6 = address("[fe80::1]:8888").unwrap();
        assert_eq!((v6.host.as_str(), v6.port), ("fe80::1", 8888));
        assert_eq!(v6.to_string(), "[fe80::1]:8888");
        assert_eq!(address("[::1]").unwrap().port, 8889);
        assert_eq!(address("::1").unwrap().host, "::1");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", ":8889", "host:", "host:port", "host:65536", "[::1", "[::1]8889", "a:::b"] {
            assert!(matches!(address(bad), Err(Error::InvalidAddress(_))), "{bad}");
        }
        assert!(matches!(
            Session::new("192.168.0.121:nope", Options::default()),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn zero_dial_timeout_selects_default() {
        let options = Options { dial_timeout: Duration::ZERO, ..Options::default() };
        let session = Session::new("192.168.0.121", options).unwrap();
        assert_eq!(session.options().dial_timeout, DEFAULT_DIAL_TIMEOUT);
        assert_eq!(session.address(), "192.168.0.121:8889");
        assert!(!session.is_connected());
        assert!(!session.is_closed());
    }

    #[test]
    fn error_kinds() {
        let io = || std::io::Error::from(std::io::ErrorKind::BrokenPipe);
        assert!(Error::Send(io(), Command::ParametersRead).is_transport());
        assert!(Error::ConnectionClosed(Command::ParametersRead).is_transport());
        let echo = protocol::Error::InvalidEcho { expected: Command::ParametersRead, received: 1 };
        assert!(Error::Framing(echo, Command::ParametersRead).is_framing());
        let mismatch = LengthMismatch { expected: 3, received: 4 };
        let mismatch = Error::LengthMismatch(mismatch, Command::CalculationsRead);
        assert!(!mismatch.is_transport() && !mismatch.is_framing());
        assert!(!Error::NotConnected.is_transport());
    }
}

use num_traits::FromPrimitive as _;
use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::wire::{self, WORD_SIZE};

pub const DEFAULT_PORT: u16 = 8889;

/// Replies announcing more registers than this are treated as a desynchronized stream.
pub const MAX_PLAUSIBLE_LENGTH: u32 = 65_535;

#[derive(Clone, Copy, Debug, PartialEq, Eq, num_derive::FromPrimitive, strum::Display)]
#[repr(i32)]
pub enum Command {
    ParametersWrite = 3002,
    ParametersRead = 3003,
    CalculationsRead = 3004,
    VisibilitiesRead = 3005,
}

impl Command {
    pub const fn word(self) -> i32 {
        self as i32
    }

    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_u32(word)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    clap::ValueEnum,
    serde::Serialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Bank {
    Parameters,
    Calculations,
    Visibilities,
}

impl Bank {
    pub const fn read_command(self) -> Command {
        match self {
            Bank::Parameters => Command::ParametersRead,
            Bank::Calculations => Command::CalculationsRead,
            Bank::Visibilities => Command::VisibilitiesRead,
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Bank::Parameters => "Parameter",
            Bank::Calculations => "Calculation",
            Bank::Visibilities => "Visibility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Read(Bank),
    WriteParameter { index: u32, value: u32 },
}

impl Request {
    pub fn command(&self) -> Command {
        match self {
            Request::Read(bank) => bank.read_command(),
            Request::WriteParameter { .. } => Command::ParametersWrite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Registers { command: Command, status: Option<u32>, values: Vec<u32> },
    Written { value: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not read the reply from the transport")]
    Io(#[from] std::io::Error),
    #[error("controller echoed command word {received} in reply to {expected}")]
    InvalidEcho { expected: Command, received: u32 },
    #[error("reply announces {0} registers, more than is plausible")]
    ImplausibleLength(u32),
    #[error("connection ended in the middle of a reply, {buffered} bytes left over")]
    Truncated { buffered: usize },
    #[error("received {0} bytes while no reply was outstanding")]
    Unsolicited(usize),
}

/// Frames requests and replies of the controller's TCP protocol.
///
/// Replies are not self-describing: a visibilities reply differs from a parameters reply only in
/// the width of its entries. The codec therefore remembers the command of the last request it
/// encoded and decodes the next reply accordingly.
#[derive(Debug, Default)]
pub struct Codec {
    expecting: Option<Command>,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expecting(&self) -> Option<Command> {
        self.expecting
    }
}

impl Encoder<Request> for Codec {
    type Error = std::io::Error;
    fn encode(&mut self, request: Request, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let command = request.command();
        match request {
            Request::Read(_) => wire::put_words(dst, &[command.word(), 0]),
            Request::WriteParameter { index, value } => {
                wire::put_words(dst, &[command.word(), index as i32, value as i32])
            }
        }
        self.expecting = Some(command);
        trace!(message = "sending encoded", %command, buffer = ?dst);
        Ok(())
    }
}

impl Decoder for Codec {
    type Item = Reply;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        trace!(message = "attempt at decoding", buffer = ?src);
        let Some(expected) = self.expecting else {
            if src.is_empty() {
                return Ok(None);
            }
            return Err(Error::Unsolicited(src.len()));
        };
        let mut cursor = &src[..];
        let Some(echo) = wire::take_u32(&mut cursor) else {
            return Ok(None);
        };
        if Command::from_word(echo) != Some(expected) {
            return Err(Error::InvalidEcho { expected, received: echo });
        }
        let reply = match expected {
            Command::ParametersWrite => {
                let Some(value) = wire::take_u32(&mut cursor) else {
                    return Ok(None);
                };
                Reply::Written { value }
            }
            command => {
                let status = if command == Command::CalculationsRead {
                    let Some(status) = wire::take_u32(&mut cursor) else {
                        return Ok(None);
                    };
                    Some(status)
                } else {
                    None
                };
                let Some(length) = wire::take_u32(&mut cursor) else {
                    return Ok(None);
                };
                if length > MAX_PLAUSIBLE_LENGTH {
                    return Err(Error::ImplausibleLength(length));
                }
                let length = length as usize;
                let values = if command == Command::VisibilitiesRead {
                    let Some(bytes) = wire::take_exact(&mut cursor, length) else {
                        let missing = length - cursor.len();
                        src.reserve(missing);
                        return Ok(None);
                    };
                    bytes.iter().map(|&b| u32::from(b)).collect()
                } else {
                    let Some(mut words) = wire::take_exact(&mut cursor, length * WORD_SIZE) else {
                        let missing = length * WORD_SIZE - cursor.len();
                        src.reserve(missing);
                        return Ok(None);
                    };
                    std::iter::from_fn(|| wire::take_u32(&mut words)).collect()
                };
                Reply::Registers { command, status, values }
            }
        };
        let consumed = src.len() - cursor.len();
        src.advance(consumed);
        self.expecting = None;
        Ok(Some(reply))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(reply) => Ok(Some(reply)),
            None if src.is_empty() => Ok(None),
            None => Err(Error::Truncated { buffered: src.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(words: &[i32]) -> BytesMut {
        let mut buffer = BytesMut::new();
        wire::put_words(&mut buffer, words);
        buffer
    }

    fn expecting(request: Request) -> Codec {
        let mut codec = Codec::new();
        codec.encode(request, &mut BytesMut::new()).unwrap();
        codec
    }

    #[test]
    fn encodes_requests() {
        let mut codec = Codec::new();
        let mut dst = BytesMut::new();
        codec.encode(Request::Read(Bank::Calculations), &mut dst).unwrap();
        assert_eq!(dst, words(&[3004, 0]));
        assert_eq!(codec.expecting(), Some(Command::CalculationsRead));
        dst.clear();
        codec.encode(Request::WriteParameter { index: 3, value: 4 }, &mut dst).unwrap();
        assert_eq!(dst, words(&[3002, 3, 4]));
        assert_eq!(codec.expecting(), Some(Command::ParametersWrite));
    }

    #[test]
    fn calculations_carry_a_status_word() {
        let mut codec = expecting(Request::Read(Bank::Calculations));
        let mut src = words(&[3004, 7, 3, 10, 20, 30]);
        let reply = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(
            reply,
            Reply::Registers {
                command: Command::CalculationsRead,
                status: Some(7),
                values: vec![10, 20, 30]
            }
        );
        assert!(src.is_empty());
        assert_eq!(codec.expecting(), None);
    }

    #[test]
    fn parameters_have_no_status_word() {
        let mut codec = expecting(Request::Read(Bank::Parameters));
        let mut src = words(&[3003, 2, 5, -1]);
        let Reply::Registers { status, values, .. } = codec.decode(&mut src).unwrap().unwrap() else {
            panic!("expected registers");
        };
        assert_eq!(status, None);
        assert_eq!(values, [5, u32::MAX]);
    }

    #[test]
    fn visibilities_are_bytes() {
        let mut codec = expecting(Request::Read(Bank::Visibilities));
        let mut src = words(&[3005, 4]);
        src.extend_from_slice(&[1, 0, 1, 1]);
        let Reply::Registers { values, .. } = codec.decode(&mut src).unwrap().unwrap() else {
            panic!("expected registers");
        };
        assert_eq!(values, [1, 0, 1, 1]);
    }

    #[test]
    fn waits_for_the_whole_reply() {
        let mut codec = expecting(Request::Read(Bank::Calculations));
        let complete = words(&[3004, 0, 2, 0x1234, 0x5678]);
        let mut src = BytesMut::new();
        for &byte in &complete[..complete.len() - 1] {
            src.extend_from_slice(&[byte]);
            assert_eq!(codec.decode(&mut src).unwrap(), None);
        }
        src.extend_from_slice(&complete[complete.len() - 1..]);
        let reply = codec.decode(&mut src).unwrap().unwrap();
        assert!(matches!(reply, Reply::Registers { values, .. } if values == [0x1234, 0x5678]));
    }

    #[test]
    fn write_acknowledgement() {
        let mut codec = expecting(Request::WriteParameter { index: 3, value: 4 });
        let mut src = words(&[3002, 4]);
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Reply::Written { value: 4 }));
    }

    #[test]
    fn rejects_a_wrong_echo() {
        let mut codec = expecting(Request::Read(Bank::Parameters));
        let mut src = words(&[3004, 0, 0]);
        let error = codec.decode(&mut src).unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidEcho { expected: Command::ParametersRead, received: 3004 }
        ));
    }

    #[test]
    fn rejects_implausible_lengths() {
        let mut codec = expecting(Request::Read(Bank::Parameters));
        let mut src = words(&[3003, 65_536]);
        assert!(matches!(codec.decode(&mut src), Err(Error::ImplausibleLength(65_536))));
    }

    #[test]
    fn truncated_at_eof() {
        let mut codec = expecting(Request::Read(Bank::Parameters));
        let mut src = words(&[3003, 2, 1]);
        assert!(matches!(codec.decode_eof(&mut src), Err(Error::Truncated { buffered: 12 })));
        let mut codec = expecting(Request::Read(Bank::Parameters));
        assert!(matches!(codec.decode_eof(&mut BytesMut::new()), Ok(None)));
    }

    #[test]
    fn unsolicited_bytes() {
        let mut codec = Codec::new();
        assert!(matches!(codec.decode(&mut BytesMut::new()), Ok(None)));
        assert!(matches!(codec.decode(&mut words(&[3003])), Err(Error::Unsolicited(4))));
    }

    #[test]
    fn command_words() {
        assert_eq!(Command::from_word(3005), Some(Command::VisibilitiesRead));
        assert_eq!(Command::from_word(3006), None);
        assert_eq!(Bank::Visibilities.read_command().word(), 3005);
        assert_eq!(Command::ParametersWrite.to_string(), "ParametersWrite");
    }
}

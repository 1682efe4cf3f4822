use std::borrow::Cow;
use std::net::Ipv4Addr;
use std::time::Duration;

use crate::codes::{self, Codes};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Semantic tag of a register, used for display.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Class {
    Energy,
    Temperature,
    Voltage,
    Flow,
    Pressure,
    Frequency,
    Power,
    Percent,
    Speed,
    Count,
    Duration,
    Time,
    Version,
    Selection,
    Boolean,
    Icon,
    String,
    Value,
    None,
}

/// The external type a register decodes into when no family specific rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Integer,
    Real,
    Boolean,
    String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Mode(u8);

impl serde::Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.0 & Self::R.0 == 0 { "-" } else { "R" })?;
        f.write_str(if self.0 & Self::W.0 == 0 { "-" } else { "W" })?;
        Ok(())
    }
}

impl Mode {
    pub const R: Self = Self(1 << 0);
    pub const W: Self = Self(1 << 1);
    pub const RW: Self = Self(Self::R.0 | Self::W.0);
    pub const R_: Self = Self::R;

    pub const fn is_writeable(self) -> bool {
        self.0 & Self::W.0 != 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(u32),
    Real(f64),
    Boolean(bool),
    Text(String),
    Duration(Duration),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(f64::from(*n)),
            Value::Real(n) => Some(*n),
            Value::Boolean(b) => Some(f64::from(u8::from(*b))),
            Value::Text(t) => t.trim().parse().ok(),
            Value::Duration(d) => Some(d.as_secs_f64()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Text(t) => {
                let t = t.trim();
                ["true", "t", "on", "yes"].iter().any(|v| t.eq_ignore_ascii_case(v))
                    || t.parse::<f64>().is_ok_and(|n| n != 0.0)
            }
            other => other.as_f64().is_some_and(|n| n != 0.0),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(t) => f.write_str(t),
            Value::Duration(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(n) => serializer.serialize_u32(*n),
            Value::Real(n) => serializer.serialize_f64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Text(t) => serializer.serialize_str(t),
            Value::Duration(d) => serializer.serialize_u64(d.as_secs()),
        }
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

/// Why a value could not be turned into a raw register value.
#[derive(thiserror::Error, Debug)]
pub enum Refusal {
    #[error("writing to the heat pump is not allowed or not possible")]
    WritingNotAllowed,
    #[error("`{0}` is not one of the known codes")]
    NotACode(String),
    #[error("`{0}` is not a valid value")]
    InvalidValue(String),
    #[error("`{0}` is not a timestamp formatted as `YYYY-MM-DD HH:MM:SS`")]
    InvalidTimestamp(String, #[source] jiff::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("could not encode a value for register `{register}`")]
pub struct EncodeError {
    pub register: String,
    #[source]
    pub reason: Refusal,
}

impl EncodeError {
    pub fn is_writing_not_allowed(&self) -> bool {
        matches!(self.reason, Refusal::WritingNotAllowed | Refusal::NotACode(_))
    }
}

/// A family of registers sharing the rules for turning raw words into values and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kind {
    Energy,
    Celsius,
    Kelvin,
    Voltage,
    Flow,
    Pressure,
    Frequency,
    Power,
    Speed,
    Percent,
    Count,
    Level,
    Icon,
    Errorcode,
    Unknown,
    Seconds,
    Hours,
    Hours2,
    Minutes,
    Timestamp,
    Version,
    Boolean,
    Ipv4Address,
    Character,
    Codes(&'static Codes),
}

impl Kind {
    // Convenience aliases for the tabulated catalogues.
    pub const HEATING_MODE: Self = Self::Codes(&codes::HEATING_MODE);
    pub const HOT_WATER_MODE: Self = Self::Codes(&codes::HOT_WATER_MODE);
    pub const POOL_MODE: Self = Self::Codes(&codes::POOL_MODE);
    pub const COOLING_MODE: Self = Self::Codes(&codes::COOLING_MODE);
    pub const SOLAR_MODE: Self = Self::Codes(&codes::SOLAR_MODE);
    pub const VENTILATION_MODE: Self = Self::Codes(&codes::VENTILATION_MODE);
    pub const MIXED_CIRCUIT_MODE: Self = Self::Codes(&codes::MIXED_CIRCUIT_MODE);
    pub const ACCESS_LEVEL: Self = Self::Codes(&codes::ACCESS_LEVEL);
    pub const BIVALENCE_LEVEL: Self = Self::Codes(&codes::BIVALENCE_LEVEL);
    pub const OPERATION_MODE: Self = Self::Codes(&codes::OPERATION_MODE);
    pub const SECONDARY_OPERATION_MODE: Self = Self::Codes(&codes::SECONDARY_OPERATION_MODE);
    pub const HEAT_PUMP_CODE: Self = Self::Codes(&codes::HEAT_PUMP_CODE);
    pub const SWITCH_OFF_FILE: Self = Self::Codes(&codes::SWITCH_OFF_FILE);
    pub const MAIN_MENU_STATUS_LINE_1: Self = Self::Codes(&codes::MAIN_MENU_STATUS_LINE_1);
    pub const MAIN_MENU_STATUS_LINE_2: Self = Self::Codes(&codes::MAIN_MENU_STATUS_LINE_2);
    pub const MAIN_MENU_STATUS_LINE_3: Self = Self::Codes(&codes::MAIN_MENU_STATUS_LINE_3);

    pub fn name(self) -> &'static str {
        match self {
            Kind::Energy => "energy",
            Kind::Celsius => "celsius",
            Kind::Kelvin => "kelvin",
            Kind::Voltage => "voltage",
            Kind::Flow => "flow",
            Kind::Pressure => "pressure",
            Kind::Frequency => "frequency",
            Kind::Power => "power",
            Kind::Speed => "speed",
            Kind::Percent => "percent",
            Kind::Count => "count",
            Kind::Level => "level",
            Kind::Icon => "icon",
            Kind::Errorcode => "errorcode",
            Kind::Unknown => "unknown",
            Kind::Seconds => "seconds",
            Kind::Hours => "hours",
            Kind::Hours2 => "hours2",
            Kind::Minutes => "minutes",
            Kind::Timestamp => "timestamp",
            Kind::Version => "version",
            Kind::Boolean => "boolean",
            Kind::Ipv4Address => "ipv4_address",
            Kind::Character => "character",
            Kind::Codes(codes) => codes.name(),
        }
    }

    pub fn class(self) -> Class {
        match self {
            Kind::Energy => Class::Energy,
            Kind::Celsius | Kind::Kelvin => Class::Temperature,
            Kind::Voltage => Class::Voltage,
            Kind::Flow => Class::Flow,
            Kind::Pressure => Class::Pressure,
            Kind::Frequency => Class::Frequency,
            Kind::Power => Class::Power,
            Kind::Speed => Class::Speed,
            Kind::Percent => Class::Percent,
            Kind::Count | Kind::Level => Class::Count,
            Kind::Icon => Class::Icon,
            Kind::Errorcode => Class::Value,
            Kind::Unknown => Class::None,
            Kind::Seconds | Kind::Hours | Kind::Hours2 | Kind::Minutes => Class::Duration,
            Kind::Timestamp => Class::Time,
            Kind::Version => Class::Version,
            Kind::Boolean => Class::Boolean,
            Kind::Ipv4Address | Kind::Character => Class::String,
            Kind::Codes(_) => Class::Selection,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Kind::Energy => "kWh",
            Kind::Celsius => "°C",
            Kind::Kelvin => "K",
            Kind::Voltage => "V",
            Kind::Flow => "l/h",
            Kind::Pressure => "bar",
            Kind::Frequency => "Hz",
            Kind::Power => "W",
            Kind::Speed => "rpm",
            Kind::Percent => "%",
            Kind::Seconds => "s",
            Kind::Hours | Kind::Hours2 => "h",
            Kind::Minutes => "min",
            _ => "",
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Kind::Energy
            | Kind::Celsius
            | Kind::Kelvin
            | Kind::Voltage
            | Kind::Flow
            | Kind::Pressure
            | Kind::Frequency
            | Kind::Hours => Shape::Real,
            Kind::Boolean => Shape::Boolean,
            Kind::Timestamp
            | Kind::Version
            | Kind::Ipv4Address
            | Kind::Character
            | Kind::Codes(_) => Shape::String,
            _ => Shape::Integer,
        }
    }

    /// Linear scaling between the raw word and the value. `None` is the identity.
    pub fn factor(self) -> Option<f64> {
        match self {
            Kind::Energy | Kind::Celsius | Kind::Kelvin | Kind::Voltage | Kind::Hours => Some(0.1),
            Kind::Pressure => Some(0.01),
            _ => None,
        }
    }

    /// Whether the raw word is a two's complement `i32`.
    pub fn is_signed(self) -> bool {
        matches!(self, Kind::Celsius | Kind::Kelvin)
    }

    pub fn codes(self) -> Option<&'static Codes> {
        match self {
            Kind::Codes(codes) => Some(codes),
            _ => None,
        }
    }

    pub fn decode(self, raw: u32) -> Value {
        match self {
            Kind::Codes(codes) => codes.decode(raw),
            Kind::Hours2 => Value::Integer(1 + raw / 2),
            Kind::Timestamp => decode_timestamp(raw),
            Kind::Version if raw == 0 => Value::Text("0".to_string()),
            Kind::Version => Value::Text(format!("{}.{}", raw / 100, raw % 100)),
            Kind::Boolean => Value::Boolean(raw == 1),
            Kind::Ipv4Address => Value::Text(Ipv4Addr::from(raw).to_string()),
            Kind::Character => codes::character(raw),
            Kind::Seconds => Value::Duration(Duration::from_secs(raw.into())),
            _ => self.decode_scalar(raw),
        }
    }

    fn decode_scalar(self, raw: u32) -> Value {
        let number = if self.is_signed() { f64::from(raw as i32) } else { f64::from(raw) };
        match (self.shape(), self.factor()) {
            (Shape::Real, Some(factor)) => Value::Real(round(number * factor, 3)),
            (Shape::Real, None) => Value::Real(number),
            (Shape::Integer, Some(factor)) => Value::Integer((number * factor) as u32),
            _ => Value::Integer(raw),
        }
    }

    /// Produce the raw word for `value`, disregarding whether the register is writeable.
    pub fn encode(self, value: &Value) -> Result<u32, Refusal> {
        let invalid = || Refusal::InvalidValue(value.to_string());
        match self {
            Kind::Codes(codes) => {
                let text = value.to_string();
                codes.position(&text).ok_or(Refusal::NotACode(text))
            }
            Kind::Hours2 => {
                let hours = integral(value).ok_or_else(invalid)?;
                hours.checked_sub(1).and_then(|h| h.checked_mul(2)).ok_or_else(invalid)
            }
            Kind::Timestamp => encode_timestamp(value),
            Kind::Version => Err(Refusal::WritingNotAllowed),
            Kind::Boolean => Ok(u32::from(value.is_truthy())),
            Kind::Ipv4Address => match value {
                Value::Text(text) => text.trim().parse::<Ipv4Addr>().map(u32::from).map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            Kind::Character => match value {
                Value::Text(text) => codes::character_code(text).ok_or_else(invalid),
                _ => Err(invalid()),
            },
            Kind::Seconds => match value {
                Value::Duration(d) => u32::try_from(d.as_secs()).map_err(|_| invalid()),
                Value::Text(text) if text.trim().parse::<f64>().is_err() => {
                    let d = humantime::parse_duration(text.trim()).map_err(|_| invalid())?;
                    u32::try_from(d.as_secs()).map_err(|_| invalid())
                }
                _ => self.encode_scalar(value),
            },
            _ => self.encode_scalar(value),
        }
    }

    fn encode_scalar(self, value: &Value) -> Result<u32, Refusal> {
        let invalid = || Refusal::InvalidValue(value.to_string());
        let number = value.as_f64().ok_or_else(invalid)?;
        // Scaled values round back to the nearest raw step, unscaled ones truncate.
        let scaled = match self.factor() {
            Some(factor) => (number / factor).round(),
            None => number.trunc(),
        };
        if !scaled.is_finite() {
            return Err(invalid());
        }
        if self.is_signed() {
            if scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
                return Err(invalid());
            }
            Ok(scaled as i32 as u32)
        } else {
            if scaled < 0.0 || scaled > f64::from(u32::MAX) {
                return Err(invalid());
            }
            Ok(scaled as u32)
        }
    }
}

fn round(value: f64, decimals: i32) -> f64 {
    let ratio = 10f64.powi(decimals);
    (value * ratio).round() / ratio
}

fn integral(value: &Value) -> Option<u32> {
    let number = value.as_f64()?;
    if number.fract() != 0.0 || number < 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number as u32)
}

fn decode_timestamp(raw: u32) -> Value {
    if raw < 1 {
        return Value::Text(String::new());
    }
    match jiff::Timestamp::from_second(i64::from(raw)) {
        Ok(timestamp) => Value::Text(timestamp.strftime(TIMESTAMP_FORMAT).to_string()),
        Err(e) => Value::Text(format!("invalid timestamp {raw}: {e}")),
    }
}

fn encode_timestamp(value: &Value) -> Result<u32, Refusal> {
    let text = value.to_string();
    let seconds = jiff::civil::DateTime::strptime(TIMESTAMP_FORMAT, text.trim())
        .and_then(|datetime| datetime.to_zoned(jiff::tz::TimeZone::UTC))
        .map_err(|e| Refusal::InvalidTimestamp(text.clone(), e))?
        .timestamp()
        .as_second();
    u32::try_from(seconds).map_err(|_| Refusal::InvalidValue(text))
}

/// One register slot: what it is, and what the controller last reported for it.
#[derive(Clone, Debug)]
pub struct Register {
    name: Cow<'static, str>,
    kind: Kind,
    mode: Mode,
    raw: Option<u32>,
    previous_raw: Option<u32>,
}

impl Register {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: Kind, mode: Mode) -> Self {
        Self { name: name.into(), kind, mode, raw: None, previous_raw: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn class(&self) -> Class {
        self.kind.class()
    }

    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_writeable(&self) -> bool {
        self.mode.is_writeable()
    }

    pub fn raw(&self) -> u32 {
        self.raw.unwrap_or(0)
    }

    pub fn previous_raw(&self) -> Option<u32> {
        self.previous_raw
    }

    pub fn set_raw(&mut self, raw: u32) {
        self.previous_raw = self.raw.replace(raw);
    }

    /// Whether the last two assigned raw values differ.
    pub fn has_changes(&self) -> bool {
        match (self.previous_raw, self.raw) {
            (Some(previous), Some(current)) => previous != current,
            _ => false,
        }
    }

    pub fn decode(&self) -> Value {
        self.kind.decode(self.raw())
    }

    pub fn encode(&self, value: &Value) -> Result<u32, EncodeError> {
        let result = if self.is_writeable() {
            self.kind.encode(value)
        } else {
            Err(Refusal::WritingNotAllowed)
        };
        result.map_err(|reason| EncodeError { register: self.name.to_string(), reason })
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "class:{:?} name:{:?} unit:{:?} writeable:{}",
            self.class().to_string(),
            self.name,
            self.unit(),
            self.is_writeable()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [Kind; 24] = [
        Kind::Energy,
        Kind::Celsius,
        Kind::Kelvin,
        Kind::Voltage,
        Kind::Flow,
        Kind::Pressure,
        Kind::Frequency,
        Kind::Power,
        Kind::Speed,
        Kind::Percent,
        Kind::Count,
        Kind::Level,
        Kind::Icon,
        Kind::Errorcode,
        Kind::Unknown,
        Kind::Seconds,
        Kind::Hours,
        Kind::Hours2,
        Kind::Minutes,
        Kind::Timestamp,
        Kind::Version,
        Kind::Boolean,
        Kind::Ipv4Address,
        Kind::Character,
    ];

    fn writeable(kind: Kind) -> Register {
        let mut register = Register::new("TEST", kind, Mode::RW);
        register.set_raw(0);
        register
    }

    fn decoded(kind: Kind, raw: u32) -> Value {
        let mut register = writeable(kind);
        register.set_raw(raw);
        register.decode()
    }

    #[test]
    fn celsius() {
        let register = writeable(Kind::Celsius);
        assert_eq!(register.unit(), "°C");
        assert_eq!(register.class(), Class::Temperature);
        assert_eq!(decoded(Kind::Celsius, 215), Value::Real(21.5));
        assert_eq!(register.encode(&Value::Real(21.5)).unwrap(), 215);
        assert_eq!(register.encode(&"21.5".into()).unwrap(), 215);
    }

    #[test]
    fn sub_zero_temperatures() {
        assert_eq!(decoded(Kind::Celsius, -52i32 as u32), Value::Real(-5.2));
        assert_eq!(writeable(Kind::Celsius).encode(&Value::Real(-5.2)).unwrap(), -52i32 as u32);
        assert_eq!(decoded(Kind::Kelvin, -3i32 as u32), Value::Real(-0.3));
    }

    #[test]
    fn scaled_reals_round_to_three_decimals() {
        assert_eq!(decoded(Kind::Pressure, 1234), Value::Real(12.34));
        assert_eq!(decoded(Kind::Energy, 123_456_789), Value::Real(12_345_678.9));
        assert_eq!(decoded(Kind::Flow, 1200), Value::Real(1200.0));
        assert_eq!(decoded(Kind::Hours, 15), Value::Real(1.5));
    }

    #[test]
    fn unscaled_integers() {
        assert_eq!(decoded(Kind::Power, 4200), Value::Integer(4200));
        assert_eq!(decoded(Kind::Unknown, u32::MAX), Value::Integer(u32::MAX));
        assert_eq!(writeable(Kind::Minutes).encode(&Value::Integer(45)).unwrap(), 45);
        assert_eq!(writeable(Kind::Count).encode(&Value::Real(2.6)).unwrap(), 2);
        assert_eq!(writeable(Kind::Frequency).encode(&"55.9".into()).unwrap(), 55);
        assert_eq!(writeable(Kind::Celsius).encode(&Value::Real(21.46)).unwrap(), 215);
    }

    #[test]
    fn scaled_round_trip() {
        for kind in ALL_KINDS.into_iter().filter(|k| k.factor().is_some()) {
            let register = writeable(kind);
            for raw in (0..5_000).chain((1_000_000..u32::MAX).step_by(7_919_111)) {
                let value = kind.decode(raw);
                assert_eq!(register.encode(&value).unwrap(), raw, "{} {raw}", kind.name());
            }
        }
    }

    #[test]
    fn hours2() {
        assert_eq!(decoded(Kind::Hours2, 10), Value::Integer(6));
        assert_eq!(writeable(Kind::Hours2).encode(&Value::Integer(6)).unwrap(), 10);
        assert!(writeable(Kind::Hours2).encode(&Value::Integer(0)).is_err());
        assert!(writeable(Kind::Hours2).encode(&Value::Real(1.5)).is_err());
    }

    #[test]
    fn seconds_are_durations() {
        assert_eq!(decoded(Kind::Seconds, 3_725), Value::Duration(Duration::from_secs(3_725)));
        assert_eq!(decoded(Kind::Seconds, 3_725).to_string(), "1h 2m 5s");
        let register = writeable(Kind::Seconds);
        assert_eq!(register.encode(&Duration::from_secs(90).into()).unwrap(), 90);
        assert_eq!(register.encode(&"1h 2m 5s".into()).unwrap(), 3_725);
        assert_eq!(register.encode(&"42".into()).unwrap(), 42);
    }

    #[test]
    fn timestamp() {
        let text = "2023-11-14 22:13:20";
        assert_eq!(decoded(Kind::Timestamp, 1_700_000_000), Value::Text(text.into()));
        assert_eq!(decoded(Kind::Timestamp, 0), Value::Text(String::new()));
        assert_eq!(writeable(Kind::Timestamp).encode(&text.into()).unwrap(), 1_700_000_000);
        let error = writeable(Kind::Timestamp).encode(&"yesterday".into()).unwrap_err();
        assert!(matches!(error.reason, Refusal::InvalidTimestamp(..)));
        assert!(!error.is_writing_not_allowed());
    }

    #[test]
    fn version() {
        assert_eq!(decoded(Kind::Version, 304), Value::Text("3.4".into()));
        assert_eq!(decoded(Kind::Version, 0), Value::Text("0".into()));
        assert_eq!(decoded(Kind::Version, 1210), Value::Text("12.10".into()));
        for value in [Value::from("3.4"), Value::Integer(304), Value::Boolean(true)] {
            let error = writeable(Kind::Version).encode(&value).unwrap_err();
            assert!(error.is_writing_not_allowed());
        }
    }

    #[test]
    fn ipv4_address() {
        assert_eq!(decoded(Kind::Ipv4Address, 0xC0A80079), Value::Text("192.168.0.121".into()));
        assert_eq!(decoded(Kind::Ipv4Address, 0), Value::Text("0.0.0.0".into()));
        let register = writeable(Kind::Ipv4Address);
        assert_eq!(register.encode(&"192.168.0.121".into()).unwrap(), 0xC0A80079);
        assert!(register.encode(&"192.168.0".into()).is_err());
        let read_only = Register::new("ID_WEB_AdresseIP_akt", Kind::Ipv4Address, Mode::R_);
        assert!(read_only.encode(&"10.0.0.1".into()).unwrap_err().is_writing_not_allowed());
    }

    #[test]
    fn boolean() {
        assert_eq!(decoded(Kind::Boolean, 1), Value::Boolean(true));
        assert_eq!(decoded(Kind::Boolean, 0), Value::Boolean(false));
        assert_eq!(decoded(Kind::Boolean, 2), Value::Boolean(false));
        let register = writeable(Kind::Boolean);
        assert_eq!(register.encode(&Value::Boolean(true)).unwrap(), 1);
        assert_eq!(register.encode(&"on".into()).unwrap(), 1);
        assert_eq!(register.encode(&"1".into()).unwrap(), 1);
        assert_eq!(register.encode(&"false".into()).unwrap(), 0);
        assert_eq!(register.encode(&"whatever".into()).unwrap(), 0);
    }

    #[test]
    fn character() {
        assert_eq!(decoded(Kind::Character, u32::from(b'V')), Value::Text("V".into()));
        assert_eq!(decoded(Kind::Character, 0), Value::Text(String::new()));
        assert_eq!(writeable(Kind::Character).encode(&"V".into()).unwrap(), u32::from(b'V'));
    }

    #[test]
    fn read_only_registers_refuse_everything() {
        for kind in ALL_KINDS.into_iter().chain(codes::ALL.into_iter().map(Kind::Codes)) {
            let register = Register::new("RO", kind, Mode::R_);
            for value in [Value::Integer(1), Value::from("Off"), Value::Real(0.0)] {
                let error = register.encode(&value).unwrap_err();
                assert!(error.is_writing_not_allowed(), "{}", kind.name());
                assert!(matches!(error.reason, Refusal::WritingNotAllowed));
            }
        }
    }

    #[test]
    fn code_tables() {
        for codes in codes::ALL {
            let register = writeable(Kind::Codes(codes));
            assert_eq!(register.class(), Class::Selection);
            for &(code, text) in codes.entries() {
                assert_eq!(Kind::Codes(codes).decode(code), Value::Text(text.into()));
                let encoded = register.encode(&text.into()).unwrap();
                assert_eq!(Kind::Codes(codes).decode(encoded), Value::Text(text.into()));
            }
            let error = register.encode(&"definitely-not-a-code".into()).unwrap_err();
            assert!(error.is_writing_not_allowed());
            assert!(matches!(error.reason, Refusal::NotACode(_)));
        }
        assert_eq!(writeable(Kind::HEATING_MODE).encode(&"Party".into()).unwrap(), 2);
        assert_eq!(decoded(Kind::MIXED_CIRCUIT_MODE, 1), Value::Text("unknown code: 1".into()));
        assert_eq!(decoded(Kind::HEATING_MODE, 5), Value::Text("unknown code: 5".into()));
    }

    #[test]
    fn change_detection() {
        let mut register = Register::new("ID_WEB_Temperatur_TVL", Kind::Celsius, Mode::R_);
        assert!(!register.has_changes());
        assert_eq!(register.raw(), 0);
        register.set_raw(300);
        assert!(!register.has_changes());
        register.set_raw(310);
        assert!(register.has_changes());
        assert_eq!(register.previous_raw(), Some(300));
        register.set_raw(310);
        assert!(!register.has_changes());
    }

    #[test]
    fn factor_free_kinds_are_identity() {
        for kind in ALL_KINDS.into_iter().filter(|k| k.factor().is_none()) {
            assert_ne!(kind.factor(), Some(0.0));
        }
        assert_eq!(decoded(Kind::Frequency, 0), Value::Real(0.0));
        assert_eq!(decoded(Kind::Frequency, 55), Value::Real(55.0));
    }

    #[test]
    fn display() {
        let register = Register::new("ID_Einst_WK_akt", Kind::Celsius, Mode::RW);
        assert_eq!(
            register.to_string(),
            r#"class:"temperature" name:"ID_Einst_WK_akt" unit:"°C" writeable:true"#
        );
        assert_eq!(Mode::R_.to_string(), "R-");
        assert_eq!(Mode::RW.to_string(), "RW");
    }
}

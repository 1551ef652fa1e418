use crate::DecodeError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

/// A single argument value as handed over by the log decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventValue {
    Address(String),
    Uint(#[serde(with = "crate::models::decimal")] BigUint),
    String(String),
    Bool(bool),
}

impl From<BigUint> for EventValue {
    fn from(value: BigUint) -> Self {
        EventValue::Uint(value)
    }
}

impl From<u64> for EventValue {
    fn from(value: u64) -> Self {
        EventValue::Uint(BigUint::from(value))
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::String(value.to_string())
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Bool(value)
    }
}

/// Field bag of a decoded event. A `null` entry counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventArgs(BTreeMap<String, Option<EventValue>>);

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<EventValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<EventValue>) {
        self.0.insert(name.to_string(), Some(value.into()));
    }

    pub fn remove(&mut self, name: &str) -> Option<EventValue> {
        self.0.remove(name).flatten()
    }

    /// Returns the value only when the field is present and not null.
    pub fn get(&self, name: &str) -> Option<&EventValue> {
        self.0.get(name).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A log entry already parsed into an event name and loosely typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub event: String,
    #[serde(default)]
    pub args: Option<EventArgs>,
}

impl DecodedEvent {
    pub fn new(event: &str, args: EventArgs) -> Self {
        Self {
            event: event.to_string(),
            args: Some(args),
        }
    }

    /// An event the decoder attached no arguments to.
    pub fn without_args(event: &str) -> Self {
        Self {
            event: event.to_string(),
            args: None,
        }
    }

    pub fn from_log(log: &str) -> Result<DecodedEvent, DecodeError> {
        let json_str = log.strip_prefix(EVENT_JSON_PREFIX).ok_or_else(|| {
            DecodeError::InvalidEventFormat(format!("Log does not start with {EVENT_JSON_PREFIX}"))
        })?;

        let event = serde_json::from_str(json_str)?;
        Ok(event)
    }

    pub fn is_event_log(log: &str) -> bool {
        log.starts_with(EVENT_JSON_PREFIX)
    }
}

/// Uint values travel as decimal strings; plain JSON numbers are accepted too.
pub(crate) mod decimal {
    use num_bigint::BigUint;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => BigUint::parse_bytes(s.as_bytes(), 10)
                .ok_or_else(|| D::Error::custom(format!("invalid decimal integer: {s}"))),
            Value::Number(n) => n
                .as_u64()
                .map(BigUint::from)
                .ok_or_else(|| D::Error::custom(format!("not an unsigned integer: {n}"))),
            other => Err(D::Error::custom(format!("expected an integer, got {other}"))),
        }
    }
}

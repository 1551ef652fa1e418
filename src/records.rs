//! Strongly typed bond events, narrowed from [`DecodedEvent`](crate::DecodedEvent) arguments.

use crate::{EventArgs, EventKind, EventValue, SchemaViolation};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amounts keep their full on-chain precision.
pub type Amount = BigUint;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address(value.to_string())
    }
}

impl PartialEq<&str> for Address {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Narrowing of a decoder value into a record field type. Values are copied, never converted.
///
/// Text-like fields take any textual value. `None` is returned only when the value cannot be
/// represented at all, which in practice means a non-`uint` value for an [`Amount`].
pub trait FromEventValue: Sized {
    const EXPECTED: &'static str;

    fn from_event_value(value: &EventValue) -> Option<Self>;
}

impl FromEventValue for Address {
    const EXPECTED: &'static str = "address";

    fn from_event_value(value: &EventValue) -> Option<Self> {
        match value {
            EventValue::Address(s) | EventValue::String(s) => Some(Address(s.clone())),
            _ => None,
        }
    }
}

impl FromEventValue for BigUint {
    const EXPECTED: &'static str = "uint";

    fn from_event_value(value: &EventValue) -> Option<Self> {
        match value {
            EventValue::Uint(n) => Some(n.clone()),
            _ => None,
        }
    }
}

impl FromEventValue for String {
    const EXPECTED: &'static str = "string";

    fn from_event_value(value: &EventValue) -> Option<Self> {
        match value {
            EventValue::Address(s) | EventValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Hands out the schema fields of one event in declaration order.
///
/// The names come from [`EventKind::fields`], so records only state the order they consume them in.
pub struct FieldReader<'a> {
    kind: EventKind,
    args: &'a EventArgs,
    position: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(kind: EventKind, args: &'a EventArgs) -> Self {
        Self {
            kind,
            args,
            position: 0,
        }
    }

    /// Narrows the next schema field.
    pub fn next_field<T: FromEventValue>(&mut self) -> Result<T, SchemaViolation> {
        let field = *self
            .kind
            .fields()
            .get(self.position)
            .ok_or(SchemaViolation::SchemaExhausted { kind: self.kind })?;
        self.position += 1;

        let value = self.args.get(field).ok_or_else(|| SchemaViolation::MissingFields {
            kind: self.kind,
            fields: vec![field],
        })?;

        T::from_event_value(value).ok_or(SchemaViolation::MistypedField {
            kind: self.kind,
            field,
            expected: T::EXPECTED,
        })
    }
}

/// A typed record bound to exactly one event kind.
pub trait EventRecord: Sized {
    const KIND: EventKind;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowRedemption {
    pub authorizer: Address,
    pub reason: String,
}

impl EventRecord for AllowRedemption {
    const KIND: EventKind = EventKind::AllowRedemption;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            authorizer: fields.next_field()?,
            reason: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtIssue {
    pub receiver: Address,
    #[serde(rename = "debSymbol")]
    pub debt_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub debt_amount: Amount,
}

impl EventRecord for DebtIssue {
    const KIND: EventKind = EventKind::DebtIssue;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            receiver: fields.next_field()?,
            debt_symbol: fields.next_field()?,
            debt_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expire {
    pub sender: Address,
    pub treasury: Address,
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
}

impl EventRecord for Expire {
    const KIND: EventKind = EventKind::Expire;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            sender: fields.next_field()?,
            treasury: fields.next_field()?,
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCollateral {
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
}

impl EventRecord for FullCollateral {
    const KIND: EventKind = EventKind::FullCollateral;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCollateral {
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
    pub debt_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub debt_remaining: Amount,
}

impl EventRecord for PartialCollateral {
    const KIND: EventKind = EventKind::PartialCollateral;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
            debt_symbol: fields.next_field()?,
            debt_remaining: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub redeemer: Address,
    pub debt_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub debt_amount: Amount,
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
}

impl EventRecord for Redemption {
    const KIND: EventKind = EventKind::Redemption;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            redeemer: fields.next_field()?,
            debt_symbol: fields.next_field()?,
            debt_amount: fields.next_field()?,
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slash {
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
}

impl EventRecord for Slash {
    const KIND: EventKind = EventKind::Slash;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawCollateral {
    pub treasury: Address,
    pub collateral_symbol: String,
    #[serde(with = "crate::models::decimal")]
    pub collateral_amount: Amount,
}

impl EventRecord for WithdrawCollateral {
    const KIND: EventKind = EventKind::WithdrawCollateral;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            treasury: fields.next_field()?,
            collateral_symbol: fields.next_field()?,
            collateral_amount: fields.next_field()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    #[serde(with = "crate::models::decimal")]
    pub value: Amount,
}

impl EventRecord for Transfer {
    const KIND: EventKind = EventKind::Transfer;

    fn from_fields(fields: &mut FieldReader<'_>) -> Result<Self, SchemaViolation> {
        Ok(Self {
            from: fields.next_field()?,
            to: fields.next_field()?,
            value: fields.next_field()?,
        })
    }
}

/// Any bond event, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "args")]
pub enum TypedEvent {
    AllowRedemption(AllowRedemption),
    DebtIssue(DebtIssue),
    Expire(Expire),
    FullCollateral(FullCollateral),
    PartialCollateral(PartialCollateral),
    Redemption(Redemption),
    Slash(Slash),
    WithdrawCollateral(WithdrawCollateral),
    Transfer(Transfer),
}

impl TypedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TypedEvent::AllowRedemption(_) => EventKind::AllowRedemption,
            TypedEvent::DebtIssue(_) => EventKind::DebtIssue,
            TypedEvent::Expire(_) => EventKind::Expire,
            TypedEvent::FullCollateral(_) => EventKind::FullCollateral,
            TypedEvent::PartialCollateral(_) => EventKind::PartialCollateral,
            TypedEvent::Redemption(_) => EventKind::Redemption,
            TypedEvent::Slash(_) => EventKind::Slash,
            TypedEvent::WithdrawCollateral(_) => EventKind::WithdrawCollateral,
            TypedEvent::Transfer(_) => EventKind::Transfer,
        }
    }
}

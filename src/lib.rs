mod error;
mod models;
mod records;
mod schema;
mod transaction;
mod validator;

pub use error::{DecodeError, SchemaViolation};
pub use models::{DecodedEvent, EventArgs, EventValue};
pub use records::{
    Address, AllowRedemption, Amount, DebtIssue, EventRecord, Expire, FieldReader,
    FromEventValue, FullCollateral, PartialCollateral, Redemption, Slash, Transfer, TypedEvent,
    WithdrawCollateral,
};
pub use schema::EventKind;
pub use transaction::{EventSource, TransactionEvents};
pub use validator::{
    convert, expect_event, EventValidator, EventValidatorBuilder, KindCheck, MissingFieldReport,
};

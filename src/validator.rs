use crate::records::FieldReader;
use crate::{
    AllowRedemption, DebtIssue, DecodedEvent, EventArgs, EventKind, EventRecord, Expire,
    FullCollateral, PartialCollateral, Redemption, SchemaViolation, Slash, Transfer, TypedEvent,
    WithdrawCollateral,
};
use tracing::{debug, warn};

/// Whether the event's own label must match the kind being converted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindCheck {
    /// Only the field set is checked; a differently labelled event with matching fields passes.
    #[default]
    Loose,
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFieldReport {
    /// Every missing field is listed in one violation.
    #[default]
    All,
    /// Stop at the first missing field in schema order.
    FirstOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventValidator {
    kind_check: KindCheck,
    missing_fields: MissingFieldReport,
}

pub struct EventValidatorBuilder {
    kind_check: KindCheck,
    missing_fields: MissingFieldReport,
}

impl EventValidatorBuilder {
    pub fn new() -> Self {
        Self {
            kind_check: KindCheck::default(),
            missing_fields: MissingFieldReport::default(),
        }
    }

    pub fn kind_check(mut self, kind_check: KindCheck) -> Self {
        self.kind_check = kind_check;
        self
    }

    pub fn missing_fields(mut self, report: MissingFieldReport) -> Self {
        self.missing_fields = report;
        self
    }

    pub fn build(self) -> EventValidator {
        EventValidator {
            kind_check: self.kind_check,
            missing_fields: self.missing_fields,
        }
    }
}

impl Default for EventValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventValidator {
    pub fn builder() -> EventValidatorBuilder {
        EventValidatorBuilder::new()
    }

    pub fn kind_check(&self) -> KindCheck {
        self.kind_check
    }

    pub fn missing_fields(&self) -> MissingFieldReport {
        self.missing_fields
    }

    /// Checks that `event` carries every field of `kind`'s schema and returns its arguments.
    pub fn validate<'a>(
        &self,
        kind: EventKind,
        event: &'a DecodedEvent,
    ) -> Result<&'a EventArgs, SchemaViolation> {
        let result = self.check(kind, event);
        if let Err(violation) = &result {
            warn!(kind = %kind, label = %event.event, "{}", violation);
        }
        result
    }

    fn check<'a>(
        &self,
        kind: EventKind,
        event: &'a DecodedEvent,
    ) -> Result<&'a EventArgs, SchemaViolation> {
        if self.kind_check == KindCheck::Strict && event.event != kind.name() {
            return Err(SchemaViolation::KindMismatch {
                expected: kind,
                actual: event.event.clone(),
            });
        }

        let args = event
            .args
            .as_ref()
            .ok_or(SchemaViolation::MissingArgs { kind })?;

        let mut missing = Vec::new();
        for field in kind.fields() {
            if args.get(field).is_none() {
                missing.push(*field);
                if self.missing_fields == MissingFieldReport::FirstOnly {
                    break;
                }
            }
        }

        if missing.is_empty() {
            Ok(args)
        } else {
            Err(SchemaViolation::MissingFields {
                kind,
                fields: missing,
            })
        }
    }

    pub fn convert<R: EventRecord>(&self, event: &DecodedEvent) -> Result<R, SchemaViolation> {
        let args = self.validate(R::KIND, event)?;
        debug!(kind = %R::KIND, fields = args.len(), "converting event");

        R::from_fields(&mut FieldReader::new(R::KIND, args)).inspect_err(|violation| {
            warn!(kind = %R::KIND, "{}", violation);
        })
    }

    /// Converts using the kind named by the event's own label.
    pub fn convert_any(&self, event: &DecodedEvent) -> Result<TypedEvent, SchemaViolation> {
        let kind: EventKind = event.event.parse()?;

        let typed = match kind {
            EventKind::AllowRedemption => {
                TypedEvent::AllowRedemption(self.convert::<AllowRedemption>(event)?)
            }
            EventKind::DebtIssue => TypedEvent::DebtIssue(self.convert::<DebtIssue>(event)?),
            EventKind::Expire => TypedEvent::Expire(self.convert::<Expire>(event)?),
            EventKind::FullCollateral => {
                TypedEvent::FullCollateral(self.convert::<FullCollateral>(event)?)
            }
            EventKind::PartialCollateral => {
                TypedEvent::PartialCollateral(self.convert::<PartialCollateral>(event)?)
            }
            EventKind::Redemption => TypedEvent::Redemption(self.convert::<Redemption>(event)?),
            EventKind::Slash => TypedEvent::Slash(self.convert::<Slash>(event)?),
            EventKind::WithdrawCollateral => {
                TypedEvent::WithdrawCollateral(self.convert::<WithdrawCollateral>(event)?)
            }
            EventKind::Transfer => TypedEvent::Transfer(self.convert::<Transfer>(event)?),
        };
        Ok(typed)
    }

    /// Like [`convert`](Self::convert), but fails the calling test on a violation.
    #[track_caller]
    pub fn expect<R: EventRecord>(&self, event: &DecodedEvent) -> R {
        match self.convert(event) {
            Ok(record) => record,
            Err(violation) => panic!("{violation}"),
        }
    }
}

/// Converts with the default loose validator.
pub fn convert<R: EventRecord>(event: &DecodedEvent) -> Result<R, SchemaViolation> {
    EventValidator::default().convert(event)
}

/// Shape check and conversion of one event; a violation fails the calling test.
#[track_caller]
pub fn expect_event<R: EventRecord>(event: &DecodedEvent) -> R {
    EventValidator::default().expect(event)
}

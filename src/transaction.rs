use crate::{DecodeError, DecodedEvent, EventKind, EventRecord, EventValidator, SchemaViolation};
use tracing::debug;

/// Supplies the log lines a transaction emitted.
pub trait EventSource {
    fn logs(&self, tx_hash: &str) -> Result<Vec<String>, DecodeError>;
}

/// Decoded events of a single transaction, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEvents {
    events: Vec<DecodedEvent>,
    validator: EventValidator,
}

impl TransactionEvents {
    pub fn new(events: Vec<DecodedEvent>) -> Self {
        Self {
            events,
            validator: EventValidator::default(),
        }
    }

    pub fn with_validator(mut self, validator: EventValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Parses every `EVENT_JSON:` line; plain log lines are skipped.
    pub fn from_logs<S: AsRef<str>>(logs: &[S]) -> Result<Self, DecodeError> {
        let mut events = Vec::new();
        for log in logs {
            let log = log.as_ref();
            if !DecodedEvent::is_event_log(log) {
                debug!(log, "skipping non-event log");
                continue;
            }
            events.push(DecodedEvent::from_log(log)?);
        }
        Ok(Self::new(events))
    }

    pub fn fetch(source: &impl EventSource, tx_hash: &str) -> Result<Self, DecodeError> {
        let logs = source.logs(tx_hash)?;
        debug!(tx_hash, count = logs.len(), "fetched transaction logs");
        Self::from_logs(logs.as_slice())
    }

    pub fn events(&self) -> &[DecodedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &DecodedEvent> + '_ {
        self.events.iter().filter(move |event| event.event == kind.name())
    }

    /// Converts every event labelled with `R`'s kind.
    pub fn all<R: EventRecord>(&self) -> Result<Vec<R>, SchemaViolation> {
        self.of_kind(R::KIND)
            .map(|event| self.validator.convert(event))
            .collect()
    }

    /// Fails the calling test unless exactly one event of `R`'s kind was emitted and it converts.
    #[track_caller]
    pub fn expect_single<R: EventRecord>(&self) -> R {
        let matching: Vec<&DecodedEvent> = self.of_kind(R::KIND).collect();
        match matching.as_slice() {
            [event] => self.validator.expect(event),
            _ => panic!(
                "expected exactly one {} event, found {}",
                R::KIND,
                matching.len()
            ),
        }
    }

    #[track_caller]
    pub fn expect_all<R: EventRecord>(&self) -> Vec<R> {
        match self.all() {
            Ok(records) => records,
            Err(violation) => panic!("{violation}"),
        }
    }
}

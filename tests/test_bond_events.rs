use bond_event_validator::{
    convert, expect_event, Address, Amount, DebtIssue, DecodedEvent, EventArgs, EventKind,
    EventValidator, EventValue, PartialCollateral, Redemption, SchemaViolation, TypedEvent,
};
use serde_json::Value;

fn is_address(field: &str) -> bool {
    matches!(
        field,
        "authorizer" | "receiver" | "sender" | "treasury" | "redeemer" | "from" | "to"
    )
}

fn is_amount(field: &str) -> bool {
    field.ends_with("Amount") || field == "debtRemaining" || field == "value"
}

/// A well-typed value for `field`, distinct per position so mixed-up fields show up.
fn sample_value(field: &str, position: usize) -> EventValue {
    if is_address(field) {
        EventValue::Address(format!("0x{:040x}", position + 1))
    } else if is_amount(field) {
        EventValue::from(1_000 + position as u64)
    } else {
        EventValue::String(format!("{field}-{position}"))
    }
}

fn expected_json(value: &EventValue) -> Value {
    match value {
        EventValue::Address(s) | EventValue::String(s) => Value::String(s.clone()),
        EventValue::Uint(n) => Value::String(n.to_string()),
        EventValue::Bool(b) => Value::Bool(*b),
    }
}

fn full_args(kind: EventKind) -> EventArgs {
    let mut args = EventArgs::new();
    for (position, field) in kind.fields().iter().enumerate() {
        args.insert(field, sample_value(field, position));
    }
    args
}

fn redemption_event() -> DecodedEvent {
    DecodedEvent::new(
        "Redemption",
        EventArgs::new()
            .with("redeemer", EventValue::Address("0xABC".to_string()))
            .with("debtSymbol", "DBT")
            .with("debtAmount", 1000u64)
            .with("collateralSymbol", "COL")
            .with("collateralAmount", 500u64),
    )
}

#[test]
fn test_every_kind_converts_with_values_unchanged() {
    let validator = EventValidator::default();

    for kind in EventKind::ALL {
        let args = full_args(kind);
        let event = DecodedEvent::new(kind.name(), args.clone());

        let typed = validator.convert_any(&event).unwrap();
        assert_eq!(typed.kind(), kind);

        let json = serde_json::to_value(&typed).unwrap();
        let record = json["args"].as_object().unwrap();
        assert_eq!(record.len(), kind.fields().len(), "{kind} record has extra fields");
        for field in kind.fields() {
            assert_eq!(
                record[*field],
                expected_json(args.get(field).unwrap()),
                "{kind}.{field} changed during conversion"
            );
        }
    }
}

#[test]
fn test_every_missing_field_is_a_violation() {
    let validator = EventValidator::default();

    for kind in EventKind::ALL {
        for field in kind.fields() {
            let mut args = full_args(kind);
            args.remove(field);
            let event = DecodedEvent::new(kind.name(), args);

            assert_eq!(
                validator.convert_any(&event).unwrap_err(),
                SchemaViolation::MissingFields {
                    kind,
                    fields: vec![*field],
                }
            );
        }
    }
}

#[test]
fn test_null_field_counts_as_missing() {
    let event: DecodedEvent = serde_json::from_str(
        r#"{"event":"Slash","args":{"collateralSymbol":{"string":"COL"},"collateralAmount":null}}"#,
    )
    .unwrap();

    assert!(matches!(
        convert::<bond_event_validator::Slash>(&event),
        Err(SchemaViolation::MissingFields { fields, .. }) if fields == vec!["collateralAmount"]
    ));
}

#[test]
fn test_absent_args_is_distinct_from_missing_field() {
    let validator = EventValidator::default();

    for kind in EventKind::ALL {
        let event = DecodedEvent::without_args(kind.name());
        assert_eq!(
            validator.convert_any(&event).unwrap_err(),
            SchemaViolation::MissingArgs { kind }
        );
    }
}

#[test]
fn test_empty_args_reports_every_field() {
    let event = DecodedEvent::new("PartialCollateral", EventArgs::new());

    assert_eq!(
        convert::<PartialCollateral>(&event).unwrap_err(),
        SchemaViolation::MissingFields {
            kind: EventKind::PartialCollateral,
            fields: vec!["collateralSymbol", "collateralAmount", "debtSymbol", "debtRemaining"],
        }
    );
}

#[test]
fn test_extra_fields_are_ignored() {
    let mut event = redemption_event();
    if let Some(args) = event.args.as_mut() {
        args.insert("memo", "unexpected");
    }

    let redemption: Redemption = expect_event(&event);
    assert_eq!(redemption, expect_event::<Redemption>(&redemption_event()));
}

#[test]
fn test_conversion_is_idempotent() {
    let event = redemption_event();

    let first = convert::<Redemption>(&event).unwrap();
    let second = convert::<Redemption>(&event).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_redemption_example() {
    let redemption: Redemption = expect_event(&redemption_event());

    assert_eq!(
        redemption,
        Redemption {
            redeemer: Address::from("0xABC"),
            debt_symbol: "DBT".to_string(),
            debt_amount: Amount::from(1000u32),
            collateral_symbol: "COL".to_string(),
            collateral_amount: Amount::from(500u32),
        }
    );
}

#[test]
#[should_panic(expected = "Redemption event is missing field(s): debtAmount")]
fn test_redemption_without_debt_amount_fails() {
    let mut event = redemption_event();
    if let Some(args) = event.args.as_mut() {
        args.remove("debtAmount");
    }

    expect_event::<Redemption>(&event);
}

#[test]
fn test_amounts_keep_full_precision() {
    let huge = Amount::parse_bytes(b"115792089237316195423570985008687907853269984665640564039457584007913129639935", 10).unwrap();
    let event = DecodedEvent::new(
        "Slash",
        EventArgs::new()
            .with("collateralSymbol", "COL")
            .with("collateralAmount", huge.clone()),
    );

    let slash: bond_event_validator::Slash = expect_event(&event);
    assert_eq!(slash.collateral_amount, huge);
}

#[test]
fn test_mistyped_amount_is_reported() {
    let event = DecodedEvent::new(
        "Slash",
        EventArgs::new()
            .with("collateralSymbol", "COL")
            .with("collateralAmount", "500"),
    );

    assert_eq!(
        convert::<bond_event_validator::Slash>(&event).unwrap_err(),
        SchemaViolation::MistypedField {
            kind: EventKind::Slash,
            field: "collateralAmount",
            expected: "uint",
        }
    );
}

#[test]
fn test_debt_issue_uses_contract_field_name() {
    let log = r#"EVENT_JSON:{"event":"DebtIssue","args":{"receiver":{"address":"0xGuarantor"},"debSymbol":{"string":"DBT"},"debtAmount":{"uint":"750"}}}"#;
    let event = DecodedEvent::from_log(log).unwrap();

    let debt: DebtIssue = expect_event(&event);
    assert_eq!(debt.receiver, "0xGuarantor");
    assert_eq!(debt.debt_symbol, "DBT");
    assert_eq!(debt.debt_amount, Amount::from(750u32));
}

#[test]
fn test_debt_issue_with_debt_symbol_spelling_is_missing_field() {
    let event = DecodedEvent::new(
        "DebtIssue",
        EventArgs::new()
            .with("receiver", "0xGuarantor")
            .with("debtSymbol", "DBT")
            .with("debtAmount", 750u64),
    );

    assert_eq!(
        convert::<DebtIssue>(&event).unwrap_err(),
        SchemaViolation::MissingFields {
            kind: EventKind::DebtIssue,
            fields: vec!["debSymbol"],
        }
    );
}

#[test]
fn test_symbol_decoded_as_address_still_converts() {
    let event = DecodedEvent::new(
        "Slash",
        EventArgs::new()
            .with("collateralSymbol", EventValue::Address("COL".to_string()))
            .with("collateralAmount", 500u64),
    );

    let slash: bond_event_validator::Slash = expect_event(&event);
    assert_eq!(slash.collateral_symbol, "COL");
    assert_eq!(slash.collateral_amount, Amount::from(500u32));
}

#[test]
fn test_convert_any_dispatches_on_label() {
    let typed = EventValidator::default()
        .convert_any(&redemption_event())
        .unwrap();

    assert!(matches!(typed, TypedEvent::Redemption(r) if r.debt_symbol == "DBT"));
}

//! Event kinds emitted by the single collateral bond and their required fields.

use crate::SchemaViolation;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AllowRedemption,
    DebtIssue,
    Expire,
    FullCollateral,
    PartialCollateral,
    Redemption,
    Slash,
    WithdrawCollateral,
    /// ERC-20 transfer of the bond's debt token.
    Transfer,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::AllowRedemption,
        EventKind::DebtIssue,
        EventKind::Expire,
        EventKind::FullCollateral,
        EventKind::PartialCollateral,
        EventKind::Redemption,
        EventKind::Slash,
        EventKind::WithdrawCollateral,
        EventKind::Transfer,
    ];

    /// Event name as it appears in the contract ABI.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::AllowRedemption => "AllowRedemption",
            EventKind::DebtIssue => "DebtIssue",
            EventKind::Expire => "Expire",
            EventKind::FullCollateral => "FullCollateral",
            EventKind::PartialCollateral => "PartialCollateral",
            EventKind::Redemption => "Redemption",
            EventKind::Slash => "Slash",
            EventKind::WithdrawCollateral => "WithdrawCollateral",
            EventKind::Transfer => "Transfer",
        }
    }

    /// Fields every event of this kind must carry, in declaration order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EventKind::AllowRedemption => &["authorizer", "reason"],
            EventKind::DebtIssue => &["receiver", "debSymbol", "debtAmount"],
            EventKind::Expire => &["sender", "treasury", "collateralSymbol", "collateralAmount"],
            EventKind::FullCollateral => &["collateralSymbol", "collateralAmount"],
            EventKind::PartialCollateral => &[
                "collateralSymbol",
                "collateralAmount",
                "debtSymbol",
                "debtRemaining",
            ],
            EventKind::Redemption => &[
                "redeemer",
                "debtSymbol",
                "debtAmount",
                "collateralSymbol",
                "collateralAmount",
            ],
            EventKind::Slash => &["collateralSymbol", "collateralAmount"],
            EventKind::WithdrawCollateral => &["treasury", "collateralSymbol", "collateralAmount"],
            EventKind::Transfer => &["from", "to", "value"],
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = SchemaViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SchemaViolation::UnknownKind(s.to_string()))
    }
}

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payout-processing state of a reservation, independent of its booking
/// status and mutated only by administrators.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettlementStatus {
    #[default]
    Pending,
    Processing,
    Settled,
    Rejected,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot move settlement from '{from}' to '{to}'")]
pub struct InvalidSettlementTransition {
    pub from: SettlementStatus,
    pub to: SettlementStatus,
}

impl SettlementStatus {
    pub fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(SettlementStatus::Pending),
            "PROCESSING" => Some(SettlementStatus::Processing),
            "SETTLED" => Some(SettlementStatus::Settled),
            "REJECTED" => Some(SettlementStatus::Rejected),
            _ => None,
        }
    }

    pub fn transition(
        self,
        to: SettlementStatus,
    ) -> Result<SettlementStatus, InvalidSettlementTransition> {
        let allowed = matches!(
            (self, to),
            (SettlementStatus::Pending, SettlementStatus::Processing)
                | (SettlementStatus::Processing, SettlementStatus::Settled)
                | (SettlementStatus::Pending, SettlementStatus::Rejected)
                | (SettlementStatus::Processing, SettlementStatus::Rejected)
        );

        if allowed {
            Ok(to)
        } else {
            Err(InvalidSettlementTransition { from: self, to })
        }
    }
}

impl Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settlement_status = match self {
            SettlementStatus::Pending => "PENDING",
            SettlementStatus::Processing => "PROCESSING",
            SettlementStatus::Settled => "SETTLED",
            SettlementStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", settlement_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_moves_forward_only() {
        assert!(
            SettlementStatus::Pending
                .transition(SettlementStatus::Processing)
                .is_ok()
        );
        assert!(
            SettlementStatus::Processing
                .transition(SettlementStatus::Settled)
                .is_ok()
        );
        assert!(
            SettlementStatus::Pending
                .transition(SettlementStatus::Rejected)
                .is_ok()
        );

        assert!(
            SettlementStatus::Settled
                .transition(SettlementStatus::Pending)
                .is_err()
        );
        assert!(
            SettlementStatus::Rejected
                .transition(SettlementStatus::Settled)
                .is_err()
        );
        assert!(
            SettlementStatus::Pending
                .transition(SettlementStatus::Settled)
                .is_err()
        );
    }
}

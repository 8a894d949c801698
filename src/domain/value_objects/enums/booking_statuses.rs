use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Booking lifecycle states. Every mutation goes through [`BookingStatus::transition`]
/// so the legal edges live in exactly one place.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Start,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot move booking from '{from}' to '{to}'")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

impl BookingStatus {
    pub fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "START" => Some(BookingStatus::Start),
            "COMPLETED" => Some(BookingStatus::Completed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Statuses that hold a car's time window. An in-progress trip blocks
    /// the window just like a confirmed one.
    pub fn active_set() -> [String; 3] {
        [
            BookingStatus::Pending.to_string(),
            BookingStatus::Confirmed.to_string(),
            BookingStatus::Start.to_string(),
        ]
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn transition(self, to: BookingStatus) -> Result<BookingStatus, InvalidTransition> {
        let allowed = matches!(
            (self, to),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Start)
                | (BookingStatus::Confirmed, BookingStatus::Start)
                | (BookingStatus::Start, BookingStatus::Completed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Start, BookingStatus::Cancelled)
        );

        if allowed {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let booking_status = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Start => "START",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", booking_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_edges_are_accepted() {
        let edges = [
            (BookingStatus::Pending, BookingStatus::Confirmed),
            (BookingStatus::Pending, BookingStatus::Start),
            (BookingStatus::Confirmed, BookingStatus::Start),
            (BookingStatus::Start, BookingStatus::Completed),
            (BookingStatus::Pending, BookingStatus::Cancelled),
            (BookingStatus::Confirmed, BookingStatus::Cancelled),
            (BookingStatus::Start, BookingStatus::Cancelled),
        ];

        for (from, to) in edges {
            assert_eq!(from.transition(to), Ok(to));
        }
    }

    #[test]
    fn illegal_edges_are_rejected() {
        let edges = [
            (BookingStatus::Completed, BookingStatus::Cancelled),
            (BookingStatus::Completed, BookingStatus::Start),
            (BookingStatus::Cancelled, BookingStatus::Cancelled),
            (BookingStatus::Cancelled, BookingStatus::Confirmed),
            (BookingStatus::Confirmed, BookingStatus::Completed),
            (BookingStatus::Pending, BookingStatus::Completed),
            (BookingStatus::Start, BookingStatus::Confirmed),
        ];

        for (from, to) in edges {
            assert_eq!(from.transition(to), Err(InvalidTransition { from, to }));
        }
    }

    #[test]
    fn parses_stored_status_strings() {
        assert_eq!(
            BookingStatus::try_from_str("CONFIRMED"),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(BookingStatus::try_from_str("confirmed"), None);
        assert_eq!(BookingStatus::try_from_str("UNKNOWN"), None);
    }

    #[test]
    fn active_set_includes_in_progress_trips() {
        assert!(BookingStatus::active_set().contains(&"START".to_string()));
    }
}

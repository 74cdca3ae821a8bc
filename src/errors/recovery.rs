//! Error recovery strategies for batch operations
//!
//! Scans, strategy iterations and close-all runs never abort on a single
//! fund or trade. Each per-item failure is classified into a skip decision
//! and the log level it deserves.

use tracing::Level;
use super::ArbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Leave the fund out of this cycle.
    SkipFund { log_level: Level },
    /// Leave the trade open and report it.
    SkipTrade { log_level: Level },
    /// Caller-correctable rejection; move on to the next candidate.
    Reject { log_level: Level },
}

impl RecoveryAction {
    pub fn log_level(&self) -> Level {
        match self {
            RecoveryAction::SkipFund { log_level }
            | RecoveryAction::SkipTrade { log_level }
            | RecoveryAction::Reject { log_level } => *log_level,
        }
    }
}

/// Where in a batch the error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    Scan,
    Close,
    Execute,
}

pub fn classify_error(error: &ArbError, stage: BatchStage) -> RecoveryAction {
    match (error, stage) {
        (e, BatchStage::Scan) if e.is_market_data() => RecoveryAction::SkipFund {
            log_level: Level::DEBUG,
        },
        (e, BatchStage::Close) if e.is_market_data() => RecoveryAction::SkipTrade {
            log_level: Level::WARN,
        },
        (ArbError::SpreadBelowThreshold { .. }, _) => RecoveryAction::Reject {
            log_level: Level::INFO,
        },
        (ArbError::DuplicatePosition { .. }, _)
        | (ArbError::InsufficientCapital { .. }, _)
        | (ArbError::InvalidNotional { .. }, _) => RecoveryAction::Reject {
            log_level: Level::DEBUG,
        },
        (_, BatchStage::Close) => RecoveryAction::SkipTrade {
            log_level: Level::ERROR,
        },
        (_, BatchStage::Scan) => RecoveryAction::SkipFund {
            log_level: Level::WARN,
        },
        (_, BatchStage::Execute) => RecoveryAction::Reject {
            log_level: Level::WARN,
        },
    }
}

/// Emit `message` for `error` at the level chosen by the classifier.
pub fn log_recovery(action: RecoveryAction, subject: &str, error: &ArbError, message: &str) {
    let level = action.log_level();
    if level == Level::ERROR {
        tracing::error!(subject = %subject, error = %error, "{}", message);
    } else if level == Level::WARN {
        tracing::warn!(subject = %subject, error = %error, "{}", message);
    } else if level == Level::INFO {
        tracing::info!(subject = %subject, error = %error, "{}", message);
    } else {
        tracing::debug!(subject = %subject, error = %error, "{}", message);
    }
}

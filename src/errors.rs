// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure categories surfaced to the caller. Accrual-marker races are the
/// one conflict recovered silently and never reach this enum.
#[derive(Debug, Error)]
pub enum LeaveError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Policy(String),
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod people;
pub mod requests;
pub mod adjustments;
pub mod accrual;
pub mod balance;
pub mod calendar;
pub mod reports;
pub mod exporter;

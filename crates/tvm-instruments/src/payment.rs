//! Payment records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tvm_core::{PaymentId, Real};

/// A payment registered against a ledger.
///
/// `date` and `amount` are fixed at creation; only `valid` changes, via
/// the ledger's invalidate/restore operations.  Payments never leave the
/// ledger that created them (soft delete only) and ids are never reissued
/// within a payment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Sequentially assigned identifier, unique within the ledger.
    pub id: PaymentId,
    /// The date the payment was made.
    pub date: NaiveDate,
    /// The amount paid.
    pub amount: Real,
    /// Whether the payment currently counts toward the balance.
    pub valid: bool,
}

//! Codec entities

use super::error::CodecError;
use shared_types::{SignedBlock, Transactions, Withdrawals};

/// The variable payload lists a blinded block leaves out.
///
/// Delivered separately (by a builder or the execution engine) when a
/// blinded block has to be turned back into a full one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecutionPayloadBody {
    pub transactions: Option<Transactions>,
    /// Required from Capella onward.
    pub withdrawals: Option<Withdrawals>,
}

impl ExecutionPayloadBody {
    pub fn new(transactions: Transactions, withdrawals: Option<Withdrawals>) -> Self {
        Self {
            transactions: Some(transactions),
            withdrawals,
        }
    }

    /// Lift the lists out of a full block; `None` for blinded or pre-Bellatrix blocks.
    pub fn from_full_block(block: &SignedBlock) -> Option<Self> {
        match block {
            SignedBlock::Bellatrix(b) => Some(Self::new(
                b.message.body.execution_payload.transactions.clone(),
                None,
            )),
            SignedBlock::Capella(b) => Some(Self::new(
                b.message.body.execution_payload.transactions.clone(),
                Some(b.message.body.execution_payload.withdrawals.clone()),
            )),
            SignedBlock::Deneb(b) => Some(Self::new(
                b.message.body.execution_payload.transactions.clone(),
                Some(b.message.body.execution_payload.withdrawals.clone()),
            )),
            _ => None,
        }
    }

    pub(crate) fn take_transactions(&mut self) -> Result<Transactions, CodecError> {
        self.transactions
            .take()
            .ok_or(CodecError::IncompleteExternalBody {
                missing: "transactions",
            })
    }

    pub(crate) fn take_withdrawals(&mut self) -> Result<Withdrawals, CodecError> {
        self.withdrawals
            .take()
            .ok_or(CodecError::IncompleteExternalBody {
                missing: "withdrawals",
            })
    }
}

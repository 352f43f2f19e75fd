//! # Execution Payloads
//!
//! Full payloads and their headers for each execution fork. A header is the
//! payload with its variable-length `transactions` and `withdrawals` lists
//! replaced by their hash-tree-roots, so both hash to the same root.

use crate::primitives::preset::{
    BytesPerLogsBloom, MaxBytesPerTransaction, MaxExtraDataBytes, MaxTransactionsPerPayload,
    MaxWithdrawalsPerPayload,
};
use crate::primitives::{Address, Gwei, Root, ValidatorIndex, U256};
use ssz_derive::{Decode, Encode};
use ssz_types::{FixedVector, VariableList};
use tree_hash_derive::TreeHash;

pub type Transaction = VariableList<u8, MaxBytesPerTransaction>;
pub type Transactions = VariableList<Transaction, MaxTransactionsPerPayload>;
pub type Withdrawals = VariableList<Withdrawal, MaxWithdrawalsPerPayload>;
pub type ExtraData = VariableList<u8, MaxExtraDataBytes>;
pub type LogsBloom = FixedVector<u8, BytesPerLogsBloom>;

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct Withdrawal {
    pub index: u64,
    pub validator_index: ValidatorIndex,
    pub address: Address,
    pub amount: Gwei,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadBellatrix {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions: Transactions,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadCapella {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions: Transactions,
    pub withdrawals: Withdrawals,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadDeneb {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions: Transactions,
    pub withdrawals: Withdrawals,
    pub blob_gas_used: u64,
    pub excess_blob_gas: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadHeaderBellatrix {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions_root: Root,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadHeaderCapella {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions_root: Root,
    pub withdrawals_root: Root,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ExecutionPayloadHeaderDeneb {
    pub parent_hash: Root,
    pub fee_recipient: Address,
    pub state_root: Root,
    pub receipts_root: Root,
    pub logs_bloom: LogsBloom,
    pub prev_randao: Root,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: ExtraData,
    pub base_fee_per_gas: U256,
    pub block_hash: Root,
    pub transactions_root: Root,
    pub withdrawals_root: Root,
    pub blob_gas_used: u64,
    pub excess_blob_gas: u64,
}

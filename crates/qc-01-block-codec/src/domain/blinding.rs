//! # Structured Blinding
//!
//! Full <-> blinded conversion on decoded blocks. A header is its payload
//! with `transactions` and `withdrawals` replaced by their hash-tree-roots,
//! so the block root is the same on both sides of the conversion.

use super::entities::ExecutionPayloadBody;
use super::error::CodecError;
use shared_types::{
    BeaconBlockBodyBellatrix, BeaconBlockBodyCapella, BeaconBlockBodyDeneb,
    BlindedBeaconBlockBodyBellatrix, BlindedBeaconBlockBodyCapella, BlindedBeaconBlockBodyDeneb,
    ExecutionPayloadBellatrix, ExecutionPayloadCapella, ExecutionPayloadDeneb,
    ExecutionPayloadHeaderBellatrix, ExecutionPayloadHeaderCapella, ExecutionPayloadHeaderDeneb,
    SignedBlock, Transactions, Withdrawals,
};
use tree_hash::TreeHash;

/// Build `$target` from the payload fields shared by payloads and headers.
macro_rules! with_payload_fields {
    ($target:ident, $src:ident, { $($field:ident: $value:expr),* $(,)? }) => {
        $target {
            parent_hash: $src.parent_hash,
            fee_recipient: $src.fee_recipient,
            state_root: $src.state_root,
            receipts_root: $src.receipts_root,
            logs_bloom: $src.logs_bloom,
            prev_randao: $src.prev_randao,
            block_number: $src.block_number,
            gas_limit: $src.gas_limit,
            gas_used: $src.gas_used,
            timestamp: $src.timestamp,
            extra_data: $src.extra_data,
            base_fee_per_gas: $src.base_fee_per_gas,
            block_hash: $src.block_hash,
            $($field: $value,)*
        }
    };
}

/// Build `$target` from the consensus fields shared by full and blinded bodies.
macro_rules! with_body_fields {
    ($target:ident, $src:ident, { $($field:ident: $value:expr),* $(,)? }) => {
        $target {
            randao_reveal: $src.randao_reveal,
            eth1_data: $src.eth1_data,
            graffiti: $src.graffiti,
            proposer_slashings: $src.proposer_slashings,
            attester_slashings: $src.attester_slashings,
            attestations: $src.attestations,
            deposits: $src.deposits,
            voluntary_exits: $src.voluntary_exits,
            sync_aggregate: $src.sync_aggregate,
            $($field: $value,)*
        }
    };
}

pub fn payload_to_header_bellatrix(
    payload: ExecutionPayloadBellatrix,
) -> ExecutionPayloadHeaderBellatrix {
    let transactions_root = payload.transactions.tree_hash_root();
    with_payload_fields!(ExecutionPayloadHeaderBellatrix, payload, {
        transactions_root: transactions_root,
    })
}

pub fn payload_to_header_capella(payload: ExecutionPayloadCapella) -> ExecutionPayloadHeaderCapella {
    let transactions_root = payload.transactions.tree_hash_root();
    let withdrawals_root = payload.withdrawals.tree_hash_root();
    with_payload_fields!(ExecutionPayloadHeaderCapella, payload, {
        transactions_root: transactions_root,
        withdrawals_root: withdrawals_root,
    })
}

pub fn payload_to_header_deneb(payload: ExecutionPayloadDeneb) -> ExecutionPayloadHeaderDeneb {
    let transactions_root = payload.transactions.tree_hash_root();
    let withdrawals_root = payload.withdrawals.tree_hash_root();
    let blob_gas_used = payload.blob_gas_used;
    let excess_blob_gas = payload.excess_blob_gas;
    with_payload_fields!(ExecutionPayloadHeaderDeneb, payload, {
        transactions_root: transactions_root,
        withdrawals_root: withdrawals_root,
        blob_gas_used: blob_gas_used,
        excess_blob_gas: excess_blob_gas,
    })
}

pub fn header_to_payload_bellatrix(
    header: ExecutionPayloadHeaderBellatrix,
    transactions: Transactions,
) -> ExecutionPayloadBellatrix {
    with_payload_fields!(ExecutionPayloadBellatrix, header, {
        transactions: transactions,
    })
}

pub fn header_to_payload_capella(
    header: ExecutionPayloadHeaderCapella,
    transactions: Transactions,
    withdrawals: Withdrawals,
) -> ExecutionPayloadCapella {
    with_payload_fields!(ExecutionPayloadCapella, header, {
        transactions: transactions,
        withdrawals: withdrawals,
    })
}

pub fn header_to_payload_deneb(
    header: ExecutionPayloadHeaderDeneb,
    transactions: Transactions,
    withdrawals: Withdrawals,
) -> ExecutionPayloadDeneb {
    let blob_gas_used = header.blob_gas_used;
    let excess_blob_gas = header.excess_blob_gas;
    with_payload_fields!(ExecutionPayloadDeneb, header, {
        transactions: transactions,
        withdrawals: withdrawals,
        blob_gas_used: blob_gas_used,
        excess_blob_gas: excess_blob_gas,
    })
}

fn blind_body_bellatrix(body: BeaconBlockBodyBellatrix) -> BlindedBeaconBlockBodyBellatrix {
    let header = payload_to_header_bellatrix(body.execution_payload);
    with_body_fields!(BlindedBeaconBlockBodyBellatrix, body, {
        execution_payload_header: header,
    })
}

fn blind_body_capella(body: BeaconBlockBodyCapella) -> BlindedBeaconBlockBodyCapella {
    let header = payload_to_header_capella(body.execution_payload);
    with_body_fields!(BlindedBeaconBlockBodyCapella, body, {
        execution_payload_header: header,
        bls_to_execution_changes: body.bls_to_execution_changes,
    })
}

fn blind_body_deneb(body: BeaconBlockBodyDeneb) -> BlindedBeaconBlockBodyDeneb {
    let header = payload_to_header_deneb(body.execution_payload);
    with_body_fields!(BlindedBeaconBlockBodyDeneb, body, {
        execution_payload_header: header,
        bls_to_execution_changes: body.bls_to_execution_changes,
        blob_kzg_commitments: body.blob_kzg_commitments,
    })
}

/// Replace the execution payload with its header.
///
/// Already-blinded and pre-Bellatrix blocks are returned unchanged.
pub fn to_blinded(block: SignedBlock) -> SignedBlock {
    match block {
        SignedBlock::Bellatrix(b) => SignedBlock::BlindedBellatrix(b.map_body(blind_body_bellatrix)),
        SignedBlock::Capella(b) => SignedBlock::BlindedCapella(b.map_body(blind_body_capella)),
        SignedBlock::Deneb(b) => SignedBlock::BlindedDeneb(b.map_body(blind_body_deneb)),
        other => other,
    }
}

/// Rebuild the execution payload from its header and the delivered body.
///
/// Full and pre-Bellatrix blocks are returned unchanged, as are blinded
/// blocks whose header timestamp is zero (pre-merge payloads carry no body).
pub fn to_full(block: SignedBlock, mut body: ExecutionPayloadBody) -> Result<SignedBlock, CodecError> {
    match block {
        SignedBlock::BlindedBellatrix(b) => {
            if b.message.body.execution_payload_header.timestamp == 0 {
                return Ok(SignedBlock::BlindedBellatrix(b));
            }
            let transactions = body.take_transactions()?;
            Ok(SignedBlock::Bellatrix(b.map_body(|blinded| {
                let payload =
                    header_to_payload_bellatrix(blinded.execution_payload_header, transactions);
                with_body_fields!(BeaconBlockBodyBellatrix, blinded, {
                    execution_payload: payload,
                })
            })))
        }
        SignedBlock::BlindedCapella(b) => {
            if b.message.body.execution_payload_header.timestamp == 0 {
                return Ok(SignedBlock::BlindedCapella(b));
            }
            let transactions = body.take_transactions()?;
            let withdrawals = body.take_withdrawals()?;
            Ok(SignedBlock::Capella(b.map_body(|blinded| {
                let payload = header_to_payload_capella(
                    blinded.execution_payload_header,
                    transactions,
                    withdrawals,
                );
                with_body_fields!(BeaconBlockBodyCapella, blinded, {
                    execution_payload: payload,
                    bls_to_execution_changes: blinded.bls_to_execution_changes,
                })
            })))
        }
        SignedBlock::BlindedDeneb(b) => {
            if b.message.body.execution_payload_header.timestamp == 0 {
                return Ok(SignedBlock::BlindedDeneb(b));
            }
            let transactions = body.take_transactions()?;
            let withdrawals = body.take_withdrawals()?;
            Ok(SignedBlock::Deneb(b.map_body(|blinded| {
                let payload = header_to_payload_deneb(
                    blinded.execution_payload_header,
                    transactions,
                    withdrawals,
                );
                with_body_fields!(BeaconBlockBodyDeneb, blinded, {
                    execution_payload: payload,
                    bls_to_execution_changes: blinded.bls_to_execution_changes,
                    blob_kzg_commitments: blinded.blob_kzg_commitments,
                })
            })))
        }
        other => Ok(other),
    }
}

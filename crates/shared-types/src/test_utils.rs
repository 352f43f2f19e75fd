//! Block and sidecar fixtures shared by the subsystem test suites.
//!
//! Blocks are populated in every variable section (operations, extra data,
//! transactions, withdrawals, BLS changes, commitments) so that offset
//! arithmetic is exercised on non-trivial lengths.

use crate::{
    Address, Attestation, AttestationData, BeaconBlock, BeaconBlockBodyAltair,
    BeaconBlockBodyBellatrix, BeaconBlockBodyCapella, BeaconBlockBodyDeneb, BeaconBlockBodyPhase0,
    BlobSidecar, BlsToExecutionChange, ChainConfig, Deposit, ExecutionPayloadBellatrix,
    ExecutionPayloadCapella, ExecutionPayloadDeneb, ForkName, KzgCommitment, KzgCommitments,
    ProposerSlashing, Root, SignedBeaconBlock, SignedBlobSidecar, SignedBlock,
    SignedBlsToExecutionChange, SignedVoluntaryExit, Slot, SyncAggregate, Transactions,
    VoluntaryExit, Withdrawal, Withdrawals, U256,
};
use ssz_types::{BitList, FixedVector, VariableList};

/// Mainnet timing with Altair..Deneb at epochs 1..4.
pub fn test_config() -> ChainConfig {
    ChainConfig::mainnet().with_fork_epochs(1, 2, 3, 4)
}

/// A slot inside `fork` under [`test_config`].
pub fn slot_in_fork(fork: ForkName) -> Slot {
    let config = test_config();
    config.start_slot_at_epoch(config.fork_epoch(fork)) + 3
}

pub fn sample_transactions(count: usize) -> Transactions {
    let txs: Vec<_> = (0..count)
        .map(|i| VariableList::from(vec![i as u8 + 1; 17 + i * 5]))
        .collect();
    VariableList::from(txs)
}

pub fn sample_withdrawals(count: usize) -> Withdrawals {
    let withdrawals: Vec<_> = (0..count as u64)
        .map(|i| Withdrawal {
            index: 100 + i,
            validator_index: 7 + i,
            address: Address::repeat_byte(0x40 + i as u8),
            amount: 32_000_000_000 + i,
        })
        .collect();
    VariableList::from(withdrawals)
}

pub fn sample_commitment(index: u64) -> KzgCommitment {
    FixedVector::from(vec![0xc0 | index as u8; 48])
}

pub fn sample_commitments(count: usize) -> KzgCommitments {
    VariableList::from((0..count as u64).map(sample_commitment).collect::<Vec<_>>())
}

fn signature(byte: u8) -> FixedVector<u8, ssz_types::typenum::U96> {
    FixedVector::from(vec![byte; 96])
}

fn extra_data() -> VariableList<u8, crate::preset::MaxExtraDataBytes> {
    VariableList::from(b"quantum-chain/v0.1".to_vec())
}

/// Fills the operations lists every body carries.
macro_rules! with_operations {
    ($body:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $body {
            randao_reveal: signature(0x0a),
            graffiti: Root::repeat_byte(0x67),
            proposer_slashings: VariableList::from(vec![ProposerSlashing::default()]),
            attestations: VariableList::from(vec![Attestation {
                aggregation_bits: BitList::with_capacity(8).expect("capacity within bound"),
                data: AttestationData {
                    slot: 1,
                    beacon_block_root: Root::repeat_byte(0x3a),
                    ..Default::default()
                },
                signature: signature(0x3b),
            }]),
            deposits: VariableList::from(vec![Deposit::default()]),
            voluntary_exits: VariableList::from(vec![SignedVoluntaryExit {
                message: VoluntaryExit {
                    epoch: 2,
                    validator_index: 9,
                },
                signature: signature(0x5e),
            }]),
            $($field: $value,)*
            ..Default::default()
        }
    };
}

fn bls_changes() -> VariableList<SignedBlsToExecutionChange, crate::preset::MaxBlsToExecutionChanges> {
    VariableList::from(vec![SignedBlsToExecutionChange {
        message: BlsToExecutionChange {
            validator_index: 11,
            from_bls_pubkey: FixedVector::from(vec![0x11; 48]),
            to_execution_address: Address::repeat_byte(0x12),
        },
        signature: signature(0x13),
    }])
}

fn payload_bellatrix() -> ExecutionPayloadBellatrix {
    ExecutionPayloadBellatrix {
        parent_hash: Root::repeat_byte(0x01),
        fee_recipient: Address::repeat_byte(0x02),
        state_root: Root::repeat_byte(0x03),
        receipts_root: Root::repeat_byte(0x04),
        prev_randao: Root::repeat_byte(0x05),
        block_number: 1_234,
        gas_limit: 30_000_000,
        gas_used: 21_000,
        timestamp: 1_700_000_000,
        extra_data: extra_data(),
        base_fee_per_gas: U256::from(7_000_000_000u64),
        block_hash: Root::repeat_byte(0x06),
        transactions: sample_transactions(3),
        ..Default::default()
    }
}

fn payload_capella() -> ExecutionPayloadCapella {
    let p = payload_bellatrix();
    ExecutionPayloadCapella {
        parent_hash: p.parent_hash,
        fee_recipient: p.fee_recipient,
        state_root: p.state_root,
        receipts_root: p.receipts_root,
        logs_bloom: p.logs_bloom,
        prev_randao: p.prev_randao,
        block_number: p.block_number,
        gas_limit: p.gas_limit,
        gas_used: p.gas_used,
        timestamp: p.timestamp,
        extra_data: p.extra_data,
        base_fee_per_gas: p.base_fee_per_gas,
        block_hash: p.block_hash,
        transactions: p.transactions,
        withdrawals: sample_withdrawals(2),
    }
}

fn payload_deneb() -> ExecutionPayloadDeneb {
    let p = payload_capella();
    ExecutionPayloadDeneb {
        parent_hash: p.parent_hash,
        fee_recipient: p.fee_recipient,
        state_root: p.state_root,
        receipts_root: p.receipts_root,
        logs_bloom: p.logs_bloom,
        prev_randao: p.prev_randao,
        block_number: p.block_number,
        gas_limit: p.gas_limit,
        gas_used: p.gas_used,
        timestamp: p.timestamp,
        extra_data: p.extra_data,
        base_fee_per_gas: p.base_fee_per_gas,
        block_hash: p.block_hash,
        transactions: p.transactions,
        withdrawals: p.withdrawals,
        blob_gas_used: 131_072,
        excess_blob_gas: 42,
    }
}

fn signed<Body: crate::BlockBody>(slot: Slot, body: Body) -> SignedBeaconBlock<Body> {
    SignedBeaconBlock {
        message: BeaconBlock {
            slot,
            proposer_index: 3,
            parent_root: Root::repeat_byte(0xaa),
            state_root: Root::repeat_byte(0xbb),
            body,
        },
        signature: signature(0xee),
    }
}

/// A full block of `fork` at `slot`; Deneb blocks commit to `blob_count` blobs.
pub fn full_block(fork: ForkName, slot: Slot, blob_count: usize) -> SignedBlock {
    match fork {
        ForkName::Phase0 => SignedBlock::Phase0(signed(
            slot,
            with_operations!(BeaconBlockBodyPhase0 {}),
        )),
        ForkName::Altair => SignedBlock::Altair(signed(
            slot,
            with_operations!(BeaconBlockBodyAltair {
                sync_aggregate: SyncAggregate::empty(),
            }),
        )),
        ForkName::Bellatrix => SignedBlock::Bellatrix(signed(
            slot,
            with_operations!(BeaconBlockBodyBellatrix {
                execution_payload: payload_bellatrix(),
            }),
        )),
        ForkName::Capella => SignedBlock::Capella(signed(
            slot,
            with_operations!(BeaconBlockBodyCapella {
                execution_payload: payload_capella(),
                bls_to_execution_changes: bls_changes(),
            }),
        )),
        ForkName::Deneb => SignedBlock::Deneb(signed(
            slot,
            with_operations!(BeaconBlockBodyDeneb {
                execution_payload: payload_deneb(),
                bls_to_execution_changes: bls_changes(),
                blob_kzg_commitments: sample_commitments(blob_count),
            }),
        )),
    }
}

/// A full block of `fork` at a slot inside that fork.
pub fn block_for_fork(fork: ForkName) -> SignedBlock {
    full_block(fork, slot_in_fork(fork), 2)
}

/// A signed sidecar for blob `index` of `block`, matching its commitment.
pub fn sidecar_for(block: &SignedBlock, index: u64) -> SignedBlobSidecar {
    let commitment = block
        .blob_kzg_commitments()
        .and_then(|commitments| commitments.get(index as usize).cloned())
        .unwrap_or_else(|| sample_commitment(index));
    SignedBlobSidecar {
        message: BlobSidecar {
            block_root: block.block_root(),
            index,
            slot: block.slot(),
            block_parent_root: block.parent_root(),
            proposer_index: block.proposer_index(),
            blob: FixedVector::from(vec![index as u8; crate::BYTES_PER_BLOB]),
            kzg_commitment: commitment,
            kzg_proof: FixedVector::from(vec![0x99; 48]),
        },
        signature: signature(0x77),
    }
}

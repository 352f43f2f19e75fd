//! # Block Operations
//!
//! Consensus-layer containers carried in block bodies. They are opaque to
//! the codec and assembler; only their SSZ layout and hash-tree-root matter.

use crate::primitives::preset::{
    DepositProofLength, MaxValidatorsPerCommittee, SyncCommitteeSize,
};
use crate::primitives::{Address, BlsPublicKey, BlsSignature, Epoch, Gwei, Root, Slot, ValidatorIndex};
use ssz_derive::{Decode, Encode};
use ssz_types::{BitList, BitVector, FixedVector, VariableList};
use tree_hash_derive::TreeHash;

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct Eth1Data {
    pub deposit_root: Root,
    pub deposit_count: u64,
    pub block_hash: Root,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Root,
    pub state_root: Root,
    pub body_root: Root,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct ProposerSlashing {
    pub signed_header_1: SignedBeaconBlockHeader,
    pub signed_header_2: SignedBeaconBlockHeader,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: Root,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: u64,
    pub beacon_block_root: Root,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct IndexedAttestation {
    pub attesting_indices: VariableList<ValidatorIndex, MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode, TreeHash)]
pub struct Attestation {
    pub aggregation_bits: BitList<MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct DepositData {
    pub pubkey: BlsPublicKey,
    pub withdrawal_credentials: Root,
    pub amount: Gwei,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct Deposit {
    pub proof: FixedVector<Root, DepositProofLength>,
    pub data: DepositData,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct VoluntaryExit {
    pub epoch: Epoch,
    pub validator_index: ValidatorIndex,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct SignedVoluntaryExit {
    pub message: VoluntaryExit,
    pub signature: BlsSignature,
}

/// Altair sync committee participation.
#[derive(Debug, Clone, PartialEq, Encode, Decode, TreeHash)]
pub struct SyncAggregate {
    pub sync_committee_bits: BitVector<SyncCommitteeSize>,
    pub sync_committee_signature: BlsSignature,
}

impl SyncAggregate {
    /// An aggregate with no participants.
    pub fn empty() -> Self {
        Self {
            sync_committee_bits: BitVector::new(),
            sync_committee_signature: BlsSignature::default(),
        }
    }
}

impl Default for SyncAggregate {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BlsToExecutionChange {
    pub validator_index: ValidatorIndex,
    pub from_bls_pubkey: BlsPublicKey,
    pub to_execution_address: Address,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct SignedBlsToExecutionChange {
    pub message: BlsToExecutionChange,
    pub signature: BlsSignature,
}

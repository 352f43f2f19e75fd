//! # Block Bodies
//!
//! One body container per fork, plus blinded bodies for the execution forks.
//! Field order is the wire order; the byte-level codec relies on it.

use crate::execution::{
    ExecutionPayloadBellatrix, ExecutionPayloadCapella, ExecutionPayloadDeneb,
    ExecutionPayloadHeaderBellatrix, ExecutionPayloadHeaderCapella, ExecutionPayloadHeaderDeneb,
};
use crate::operations::{
    Attestation, AttesterSlashing, Deposit, Eth1Data, ProposerSlashing,
    SignedBlsToExecutionChange, SignedVoluntaryExit, SyncAggregate,
};
use crate::primitives::preset::{
    MaxAttestations, MaxAttesterSlashings, MaxBlobCommitmentsPerBlock, MaxBlsToExecutionChanges,
    MaxDeposits, MaxProposerSlashings, MaxVoluntaryExits,
};
use crate::primitives::{BlsSignature, KzgCommitment, Root};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;
use tree_hash_derive::TreeHash;

pub type ProposerSlashings = VariableList<ProposerSlashing, MaxProposerSlashings>;
pub type AttesterSlashings = VariableList<AttesterSlashing, MaxAttesterSlashings>;
pub type Attestations = VariableList<Attestation, MaxAttestations>;
pub type Deposits = VariableList<Deposit, MaxDeposits>;
pub type VoluntaryExits = VariableList<SignedVoluntaryExit, MaxVoluntaryExits>;
pub type BlsToExecutionChanges = VariableList<SignedBlsToExecutionChange, MaxBlsToExecutionChanges>;
pub type KzgCommitments = VariableList<KzgCommitment, MaxBlobCommitmentsPerBlock>;

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockBodyPhase0 {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockBodyAltair {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockBodyBellatrix {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: ExecutionPayloadBellatrix,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockBodyCapella {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: ExecutionPayloadCapella,
    pub bls_to_execution_changes: BlsToExecutionChanges,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BeaconBlockBodyDeneb {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: ExecutionPayloadDeneb,
    pub bls_to_execution_changes: BlsToExecutionChanges,
    pub blob_kzg_commitments: KzgCommitments,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BlindedBeaconBlockBodyBellatrix {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload_header: ExecutionPayloadHeaderBellatrix,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BlindedBeaconBlockBodyCapella {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload_header: ExecutionPayloadHeaderCapella,
    pub bls_to_execution_changes: BlsToExecutionChanges,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BlindedBeaconBlockBodyDeneb {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: ProposerSlashings,
    pub attester_slashings: AttesterSlashings,
    pub attestations: Attestations,
    pub deposits: Deposits,
    pub voluntary_exits: VoluntaryExits,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload_header: ExecutionPayloadHeaderDeneb,
    pub bls_to_execution_changes: BlsToExecutionChanges,
    pub blob_kzg_commitments: KzgCommitments,
}

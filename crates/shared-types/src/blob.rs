//! # Blob Sidecars
//!
//! A sidecar carries one blob plus the commitment and proof tying it to a
//! block. Sidecars travel separately from their block and are matched to it
//! by `block_root`.

use crate::primitives::{
    Blob, BlobIndex, BlsSignature, KzgCommitment, KzgProof, Root, Slot, ValidatorIndex,
};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct BlobSidecar {
    pub block_root: Root,
    pub index: BlobIndex,
    pub slot: Slot,
    pub block_parent_root: Root,
    pub proposer_index: ValidatorIndex,
    pub blob: Blob,
    pub kzg_commitment: KzgCommitment,
    pub kzg_proof: KzgProof,
}

#[derive(Debug, Clone, PartialEq, Default, Encode, Decode, TreeHash)]
pub struct SignedBlobSidecar {
    pub message: BlobSidecar,
    pub signature: BlsSignature,
}

//! # Beacon Blocks
//!
//! `BeaconBlock` and `SignedBeaconBlock` are generic over their body so that
//! every fork (full and blinded) shares one header layout:
//!
//! ```text
//! SignedBeaconBlock  = offset(message) | signature[96] | message
//! BeaconBlock        = slot | proposer_index | parent_root | state_root | offset(body) | body
//! ```
//!
//! [`SignedBlock`] is the closed set of all concrete block schemas.

use crate::body::{
    BeaconBlockBodyAltair, BeaconBlockBodyBellatrix, BeaconBlockBodyCapella,
    BeaconBlockBodyDeneb, BeaconBlockBodyPhase0, BlindedBeaconBlockBodyBellatrix,
    BlindedBeaconBlockBodyCapella, BlindedBeaconBlockBodyDeneb, KzgCommitments,
};
use crate::errors::TypesError;
use crate::fork::ForkName;
use crate::primitives::{BlsSignature, Root, Slot, ValidatorIndex};
use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};
use std::fmt;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// Bound satisfied by every block body container.
pub trait BlockBody:
    Encode + Decode + TreeHash + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
}

impl<T> BlockBody for T where
    T: Encode + Decode + TreeHash + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
}

#[derive(Debug, Clone, PartialEq, Encode, Decode, TreeHash)]
pub struct BeaconBlock<Body: BlockBody> {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Root,
    pub state_root: Root,
    pub body: Body,
}

impl<Body: BlockBody> BeaconBlock<Body> {
    /// Replace the body, keeping the header fields.
    pub fn map_body<Other: BlockBody>(self, f: impl FnOnce(Body) -> Other) -> BeaconBlock<Other> {
        BeaconBlock {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body: f(self.body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Encode, Decode, TreeHash)]
pub struct SignedBeaconBlock<Body: BlockBody> {
    pub message: BeaconBlock<Body>,
    pub signature: BlsSignature,
}

impl<Body: BlockBody> SignedBeaconBlock<Body> {
    pub fn map_body<Other: BlockBody>(
        self,
        f: impl FnOnce(Body) -> Other,
    ) -> SignedBeaconBlock<Other> {
        SignedBeaconBlock {
            message: self.message.map_body(f),
            signature: self.signature,
        }
    }

    /// Hash-tree-root of the unsigned message.
    pub fn block_root(&self) -> Root {
        self.message.tree_hash_root()
    }
}

pub type SignedBeaconBlockPhase0 = SignedBeaconBlock<BeaconBlockBodyPhase0>;
pub type SignedBeaconBlockAltair = SignedBeaconBlock<BeaconBlockBodyAltair>;
pub type SignedBeaconBlockBellatrix = SignedBeaconBlock<BeaconBlockBodyBellatrix>;
pub type SignedBeaconBlockCapella = SignedBeaconBlock<BeaconBlockBodyCapella>;
pub type SignedBeaconBlockDeneb = SignedBeaconBlock<BeaconBlockBodyDeneb>;
pub type SignedBlindedBeaconBlockBellatrix = SignedBeaconBlock<BlindedBeaconBlockBodyBellatrix>;
pub type SignedBlindedBeaconBlockCapella = SignedBeaconBlock<BlindedBeaconBlockBodyCapella>;
pub type SignedBlindedBeaconBlockDeneb = SignedBeaconBlock<BlindedBeaconBlockBodyDeneb>;

/// Any signed block, full or blinded, of any fork.
#[derive(Debug, Clone, PartialEq)]
pub enum SignedBlock {
    Phase0(SignedBeaconBlockPhase0),
    Altair(SignedBeaconBlockAltair),
    Bellatrix(SignedBeaconBlockBellatrix),
    Capella(SignedBeaconBlockCapella),
    Deneb(SignedBeaconBlockDeneb),
    BlindedBellatrix(SignedBlindedBeaconBlockBellatrix),
    BlindedCapella(SignedBlindedBeaconBlockCapella),
    BlindedDeneb(SignedBlindedBeaconBlockDeneb),
}

/// Apply the same expression to whichever variant is present.
#[macro_export]
macro_rules! map_signed_block {
    ($block:expr, |$inner:ident| $body:expr) => {
        match $block {
            $crate::SignedBlock::Phase0($inner) => $body,
            $crate::SignedBlock::Altair($inner) => $body,
            $crate::SignedBlock::Bellatrix($inner) => $body,
            $crate::SignedBlock::Capella($inner) => $body,
            $crate::SignedBlock::Deneb($inner) => $body,
            $crate::SignedBlock::BlindedBellatrix($inner) => $body,
            $crate::SignedBlock::BlindedCapella($inner) => $body,
            $crate::SignedBlock::BlindedDeneb($inner) => $body,
        }
    };
}

impl SignedBlock {
    pub fn fork_name(&self) -> ForkName {
        match self {
            SignedBlock::Phase0(_) => ForkName::Phase0,
            SignedBlock::Altair(_) => ForkName::Altair,
            SignedBlock::Bellatrix(_) | SignedBlock::BlindedBellatrix(_) => ForkName::Bellatrix,
            SignedBlock::Capella(_) | SignedBlock::BlindedCapella(_) => ForkName::Capella,
            SignedBlock::Deneb(_) | SignedBlock::BlindedDeneb(_) => ForkName::Deneb,
        }
    }

    pub fn is_blinded(&self) -> bool {
        matches!(
            self,
            SignedBlock::BlindedBellatrix(_)
                | SignedBlock::BlindedCapella(_)
                | SignedBlock::BlindedDeneb(_)
        )
    }

    pub fn slot(&self) -> Slot {
        map_signed_block!(self, |b| b.message.slot)
    }

    pub fn proposer_index(&self) -> ValidatorIndex {
        map_signed_block!(self, |b| b.message.proposer_index)
    }

    pub fn parent_root(&self) -> Root {
        map_signed_block!(self, |b| b.message.parent_root)
    }

    pub fn state_root(&self) -> Root {
        map_signed_block!(self, |b| b.message.state_root)
    }

    pub fn signature(&self) -> &BlsSignature {
        map_signed_block!(self, |b| &b.signature)
    }

    /// Hash-tree-root of the message. Identical for a block and its blinded form.
    pub fn block_root(&self) -> Root {
        map_signed_block!(self, |b| b.block_root())
    }

    /// Commitments to the blobs this block requires, Deneb onward.
    pub fn blob_kzg_commitments(&self) -> Option<&KzgCommitments> {
        match self {
            SignedBlock::Deneb(b) => Some(&b.message.body.blob_kzg_commitments),
            SignedBlock::BlindedDeneb(b) => Some(&b.message.body.blob_kzg_commitments),
            _ => None,
        }
    }

    pub fn as_ssz_bytes(&self) -> Vec<u8> {
        map_signed_block!(self, |b| b.as_ssz_bytes())
    }

    pub fn ssz_bytes_len(&self) -> usize {
        map_signed_block!(self, |b| b.ssz_bytes_len())
    }

    /// Decode bytes as the container selected by `fork` and `blinded`.
    pub fn from_ssz_bytes(bytes: &[u8], fork: ForkName, blinded: bool) -> Result<Self, TypesError> {
        let block = match (fork, blinded) {
            (ForkName::Phase0, false) => SignedBlock::Phase0(decode(bytes)?),
            (ForkName::Altair, false) => SignedBlock::Altair(decode(bytes)?),
            (ForkName::Bellatrix, false) => SignedBlock::Bellatrix(decode(bytes)?),
            (ForkName::Capella, false) => SignedBlock::Capella(decode(bytes)?),
            (ForkName::Deneb, false) => SignedBlock::Deneb(decode(bytes)?),
            (ForkName::Bellatrix, true) => SignedBlock::BlindedBellatrix(decode(bytes)?),
            (ForkName::Capella, true) => SignedBlock::BlindedCapella(decode(bytes)?),
            (ForkName::Deneb, true) => SignedBlock::BlindedDeneb(decode(bytes)?),
            (ForkName::Phase0 | ForkName::Altair, true) => {
                return Err(TypesError::BlindedBeforeBellatrix { fork })
            }
        };
        Ok(block)
    }
}

fn decode<T: Decode>(bytes: &[u8]) -> Result<T, TypesError> {
    T::from_ssz_bytes(bytes).map_err(TypesError::from)
}

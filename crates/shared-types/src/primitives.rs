//! # Primitive Types
//!
//! Scalar aliases, opaque fixed-size byte vectors, and the mainnet preset
//! sizes that bound every SSZ list in the schema.

use ssz_types::typenum;
use ssz_types::FixedVector;

pub use ethereum_types::{H160 as Address, H256 as Root, U256};

/// Slot number since genesis.
pub type Slot = u64;
/// Epoch number since genesis.
pub type Epoch = u64;
/// Index into the validator registry.
pub type ValidatorIndex = u64;
/// Amount in Gwei.
pub type Gwei = u64;
/// Position of a blob within its block.
pub type BlobIndex = u64;

/// A compressed BLS signature. Never verified here, only carried.
pub type BlsSignature = FixedVector<u8, typenum::U96>;
/// A compressed BLS public key.
pub type BlsPublicKey = FixedVector<u8, typenum::U48>;
/// A KZG commitment to a blob polynomial.
pub type KzgCommitment = FixedVector<u8, typenum::U48>;
/// A KZG opening proof for a blob.
pub type KzgProof = FixedVector<u8, typenum::U48>;
/// Raw blob payload.
pub type Blob = FixedVector<u8, preset::BytesPerBlob>;

/// Mainnet preset list bounds, expressed as type-level integers.
pub mod preset {
    use ssz_types::typenum;

    pub type MaxProposerSlashings = typenum::U16;
    pub type MaxAttesterSlashings = typenum::U2;
    pub type MaxAttestations = typenum::U128;
    pub type MaxDeposits = typenum::U16;
    pub type MaxVoluntaryExits = typenum::U16;
    pub type MaxValidatorsPerCommittee = typenum::U2048;
    pub type DepositProofLength = typenum::U33;
    pub type SyncCommitteeSize = typenum::U512;
    pub type BytesPerLogsBloom = typenum::U256;
    pub type MaxExtraDataBytes = typenum::U32;
    pub type MaxBytesPerTransaction = typenum::U1073741824;
    pub type MaxTransactionsPerPayload = typenum::U1048576;
    pub type MaxWithdrawalsPerPayload = typenum::U16;
    pub type MaxBlsToExecutionChanges = typenum::U16;
    pub type MaxBlobCommitmentsPerBlock = typenum::U4096;
    pub type BytesPerBlob = typenum::U131072;
}

/// Size of a root / hash in bytes.
pub const ROOT_SIZE: usize = 32;

/// Size of a compressed BLS signature in bytes.
pub const BLS_SIGNATURE_SIZE: usize = 96;

/// Number of validators in a sync committee.
pub const SYNC_COMMITTEE_SIZE: usize = 512;

/// Size of the execution logs bloom filter in bytes.
pub const BYTES_PER_LOGS_BLOOM: usize = 256;

/// Upper bound on execution payload extra data.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;

/// Size of a blob in bytes.
pub const BYTES_PER_BLOB: usize = 131_072;

/// Maximum number of blobs a Deneb block may commit to.
pub const MAX_BLOBS_PER_BLOCK: usize = 6;

/// Serialized size of a `BlobSidecar`; the container is fixed-size so any
/// bytes past this point belong to the signing envelope.
pub const BLOB_SIDECAR_FIXED_SIZE: usize = 131_256;

/// Epoch value meaning "not scheduled".
pub const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

/// Blobs older than this many epochs are no longer served or required.
pub const MIN_EPOCHS_FOR_BLOB_SIDECARS_REQUESTS: u64 = 4096;

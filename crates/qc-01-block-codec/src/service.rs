//! # Block Codec Service
//!
//! Binds the codec to a chain configuration, so callers holding raw bytes
//! never have to work out the fork themselves.

use crate::domain::{
    blind_block_bytes, deserialize_full_or_blinded, is_serialized_blinded,
    reassemble_full_block_bytes, to_blinded, to_full, CodecError, ExecutionPayloadBody,
    FullBlockBytesStream,
};
use crate::domain::layout::read_slot;
use crate::ports::inbound::BlockCodecApi;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use quantum_telemetry::{metric_inc, CODEC_CONVERSIONS};
use shared_types::{ChainConfig, ForkName, SignedBlock};
use std::sync::Arc;
use tracing::debug;

/// The Block Codec Service.
#[derive(Debug, Clone)]
pub struct BlockCodec {
    config: Arc<ChainConfig>,
}

impl BlockCodec {
    pub fn new(config: Arc<ChainConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Fork of a serialized block, from its slot.
    pub fn fork_of_bytes(&self, bytes: &[u8]) -> Result<ForkName, CodecError> {
        Ok(self.config.fork_at_slot(read_slot(bytes)?))
    }
}

impl BlockCodecApi for BlockCodec {
    fn to_blinded(&self, block: SignedBlock) -> SignedBlock {
        if !block.is_blinded() && block.fork_name().has_execution_payload() {
            debug!(slot = block.slot(), fork = %block.fork_name(), "Blinding block");
            metric_inc!(CODEC_CONVERSIONS, &["blind", "value"]);
        }
        to_blinded(block)
    }

    fn to_full(
        &self,
        block: SignedBlock,
        body: ExecutionPayloadBody,
    ) -> Result<SignedBlock, CodecError> {
        let slot = block.slot();
        let was_blinded = block.is_blinded();
        let full = to_full(block, body)?;
        if was_blinded && !full.is_blinded() {
            debug!(slot, fork = %full.fork_name(), "Unblinded block");
            metric_inc!(CODEC_CONVERSIONS, &["unblind", "value"]);
        }
        Ok(full)
    }

    fn to_blinded_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        let fork = self.fork_of_bytes(bytes)?;
        let converts = changes_representation(fork, bytes, true);
        let blinded = blind_block_bytes(fork, bytes)?;
        if converts {
            debug!(
                %fork,
                full_len = bytes.len(),
                blinded_len = blinded.len(),
                "Blinded serialized block"
            );
            metric_inc!(CODEC_CONVERSIONS, &["blind", "bytes"]);
        }
        Ok(blinded)
    }

    fn to_full_bytes(
        &self,
        blinded: Vec<u8>,
        body: BoxFuture<'static, ExecutionPayloadBody>,
    ) -> FullBlockBytesStream {
        let fork = match self.fork_of_bytes(&blinded) {
            Ok(fork) => fork,
            Err(err) => return stream::once(async move { Err(err) }).boxed(),
        };
        if changes_representation(fork, &blinded, false) {
            debug!(%fork, blinded_len = blinded.len(), "Reassembling full block bytes");
            metric_inc!(CODEC_CONVERSIONS, &["unblind", "bytes"]);
        }
        reassemble_full_block_bytes(fork, blinded, body)
    }

    fn is_blinded_bytes(&self, bytes: &[u8]) -> Result<bool, CodecError> {
        is_serialized_blinded(self.fork_of_bytes(bytes)?, bytes)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<SignedBlock, CodecError> {
        deserialize_full_or_blinded(&self.config, bytes)
    }
}

/// Whether converting `bytes` of `fork` to the requested form rewrites them.
/// Pre-Bellatrix input, input already in that form, and unreadable input
/// pass through (or fail) without a conversion.
fn changes_representation(fork: ForkName, bytes: &[u8], to_blinded: bool) -> bool {
    fork.has_execution_payload()
        && is_serialized_blinded(fork, bytes).is_ok_and(|blinded| blinded != to_blinded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use shared_types::test_utils::{block_for_fork, test_config};

    fn codec() -> BlockCodec {
        BlockCodec::new(Arc::new(test_config()))
    }

    #[test]
    fn test_fork_resolved_from_slot() {
        let codec = codec();
        for fork in ForkName::ALL {
            let bytes = block_for_fork(fork).as_ssz_bytes();
            assert_eq!(codec.fork_of_bytes(&bytes).unwrap(), fork);
        }
        assert!(matches!(
            codec.fork_of_bytes(&[0u8; 10]),
            Err(CodecError::InvalidSlot { len: 10 })
        ));
    }

    #[test]
    fn test_bytes_round_trip_through_service() {
        let codec = codec();
        let full = block_for_fork(ForkName::Deneb);
        let blinded = codec.to_blinded_bytes(&full.as_ssz_bytes()).unwrap();
        assert!(codec.is_blinded_bytes(&blinded).unwrap());

        let decoded = codec.deserialize(&blinded).unwrap();
        assert_eq!(decoded, codec.to_blinded(full));
    }

    #[tokio::test]
    async fn test_full_bytes_from_blinded_bytes() {
        let codec = codec();
        let full = block_for_fork(ForkName::Capella);
        let body = ExecutionPayloadBody::from_full_block(&full).unwrap();
        let blinded = codec.to_blinded_bytes(&full.as_ssz_bytes()).unwrap();

        let stream = codec.to_full_bytes(blinded, async move { body }.boxed());
        let rebuilt = crate::domain::collect_full_block_bytes(stream).await.unwrap();
        assert_eq!(rebuilt, full.as_ssz_bytes());
        assert!(!codec.is_blinded_bytes(&rebuilt).unwrap());
    }

    #[tokio::test]
    async fn test_full_bytes_from_garbage_fails() {
        let codec = codec();
        let stream = codec.to_full_bytes(
            vec![1, 2, 3],
            async { ExecutionPayloadBody::default() }.boxed(),
        );
        assert!(crate::domain::collect_full_block_bytes(stream).await.is_err());
    }

    #[test]
    fn test_value_round_trip_through_service() {
        let codec = codec();
        let full = block_for_fork(ForkName::Bellatrix);
        let body = ExecutionPayloadBody::from_full_block(&full).unwrap();
        let blinded = codec.to_blinded(full.clone());
        assert_eq!(codec.to_full(blinded, body).unwrap(), full);
    }

    #[test]
    fn test_only_real_conversions_are_counted() {
        let codec = codec();
        let phase0 = block_for_fork(ForkName::Phase0).as_ssz_bytes();
        assert!(!changes_representation(ForkName::Phase0, &phase0, true));
        assert!(!changes_representation(ForkName::Phase0, &phase0, false));
        assert_eq!(codec.to_blinded_bytes(&phase0).unwrap(), phase0);

        for fork in ForkName::EXECUTION {
            let full = block_for_fork(fork).as_ssz_bytes();
            let blinded = codec.to_blinded_bytes(&full).unwrap();
            assert!(changes_representation(fork, &full, true), "{fork}");
            assert!(!changes_representation(fork, &full, false), "{fork}");
            assert!(changes_representation(fork, &blinded, false), "{fork}");
            assert!(!changes_representation(fork, &blinded, true), "{fork}");
            assert_eq!(codec.to_blinded_bytes(&blinded).unwrap(), blinded, "{fork}");
        }

        assert!(!changes_representation(ForkName::Deneb, &[0u8; 16], true));
    }
}

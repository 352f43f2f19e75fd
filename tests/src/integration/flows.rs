//! # Integration Test Flows
//!
//! Blocks and blob sidecars travel the path a gossiped block takes through
//! the node:
//!
//! 1. **Codec (1)**: blinded bytes from a builder are turned back into full
//!    block bytes
//! 2. **Block Input (2)**: block and sidecars arrive on gossip in any order
//!    and are assembled per block root
//! 3. **Data Availability (3)**: the assembled input is checked, waiting for
//!    late sidecars until the slot's cutoff

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    use shared_types::test_utils::{full_block, sidecar_for, slot_in_fork, test_config};
    use shared_types::{
        Blob, ChainConfig, ForkName, KzgCommitment, KzgProof, SignedBlock, Slot,
        MAX_BLOBS_PER_BLOCK,
    };

    // Subsystem 1: Block Codec
    use qc_01_block_codec::{
        collect_full_block_bytes, BlockCodec, BlockCodecApi, ExecutionPayloadBody,
    };

    // Subsystem 2: Block Input
    use qc_02_block_input::{
        BlockInput, BlockInputData, GossipBlockInputApi, GossipBlockInputService,
        GossipedInput, GossipedInputType,
    };

    // Subsystem 3: Data Availability
    use qc_03_data_availability::{
        DataAvailabilityApi, DataAvailabilityError, DataAvailabilityVerifier,
        DataAvailableStatus, ExecutionStatus, FullyVerifiedBlock, ImportBlockOpts,
        KzgBlobSidecarValidator, KzgProofVerifier, SlotClock,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const GENESIS_TIME: u64 = 1_606_824_023;

    struct FixedClock {
        now_ms: u64,
    }

    impl SlotClock for FixedClock {
        fn genesis_time(&self) -> u64 {
            GENESIS_TIME
        }

        fn now_ms(&self) -> u64 {
            self.now_ms
        }
    }

    struct AcceptAllKzg;

    impl KzgProofVerifier for AcceptAllKzg {
        fn verify_blob_kzg_proof_batch(
            &self,
            _blobs: &[&Blob],
            _commitments: &[&KzgCommitment],
            _proofs: &[&KzgProof],
        ) -> Result<bool, String> {
            Ok(true)
        }
    }

    type Verifier = DataAvailabilityVerifier<FixedClock, KzgBlobSidecarValidator<AcceptAllKzg>>;

    fn config() -> Arc<ChainConfig> {
        Arc::new(test_config())
    }

    fn deneb_slot() -> Slot {
        slot_in_fork(ForkName::Deneb)
    }

    /// Verifier whose clock reads `offset_ms` into the Deneb test slot.
    fn verifier_at(offset_ms: u64) -> Verifier {
        let config = config();
        let now_ms = config.time_at_slot(deneb_slot(), GENESIS_TIME) * 1000 + offset_ms;
        DataAvailabilityVerifier::new(
            config,
            FixedClock { now_ms },
            KzgBlobSidecarValidator::new(AcceptAllKzg),
        )
    }

    fn gossip_block(block: &Arc<SignedBlock>) -> GossipedInput {
        GossipedInput::Block {
            block: block.clone(),
            bytes: Some(block.as_ssz_bytes()),
        }
    }

    fn gossip_blob(block: &SignedBlock, index: u64) -> GossipedInput {
        let sidecar = sidecar_for(block, index);
        let bytes = ssz::Encode::as_ssz_bytes(&sidecar);
        GossipedInput::Blob {
            sidecar,
            bytes: Some(bytes),
        }
    }

    fn deneb_block(blobs: usize, slot_offset: u64) -> Arc<SignedBlock> {
        Arc::new(full_block(
            ForkName::Deneb,
            deneb_slot() + slot_offset,
            blobs,
        ))
    }

    // =============================================================================
    // GOSSIP → DATA AVAILABILITY
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_late_blob_arrives_before_cutoff() {
        let gossip = Arc::new(GossipBlockInputService::new(config()));
        let block = deneb_block(3, 0);

        gossip.on_gossip(gossip_blob(&block, 0)).unwrap();
        gossip.on_gossip(gossip_blob(&block, 2)).unwrap();
        let result = gossip.on_gossip(gossip_block(&block)).unwrap();
        assert_eq!(result.meta.pending, Some(GossipedInputType::Blob));
        assert_eq!(result.meta.have_blobs, 2);
        assert_eq!(result.meta.expected_blobs, Some(3));
        let input = result.block_input.unwrap();

        let late = {
            let gossip = gossip.clone();
            let block = block.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(1_000)).await;
                gossip.on_gossip(gossip_blob(&block, 1)).unwrap()
            })
        };

        // Cutoff is 2500 ms away.
        let verifier = verifier_at(500);
        let statuses = verifier
            .verify_blocks_data_availability(&[input], &ImportBlockOpts::default())
            .await
            .unwrap();
        assert_eq!(statuses, vec![DataAvailableStatus::Available]);

        let completed = late.await.unwrap();
        assert_eq!(completed.meta.pending, None);
        assert_eq!(completed.meta.have_blobs, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_blob_is_unavailable_at_cutoff() {
        let gossip = GossipBlockInputService::new(config());
        let block = deneb_block(2, 0);

        gossip.on_gossip(gossip_block(&block)).unwrap();
        let result = gossip.on_gossip(gossip_blob(&block, 0)).unwrap();
        let input = result.block_input.unwrap();

        let verifier = verifier_at(500);
        let start = Instant::now();
        let result = verifier
            .verify_blocks_data_availability(&[input], &ImportBlockOpts::default())
            .await;
        assert_eq!(
            result,
            Err(DataAvailabilityError::DataUnavailable {
                slot: block.slot(),
                block_root: block.block_root(),
            })
        );
        assert!(start.elapsed() >= Duration::from_millis(2_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_eviction_ends_the_wait() {
        let gossip = Arc::new(GossipBlockInputService::new(config()));
        let stalled = deneb_block(2, 0);
        let input = gossip
            .on_gossip(gossip_block(&stalled))
            .unwrap()
            .block_input
            .unwrap();
        assert!(matches!(input.data, BlockInputData::BlobsPromise { .. }));

        let newer = {
            let gossip = gossip.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                for offset in 1..=5 {
                    gossip.on_gossip(gossip_block(&deneb_block(1, offset))).unwrap();
                }
            })
        };

        let verifier = verifier_at(0);
        let start = Instant::now();
        let result = verifier
            .verify_blocks_data_availability(&[input], &ImportBlockOpts::default())
            .await;
        assert!(matches!(
            result,
            Err(DataAvailabilityError::DataUnavailable { .. })
        ));
        assert!(start.elapsed() < Duration::from_millis(3_000));

        newer.await.unwrap();
        assert_eq!(gossip.cached_block_inputs(), 5);
        assert!(gossip.availability(&stalled.block_root()).is_none());
    }

    #[test]
    fn test_any_arrival_order_completes_once() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let gossip = GossipBlockInputService::new(config());
            let block = deneb_block(MAX_BLOBS_PER_BLOCK, 0);
            let mut messages: Vec<GossipedInput> = (0..MAX_BLOBS_PER_BLOCK as u64)
                .map(|index| gossip_blob(&block, index))
                .collect();
            messages.push(gossip_block(&block));
            messages.shuffle(&mut rng);

            let completions = messages
                .into_iter()
                .map(|message| gossip.on_gossip(message).unwrap())
                .filter(|result| result.meta.pending.is_none())
                .count();
            assert_eq!(completions, 1);

            let handle = gossip.availability(&block.block_root()).unwrap();
            assert_eq!(handle.try_get().map(|blobs| blobs.len()), Some(MAX_BLOBS_PER_BLOCK));
        }
    }

    #[tokio::test]
    async fn test_pre_deneb_gossip_block_needs_no_blobs() {
        let gossip = GossipBlockInputService::new(config());
        let block = Arc::new(full_block(
            ForkName::Capella,
            slot_in_fork(ForkName::Capella),
            0,
        ));

        let result = gossip.on_gossip(gossip_block(&block)).unwrap();
        assert_eq!(result.meta.expected_blobs, Some(0));
        let input = result.block_input.unwrap();

        let statuses = verifier_at(0)
            .verify_blocks_data_availability(&[input], &ImportBlockOpts::default())
            .await
            .unwrap();
        assert_eq!(statuses, vec![DataAvailableStatus::PreDeneb]);
        assert!(quantum_telemetry::GOSSIP_BLOCKS_RECEIVED.get() >= 1.0);
    }

    // =============================================================================
    // CODEC → GOSSIP → DATA AVAILABILITY
    // =============================================================================

    #[tokio::test]
    async fn test_unblinded_block_imports_with_blobs() {
        let codec = BlockCodec::new(config());
        let gossip = GossipBlockInputService::new(config());
        let block = deneb_block(2, 0);

        // A builder hands back the blinded block; the payload body follows.
        let full_bytes = block.as_ssz_bytes();
        let blinded_bytes = codec.to_blinded_bytes(&full_bytes).unwrap();
        assert!(codec.is_blinded_bytes(&blinded_bytes).unwrap());
        let blinded = codec.deserialize(&blinded_bytes).unwrap();
        assert!(blinded.is_blinded());
        assert_eq!(blinded.block_root(), block.block_root());

        let body = ExecutionPayloadBody::from_full_block(&block).unwrap();
        let stream = codec.to_full_bytes(blinded_bytes, async move { body }.boxed());
        let rebuilt_bytes = collect_full_block_bytes(stream).await.unwrap();
        assert_eq!(rebuilt_bytes, full_bytes);
        let rebuilt = Arc::new(codec.deserialize(&rebuilt_bytes).unwrap());
        assert_eq!(rebuilt, block);

        gossip.on_gossip(gossip_blob(&rebuilt, 1)).unwrap();
        gossip.on_gossip(gossip_block(&rebuilt)).unwrap();
        let result = gossip.on_gossip(gossip_blob(&rebuilt, 0)).unwrap();
        assert_eq!(result.meta.pending, None);
        let input: BlockInput = result.block_input.unwrap();
        assert_eq!(input.block_bytes.as_deref(), Some(&full_bytes[..]));

        let statuses = verifier_at(0)
            .verify_blocks_data_availability(
                std::slice::from_ref(&input),
                &ImportBlockOpts::default(),
            )
            .await
            .unwrap();

        let verified = FullyVerifiedBlock {
            block_input: input,
            post_state: (),
            parent_block_slot: block.slot() - 1,
            proposer_balance_delta: 0,
            execution_status: ExecutionStatus::Valid,
            data_available_status: statuses[0],
            seen_timestamp_sec: GENESIS_TIME,
        };
        assert_eq!(verified.slot(), block.slot());
        assert_eq!(verified.block_root(), block.block_root());
        assert_eq!(verified.data_available_status, DataAvailableStatus::Available);
    }

    #[test]
    fn test_value_and_byte_blinding_agree_for_every_fork() {
        let codec = BlockCodec::new(config());
        for fork in ForkName::ALL {
            let block = full_block(fork, slot_in_fork(fork), 3);
            let by_bytes = codec.to_blinded_bytes(&block.as_ssz_bytes()).unwrap();
            let by_value = codec.to_blinded(block.clone());

            assert_eq!(by_bytes, by_value.as_ssz_bytes(), "{fork}");
            assert_eq!(
                codec.deserialize(&by_bytes).unwrap().block_root(),
                block.block_root(),
                "{fork}"
            );
            assert_eq!(
                codec.is_blinded_bytes(&by_bytes).unwrap(),
                fork.has_execution_payload(),
                "{fork}"
            );
        }
    }
}

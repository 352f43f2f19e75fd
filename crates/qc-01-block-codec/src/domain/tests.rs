use super::layout::*;
use super::*;
use futures::future;
use futures::stream::StreamExt;
use shared_types::test_utils::{block_for_fork, slot_in_fork, test_config};
use shared_types::*;
use ssz::Encode;

fn blinded_for_fork(fork: ForkName) -> SignedBlock {
    to_blinded(block_for_fork(fork))
}

fn body_of(block: &SignedBlock) -> ExecutionPayloadBody {
    ExecutionPayloadBody::from_full_block(block).unwrap()
}

// =============================================================================
// Layout constants agree with the derived containers
// =============================================================================

#[test]
fn test_body_fixed_lengths_match_containers() {
    assert_eq!(<BeaconBlockBodyPhase0 as Encode>::ssz_fixed_len(), 4);
    assert_eq!(body_fixed_len(ForkName::Phase0), 220);
    assert_eq!(body_fixed_len(ForkName::Altair), 380);

    // Variable containers report an offset-sized fixed length, so compare the
    // position of the first variable section in a real encoding instead.
    for fork in ForkName::ALL {
        let bytes = block_for_fork(fork).as_ssz_bytes();
        let body_start = SIGNED_BLOCK_FIXED_LEN + BLOCK_FIXED_LEN;
        let first_variable = read_offset(&bytes, body_start + 200).unwrap();
        assert_eq!(first_variable, body_fixed_len(fork), "{fork}");
    }
}

#[test]
fn test_payload_fixed_lengths_match_containers() {
    for fork in ForkName::EXECUTION {
        let schema = PayloadSchema::for_fork(fork).unwrap();
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone());

        let full_bytes = full.as_ssz_bytes();
        let layout = BlockLayout::resolve(&full_bytes, fork).unwrap();
        assert_eq!(
            read_offset(&full_bytes, layout.payload_field(EXTRA_DATA_OFFSET_POSITION)).unwrap(),
            schema.full_fixed_len
        );

        let blinded_bytes = blinded.as_ssz_bytes();
        let layout = BlockLayout::resolve(&blinded_bytes, fork).unwrap();
        assert_eq!(
            read_offset(&blinded_bytes, layout.payload_field(EXTRA_DATA_OFFSET_POSITION)).unwrap(),
            schema.header_fixed_len
        );
    }
    assert!(PayloadSchema::for_fork(ForkName::Altair).is_none());
}

#[test]
fn test_slot_read_from_fixed_position() {
    let block = block_for_fork(ForkName::Capella);
    let bytes = block.as_ssz_bytes();
    assert_eq!(slot_from_signed_block_bytes(&bytes), Some(block.slot()));
    assert_eq!(slot_from_signed_block_bytes(&bytes[..50]), None);
}

#[test]
fn test_accessors_are_bounds_checked() {
    let bytes = [1u8, 0, 0, 0, 9];
    assert_eq!(read_offset(&bytes, 0).unwrap(), 1);
    assert!(matches!(
        read_offset(&bytes, 2),
        Err(CodecError::OutOfBounds { .. })
    ));
    assert!(matches!(
        slice(&bytes, 3, 2),
        Err(CodecError::OutOfBounds { .. })
    ));

    let range = 1..4;
    let sliced = slice_range(&bytes, &range).unwrap();
    drop(range);
    assert_eq!(sliced, &[0, 0, 0]);
    assert!(matches!(
        slice_range(&bytes, &(2..6)),
        Err(CodecError::OutOfBounds { position: 6, len: 5 })
    ));

    let mut buf = vec![0u8; 6];
    write_offset(&mut buf, 2, 0x0102).unwrap();
    assert_eq!(buf, vec![0, 0, 2, 1, 0, 0]);
    assert!(write_offset(&mut buf, 4, 1).is_err());
}

// =============================================================================
// Blinded detection
// =============================================================================

#[test]
fn test_detection_classifies_every_execution_fork() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone());
        assert!(!is_serialized_blinded(fork, &full.as_ssz_bytes()).unwrap(), "{fork}");
        assert!(is_serialized_blinded(fork, &blinded.as_ssz_bytes()).unwrap(), "{fork}");
        assert!(
            is_serialized_blinded(fork, &blind_block_bytes(fork, &full.as_ssz_bytes()).unwrap())
                .unwrap(),
            "{fork}"
        );
    }
}

#[test]
fn test_detection_pre_bellatrix_is_never_blinded() {
    for fork in [ForkName::Phase0, ForkName::Altair] {
        let bytes = block_for_fork(fork).as_ssz_bytes();
        assert_eq!(is_serialized_blinded(fork, &bytes), Ok(false));
    }
}

#[test]
fn test_detection_rejects_unknown_gap() {
    let fork = ForkName::Deneb;
    let mut bytes = block_for_fork(fork).as_ssz_bytes();
    let layout = BlockLayout::resolve(&bytes, fork).unwrap();
    write_offset(&mut bytes, layout.payload_field(EXTRA_DATA_OFFSET_POSITION), 600).unwrap();
    assert!(matches!(
        is_serialized_blinded(fork, &bytes),
        Err(CodecError::UnsupportedEncoding { .. })
    ));
}

#[test]
fn test_detection_with_wrong_fork_fails() {
    // A Capella payload read with the Deneb schema has no matching gap.
    let bytes = block_for_fork(ForkName::Capella).as_ssz_bytes();
    assert!(is_serialized_blinded(ForkName::Deneb, &bytes).is_err());
}

#[test]
fn test_truncated_buffer_is_rejected() {
    let bytes = block_for_fork(ForkName::Bellatrix).as_ssz_bytes();
    assert!(BlockLayout::resolve(&bytes[..150], ForkName::Bellatrix).is_err());
    assert!(BlockLayout::resolve(&bytes[..600], ForkName::Bellatrix).is_err());
}

#[test]
fn test_non_monotonic_offsets_rejected() {
    let fork = ForkName::Capella;
    let mut bytes = block_for_fork(fork).as_ssz_bytes();
    let layout = BlockLayout::resolve(&bytes, fork).unwrap();
    // Point the BLS changes before the payload.
    let bogus = layout.payload_start - layout.body_start - 1;
    write_offset(&mut bytes, layout.body_field(BLS_CHANGES_OFFSET_POSITION), bogus).unwrap();
    assert!(matches!(
        BlockLayout::resolve(&bytes, fork),
        Err(CodecError::UnsupportedEncoding { .. })
    ));
}

// =============================================================================
// Structured conversions
// =============================================================================

#[test]
fn test_blinding_preserves_block_root() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone());
        assert!(blinded.is_blinded());
        assert_eq!(blinded.fork_name(), fork);
        assert_eq!(blinded.block_root(), full.block_root(), "{fork}");
    }
}

#[test]
fn test_blinding_is_noop_for_pre_bellatrix_and_blinded() {
    let altair = block_for_fork(ForkName::Altair);
    assert_eq!(to_blinded(altair.clone()), altair);

    let blinded = blinded_for_fork(ForkName::Deneb);
    assert_eq!(to_blinded(blinded.clone()), blinded);
}

#[test]
fn test_unblind_round_trip() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let rebuilt = to_full(to_blinded(full.clone()), body_of(&full)).unwrap();
        assert_eq!(rebuilt, full, "{fork}");
    }
}

#[test]
fn test_blind_after_unblind_keeps_header() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone());
        let reblinded = to_blinded(to_full(blinded.clone(), body_of(&full)).unwrap());
        assert_eq!(reblinded, blinded, "{fork}");
    }
}

#[test]
fn test_unblind_requires_transactions() {
    let blinded = blinded_for_fork(ForkName::Bellatrix);
    let result = to_full(blinded, ExecutionPayloadBody::default());
    assert_eq!(
        result,
        Err(CodecError::IncompleteExternalBody {
            missing: "transactions"
        })
    );
}

#[test]
fn test_unblind_requires_withdrawals_from_capella() {
    for fork in [ForkName::Capella, ForkName::Deneb] {
        let full = block_for_fork(fork);
        let mut body = body_of(&full);
        body.withdrawals = None;
        assert_eq!(
            to_full(to_blinded(full), body),
            Err(CodecError::IncompleteExternalBody {
                missing: "withdrawals"
            })
        );
    }

    // Bellatrix has no withdrawals to ask for.
    let full = block_for_fork(ForkName::Bellatrix);
    let body = ExecutionPayloadBody::new(sample_transactions_of(&full), None);
    assert!(to_full(to_blinded(full), body).is_ok());
}

fn sample_transactions_of(block: &SignedBlock) -> Transactions {
    body_of(block).transactions.unwrap()
}

#[test]
fn test_unblind_skips_pre_merge_header() {
    let mut full = block_for_fork(ForkName::Bellatrix);
    if let SignedBlock::Bellatrix(b) = &mut full {
        b.message.body.execution_payload.timestamp = 0;
    }
    let blinded = to_blinded(full);
    let result = to_full(blinded.clone(), ExecutionPayloadBody::default()).unwrap();
    assert_eq!(result, blinded);
}

#[test]
fn test_unblind_is_noop_for_full_blocks() {
    let full = block_for_fork(ForkName::Deneb);
    assert_eq!(to_full(full.clone(), ExecutionPayloadBody::default()), Ok(full));
}

// =============================================================================
// Byte-level blinding
// =============================================================================

#[test]
fn test_byte_blinding_matches_structured_blinding() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let by_bytes = blind_block_bytes(fork, &full.as_ssz_bytes()).unwrap();
        let by_value = to_blinded(full).as_ssz_bytes();
        assert_eq!(by_bytes, by_value, "{fork}");
    }
}

#[test]
fn test_byte_blinding_with_empty_lists() {
    let fork = ForkName::Deneb;
    let mut full = full_block_without_payload_lists(fork);
    if let SignedBlock::Deneb(b) = &mut full {
        b.message.body.blob_kzg_commitments = Default::default();
    }
    let by_bytes = blind_block_bytes(fork, &full.as_ssz_bytes()).unwrap();
    assert_eq!(by_bytes, to_blinded(full).as_ssz_bytes());
}

fn full_block_without_payload_lists(fork: ForkName) -> SignedBlock {
    let mut block = block_for_fork(fork);
    if let SignedBlock::Deneb(b) = &mut block {
        b.message.body.execution_payload.transactions = Default::default();
        b.message.body.execution_payload.withdrawals = Default::default();
        b.message.body.execution_payload.extra_data = Default::default();
        b.message.body.bls_to_execution_changes = Default::default();
    }
    block
}

#[test]
fn test_byte_blinding_passes_through() {
    let altair = block_for_fork(ForkName::Altair).as_ssz_bytes();
    assert_eq!(blind_block_bytes(ForkName::Altair, &altair).unwrap(), altair);

    let blinded = blinded_for_fork(ForkName::Capella).as_ssz_bytes();
    assert_eq!(blind_block_bytes(ForkName::Capella, &blinded).unwrap(), blinded);
}

// =============================================================================
// Streaming reassembly
// =============================================================================

#[tokio::test]
async fn test_reassembly_matches_full_encoding() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone()).as_ssz_bytes();
        let stream = reassemble_full_block_bytes(fork, blinded, future::ready(body_of(&full)));
        let rebuilt = collect_full_block_bytes(stream).await.unwrap();
        assert_eq!(rebuilt, full.as_ssz_bytes(), "{fork}");
    }
}

#[tokio::test]
async fn test_reassembly_yields_two_chunks() {
    for fork in ForkName::EXECUTION {
        let full = block_for_fork(fork);
        let blinded = to_blinded(full.clone()).as_ssz_bytes();
        let chunks: Vec<_> =
            reassemble_full_block_bytes(fork, blinded, future::ready(body_of(&full)))
                .collect()
                .await;
        assert_eq!(chunks.len(), 2, "{fork}");
        assert!(chunks.iter().all(Result::is_ok));
    }
}

#[tokio::test]
async fn test_reassembly_head_precedes_body() {
    let fork = ForkName::Deneb;
    let full = block_for_fork(fork);
    let blinded = to_blinded(full.clone()).as_ssz_bytes();
    let (tx, rx) = tokio::sync::oneshot::channel::<ExecutionPayloadBody>();

    let mut stream = reassemble_full_block_bytes(fork, blinded, async move {
        rx.await.unwrap_or_default()
    });

    let head = stream.next().await.unwrap().unwrap();
    let full_bytes = full.as_ssz_bytes();
    assert_eq!(head, full_bytes[..head.len()]);

    tx.send(body_of(&full)).unwrap();
    let tail = stream.next().await.unwrap().unwrap();
    assert_eq!([head, tail].concat(), full_bytes);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_reassembly_missing_withdrawals_fails_second_chunk() {
    let fork = ForkName::Capella;
    let full = block_for_fork(fork);
    let blinded = to_blinded(full.clone()).as_ssz_bytes();
    let mut body = body_of(&full);
    body.withdrawals = None;

    let chunks: Vec<_> = reassemble_full_block_bytes(fork, blinded, future::ready(body))
        .collect()
        .await;
    assert!(chunks[0].is_ok());
    assert_eq!(
        chunks[1],
        Err(CodecError::IncompleteExternalBody {
            missing: "withdrawals"
        })
    );
}

#[tokio::test]
async fn test_reassembly_pre_bellatrix_single_chunk() {
    let bytes = block_for_fork(ForkName::Altair).as_ssz_bytes();
    let chunks: Vec<_> = reassemble_full_block_bytes(
        ForkName::Altair,
        bytes.clone(),
        future::ready(ExecutionPayloadBody::default()),
    )
    .collect()
    .await;
    assert_eq!(chunks, vec![Ok(bytes)]);
}

#[tokio::test]
async fn test_reassembly_of_corrupt_input_fails() {
    let result = collect_full_block_bytes(reassemble_full_block_bytes(
        ForkName::Deneb,
        vec![0u8; 40],
        future::ready(ExecutionPayloadBody::default()),
    ))
    .await;
    assert!(result.is_err());
}

// =============================================================================
// Full-or-blinded (de)serialization
// =============================================================================

#[test]
fn test_deserialize_picks_fork_and_representation() {
    let config = test_config();
    for fork in ForkName::ALL {
        let full = block_for_fork(fork);
        let decoded = deserialize_full_or_blinded(&config, &serialize_full_or_blinded(&full))
            .unwrap();
        assert_eq!(decoded, full);

        let blinded = to_blinded(full);
        let decoded =
            deserialize_full_or_blinded(&config, &serialize_full_or_blinded(&blinded)).unwrap();
        assert_eq!(decoded, blinded);
    }
}

#[test]
fn test_deserialize_follows_config_schedule() {
    // A Deneb block whose slot the config places in Capella does not decode.
    let config = test_config();
    let block = shared_types::test_utils::full_block(
        ForkName::Deneb,
        slot_in_fork(ForkName::Capella),
        1,
    );
    assert!(deserialize_full_or_blinded(&config, &block.as_ssz_bytes()).is_err());
}

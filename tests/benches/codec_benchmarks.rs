//! # Quantum-Chain Codec Benchmarks
//!
//! | Subsystem | Path | Compared against |
//! |-----------|------|------------------|
//! | qc-01 Block Codec | Byte-level blinding | Decode, blind, re-encode |
//! | qc-01 Block Codec | Streaming reassembly | Decode, unblind, re-encode |
//! | qc-02 Block Input | Gossip assembly of a 6-blob block | - |

#![allow(clippy::excessive_nesting)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::executor::block_on;
use qc_01_block_codec::{
    blind_block_bytes, collect_full_block_bytes, reassemble_full_block_bytes, to_blinded, to_full,
    ExecutionPayloadBody,
};
use qc_02_block_input::{GossipBlockInputApi, GossipBlockInputService, GossipedInput};
use shared_types::test_utils::{full_block, sidecar_for, slot_in_fork, test_config};
use shared_types::{ForkName, SignedBlock, MAX_BLOBS_PER_BLOCK};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// QC-01: Blinding
// ============================================================================

fn bench_blinding(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-01-blinding");
    group.measurement_time(Duration::from_secs(5));

    for fork in ForkName::EXECUTION {
        let block = full_block(fork, slot_in_fork(fork), MAX_BLOBS_PER_BLOCK);
        let bytes = block.as_ssz_bytes();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("bytes", fork), &bytes, |b, bytes| {
            b.iter(|| black_box(blind_block_bytes(fork, bytes).is_ok()))
        });

        group.bench_with_input(BenchmarkId::new("value", fork), &bytes, |b, bytes| {
            b.iter(|| {
                let decoded = SignedBlock::from_ssz_bytes(bytes, fork, false).ok();
                black_box(decoded.map(|block| to_blinded(block).as_ssz_bytes()))
            })
        });
    }

    group.finish();
}

// ============================================================================
// QC-01: Unblinding
// ============================================================================

fn bench_unblinding(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-01-unblinding");
    group.measurement_time(Duration::from_secs(5));

    for fork in ForkName::EXECUTION {
        let block = full_block(fork, slot_in_fork(fork), MAX_BLOBS_PER_BLOCK);
        let Some(body) = ExecutionPayloadBody::from_full_block(&block) else {
            continue;
        };
        let blinded = to_blinded(block).as_ssz_bytes();
        group.throughput(Throughput::Bytes(blinded.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("bytes", fork),
            &(blinded.clone(), body.clone()),
            |b, (blinded, body)| {
                b.iter(|| {
                    let body = body.clone();
                    let stream =
                        reassemble_full_block_bytes(fork, blinded.clone(), async move { body });
                    black_box(block_on(collect_full_block_bytes(stream)).is_ok())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("value", fork),
            &(blinded, body),
            |b, (blinded, body)| {
                b.iter(|| {
                    let full = SignedBlock::from_ssz_bytes(blinded, fork, true)
                        .ok()
                        .and_then(|block| to_full(block, body.clone()).ok());
                    black_box(full.map(|block| block.as_ssz_bytes()))
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// QC-02: Gossip Assembly
// ============================================================================

fn bench_gossip_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-02-gossip-assembly");

    let config = Arc::new(test_config());
    let block = Arc::new(full_block(
        ForkName::Deneb,
        slot_in_fork(ForkName::Deneb),
        MAX_BLOBS_PER_BLOCK,
    ));
    let sidecars: Vec<_> = (0..MAX_BLOBS_PER_BLOCK as u64)
        .map(|index| sidecar_for(&block, index))
        .collect();

    group.throughput(Throughput::Elements(MAX_BLOBS_PER_BLOCK as u64 + 1));
    group.bench_function("block_then_blobs", |b| {
        b.iter(|| {
            let service = GossipBlockInputService::new(config.clone());
            let _ = service.on_gossip(GossipedInput::Block {
                block: block.clone(),
                bytes: None,
            });
            for sidecar in &sidecars {
                let _ = service.on_gossip(GossipedInput::Blob {
                    sidecar: sidecar.clone(),
                    bytes: None,
                });
            }
            black_box(service.cached_block_inputs())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_blinding, bench_unblinding, bench_gossip_assembly);
criterion_main!(benches);

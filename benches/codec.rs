// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use seqnotes::format::{project_sequence_diagram, LabelListCodec, TextCodec};
use seqnotes::model::Document;
use seqnotes::ops::{apply_ops, Op};

// Benchmark identity (keep stable):
// - Group names in this file: `codec.labels`, `codec.project`, `ops.apply`
// - Case IDs (`small`, `medium`, `large`) must remain stable so results stay comparable.
const CASES: [(&str, usize); 3] = [("small", 8), ("medium", 200), ("large", 5_000)];

fn labels(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("participant_{idx:05}")).collect()
}

fn document(count: usize) -> Document {
    let mut doc = Document::default();
    let ids = labels(count)
        .iter()
        .map(|label| doc.items_mut().add_item(label).expect("add item"))
        .collect::<Vec<_>>();
    for (idx, pair) in ids.windows(2).enumerate() {
        doc.relations_mut()
            .add_relation(Some(pair[0]), Some(pair[1]), &format!("message {idx}"))
            .expect("add relation");
    }
    doc
}

fn benches_codec(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("codec.labels");
        for (case_id, count) in CASES {
            let values = labels(count);
            let encoded = LabelListCodec.encode(&values);
            group.throughput(Throughput::Bytes(encoded.len() as u64));
            group.bench_function(format!("{case_id}/encode"), |b| {
                b.iter(|| black_box(LabelListCodec.encode(black_box(&values)).len()))
            });
            group.bench_function(format!("{case_id}/decode"), |b| {
                b.iter(|| black_box(LabelListCodec.decode(black_box(&encoded)).len()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("codec.project");
        for (case_id, count) in CASES {
            let doc = document(count);
            group.throughput(Throughput::Elements(count as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| black_box(project_sequence_diagram(black_box(&doc)).len()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("ops.apply");
        for (case_id, count) in CASES {
            let doc = document(count);
            let ops = vec![
                Op::AddItem { label: "late".to_owned() },
                Op::MoveItem { source: count, destination: Some(0) },
                Op::RemoveItem { position: count / 2 },
            ];
            group.throughput(Throughput::Elements(ops.len() as u64));
            group.bench_function(case_id, |b| {
                b.iter_batched(
                    || doc.clone(),
                    |mut doc| black_box(apply_ops(&mut doc, &ops).expect("apply").new_rev),
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_codec);
criterion_main!(benches);

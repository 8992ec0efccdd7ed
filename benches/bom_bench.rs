// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Aggregation throughput over project groups of growing size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use panel_designer::bom::aggregate;
use panel_designer::editor::{Editor, NewBusbar};
use panel_designer::sizing::{BusbarSizingTable, SizingRow};
use panel_designer::store::MemoryStore;
use panel_designer::types::{
    Orientation, ProjectGroup, SelectedComponent, CUBICLE_SIZES, SECTION_NAMES, SINGLE_PHASE,
    THREE_PHASE,
};

fn sizing() -> BusbarSizingTable {
    let rows = (1..=40)
        .map(|i| SizingRow {
            part_number: format!("BB-{i}"),
            description: format!("Cu busbar {} mm²", i * 25),
            area_sqmm: f64::from(i * 25),
            number_of_runs: 1 + i % 3,
        })
        .collect();
    BusbarSizingTable::new(rows)
}

/// `panels` panels of six two-compartment cubicles, fully populated
fn build_group(group: &ProjectGroup, panels: usize) -> (MemoryStore, Editor) {
    let mut store = MemoryStore::new();
    let mut editor = Editor::new(group.clone());
    for p in 0..panels {
        editor.create_panel(&format!("P{p:03}"), 600).unwrap();
        for c in 0..6 {
            editor.add_cubicle(CUBICLE_SIZES[c % CUBICLE_SIZES.len()], 2).unwrap();
            for comp in 0..2 {
                for sec in 0..SECTION_NAMES.len() {
                    let at = editor.panel().unwrap().section_ref(c, comp, sec).unwrap();
                    let model = SelectedComponent::new(format!("M-{}-{}", sec, (p + c) % 7), "bench");
                    editor.select_component(at, model).unwrap();
                }
            }
        }
        editor
            .add_busbar(NewBusbar::computed(Orientation::Vertical, 400.0, 2.0, SINGLE_PHASE))
            .unwrap();
        editor
            .add_busbar(NewBusbar::catalog(Orientation::Horizontal, "50x10 Cu Busbar (5.5m Length) LVT", 2, THREE_PHASE))
            .unwrap();
        editor.save_panel(&mut store).unwrap();
    }
    (store, editor)
}

fn bench_aggregate(c: &mut Criterion) {
    let group_id = ProjectGroup::new("Acme", "Bench", "B-1");
    let sizing = sizing();

    let mut group = c.benchmark_group("aggregate");
    for panels in [1usize, 10, 50] {
        let (store, editor) = build_group(&group_id, panels);
        let current = editor.panel().unwrap().clone();
        group.bench_with_input(BenchmarkId::new("panels", panels), &current, |b, current| {
            b.iter(|| {
                let report = aggregate(black_box(&store), &sizing, &group_id, current).unwrap();
                black_box(report);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);

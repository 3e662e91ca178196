//! Layout and render-pass benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use impro_scoreboard::layout::{MediaInfo, compute_layout};
use impro_scoreboard::render::{MediaRefs, Renderer};
use impro_scoreboard::surface::RecordingSurface;
use impro_scoreboard::{MatchState, StyleModel};
use std::hint::black_box;

fn layout(c: &mut Criterion) {
    let style = StyleModel::default();
    let media = MediaInfo {
        background: Some((1920, 1080)),
        logo: Some((512, 256)),
    };

    let mut group = c.benchmark_group("compute_layout");
    for teams in 2..=4 {
        let mut state = MatchState::new();
        state.set_team_count(teams);
        group.bench_with_input(BenchmarkId::from_parameter(teams), &state, |b, state| {
            b.iter(|| compute_layout(black_box(1920), black_box(1080), state, &style, media));
        });
    }
    group.finish();
}

fn render_pass(c: &mut Criterion) {
    let mut state = MatchState::new();
    state.set_team_count(4);
    state.rename_team(0, "THE QUITE LONG TEAM NAME THAT WRAPS");
    let style = StyleModel::default();
    let geometry = compute_layout(1920, 1080, &state, &style, MediaInfo::default());
    let mut surface = RecordingSurface::new(1920, 1080);
    let mut renderer = Renderer::new();

    c.bench_function("render_recording_1080p", |b| {
        b.iter(|| renderer.render(&mut surface, black_box(&geometry), &style, MediaRefs::default()));
    });
}

criterion_group!(benches, layout, render_pass);
criterion_main!(benches);

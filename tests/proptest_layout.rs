//! Property-based tests for the layout engine.
//!
//! Uses proptest to check that `compute_layout` is deterministic, never
//! panics, and keeps the structural invariants the renderer relies on.

use impro_scoreboard::layout::{MediaInfo, compute_layout};
use impro_scoreboard::state::{MAX_FOULS, MatchState};
use impro_scoreboard::style::{StyleModel, StyleParam, TimerAnchor, Visibility};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A style with every numeric parameter drawn from its editing range.
fn style_strategy() -> impl Strategy<Value = StyleModel> {
    let params = StyleParam::ALL.map(|p| {
        let range = p.range();
        (*range.start()..=*range.end()).boxed()
    });
    (params.to_vec(), any::<bool>(), 0u8..8).prop_map(|(values, top, flags)| {
        let mut style = StyleModel::default();
        for (param, value) in StyleParam::ALL.iter().zip(values) {
            style.set_param(*param, value);
        }
        if top {
            style.timer_anchor = TimerAnchor::Top;
        }
        style.visibility = Visibility::from_bits_truncate(flags);
        style
    })
}

/// A match with 2-4 teams and arbitrary legal scores and fouls.
fn state_strategy() -> impl Strategy<Value = MatchState> {
    (2usize..=4, prop::collection::vec((0u32..200, 0u8..=MAX_FOULS), 4), 0u32..6000).prop_map(
        |(count, teams, seconds)| {
            let mut state = MatchState::new();
            state.set_team_count(count);
            for (i, (score, fouls)) in teams.into_iter().take(count).enumerate() {
                state.adjust_score(i, score as i32);
                state.adjust_fouls(i, i32::from(fouls));
            }
            state.set_timer(seconds);
            state
        },
    )
}

fn media_strategy() -> impl Strategy<Value = MediaInfo> {
    (
        prop::option::of((0u32..4000, 0u32..4000)),
        prop::option::of((0u32..4000, 0u32..4000)),
    )
        .prop_map(|(background, logo)| MediaInfo { background, logo })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Identical inputs give bit-identical geometry.
    #[test]
    fn layout_is_deterministic(
        w in 0u32..4000,
        h in 0u32..3000,
        state in state_strategy(),
        style in style_strategy(),
        media in media_strategy(),
    ) {
        let a = compute_layout(w, h, &state, &style, media);
        let b = compute_layout(w, h, &state, &style, media);
        prop_assert_eq!(a, b);
    }

    /// One team geometry per team, each with a whole-pixel, non-negative font size.
    #[test]
    fn team_geometry_matches_state(
        w in 1u32..4000,
        h in 1u32..3000,
        state in state_strategy(),
        style in style_strategy(),
    ) {
        let g = compute_layout(w, h, &state, &style, MediaInfo::default());
        prop_assert_eq!(g.teams.len(), state.team_count());
        for (team, geo) in state.teams().iter().zip(&g.teams) {
            prop_assert_eq!(&geo.name.text, &team.name);
            prop_assert_eq!(geo.score.text.clone(), team.score.to_string());
            for size in [geo.name.size, geo.score.size] {
                prop_assert!(size >= 0.0);
                prop_assert_eq!(size, size.trunc());
            }
            match &geo.fouls {
                Some(row) => {
                    prop_assert!(style.is_visible(Visibility::FOULS));
                    prop_assert_eq!(row.active_count(), usize::from(team.fouls));
                }
                None => prop_assert!(!style.is_visible(Visibility::FOULS)),
            }
        }
        prop_assert_eq!(g.timer.is_some(), style.is_visible(Visibility::TIMER));
    }

    /// Columns tile the surface width, shifted by the horizontal offset.
    #[test]
    fn columns_tile_width(
        w in 1u32..4000,
        h in 1u32..3000,
        state in state_strategy(),
        style in style_strategy(),
    ) {
        let g = compute_layout(w, h, &state, &style, MediaInfo::default());
        let total: f32 = g.teams.iter().map(|t| t.column.width).sum();
        prop_assert!((total - w as f32).abs() < 0.5);
        let shift = w as f32 * style.offset_x;
        prop_assert!((g.teams[0].column.x - shift).abs() < 0.5);
    }
}

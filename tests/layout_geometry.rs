//! Layout engine geometry across team counts, style edits and surfaces.

use impro_scoreboard::layout::{MediaInfo, TextKind, compute_layout};
use impro_scoreboard::state::MatchState;
use impro_scoreboard::style::{StyleModel, StyleParam, TimerAnchor, Visibility};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

#[test]
fn columns_split_width_evenly_for_each_team_count() {
    let style = StyleModel::default();
    for count in 2..=4 {
        let mut state = MatchState::new();
        state.set_team_count(count);
        let g = compute_layout(1200, 600, &state, &style, MediaInfo::default());
        assert_eq!(g.teams.len(), count);
        let column = 1200.0 / count as f32;
        for (i, team) in g.teams.iter().enumerate() {
            assert_eq!(team.index, i);
            assert!(approx(team.column.width, column));
            assert!(approx(team.name.x, i as f32 * column + column / 2.0));
            assert!(approx(team.score.x, team.name.x));
            assert_eq!(team.name.kind, TextKind::Name);
            assert_eq!(team.score.kind, TextKind::Score);
        }
    }
}

#[test]
fn horizontal_offset_shifts_everything() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.set_param(StyleParam::OffsetX, 0.1);
    let g = compute_layout(1000, 500, &state, &style, MediaInfo::default());
    let timer = g.timer.unwrap();
    assert!(approx(timer.text.x, 600.0));
    assert!(approx(g.teams[0].name.x, 1000.0 / 6.0 + 100.0));
}

#[test]
fn timer_anchor_and_offset() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.timer_anchor = TimerAnchor::Top;
    style.set_param(StyleParam::OffsetTimer, 0.05);
    let g = compute_layout(1000, 1000, &state, &style, MediaInfo::default());
    let timer = g.timer.unwrap();
    assert!(approx(timer.text.y, 200.0));
    assert!(approx(timer.panel.center().1, 200.0));
}

#[test]
fn global_scale_and_padding_size_the_boxes() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.set_param(StyleParam::GlobalScale, 2.0);
    style.set_param(StyleParam::BoxPadding, 0.5);
    let g = compute_layout(1000, 1000, &state, &style, MediaInfo::default());
    let timer = g.timer.unwrap();
    assert!(approx(timer.panel.width, 250.0));
    assert!(approx(timer.panel.height, 150.0));
    // base font = trunc(1000 * 0.05 * 2) = 100
    assert!(approx(timer.text.size, 250.0));
    let score_panel = g.teams[0].score_panel;
    assert!(approx(score_panel.width, 200.0));
    assert!(approx(score_panel.height, 160.0));
    assert!(approx(g.teams[0].score.size, 300.0));
}

#[test]
fn font_sizes_are_whole_pixels() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.set_param(StyleParam::NameScale, 1.3);
    let g = compute_layout(1000, 777, &state, &style, MediaInfo::default());
    // base = trunc(38.85) = 38
    assert!(approx(g.teams[0].name.size, 49.0));
    assert!(approx(g.teams[0].score.size, 114.0));
    assert!(approx(g.timer.unwrap().text.size, 95.0));
}

#[test]
fn name_and_score_offsets_move_rows() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.set_param(StyleParam::OffsetGlobalY, -0.1);
    style.set_param(StyleParam::OffsetNames, 0.02);
    style.set_param(StyleParam::OffsetScores, -0.02);
    let g = compute_layout(1000, 1000, &state, &style, MediaInfo::default());
    // row center 400
    assert!(approx(g.teams[0].name.y, 400.0 - 120.0 + 20.0));
    assert!(approx(g.teams[0].score.y, 400.0 + 20.0 - 20.0));
    let fouls = g.teams[0].fouls.as_ref().unwrap();
    assert!(approx(fouls.panel.center().1, 400.0 + 160.0));
}

#[test]
fn foul_row_tracks_foul_count() {
    let mut state = MatchState::new();
    state.adjust_fouls(0, 2);
    let style = StyleModel::default();
    let g = compute_layout(1920, 1080, &state, &style, MediaInfo::default());
    let counts: Vec<_> = g
        .teams
        .iter()
        .map(|t| t.fouls.as_ref().unwrap().active_count())
        .collect();
    assert_eq!(counts, [2, 0, 0]);
    let row = g.teams[0].fouls.as_ref().unwrap();
    assert!(approx(row.panel.width, g.teams[0].score_panel.width));
    assert!(approx(row.panel.height, g.teams[0].score_panel.height * 0.4));
}

#[test]
fn hiding_fouls_keeps_teams() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.visibility.remove(Visibility::FOULS);
    let g = compute_layout(800, 450, &state, &style, MediaInfo::default());
    assert_eq!(g.teams.len(), 3);
    assert!(g.timer.is_some());
    assert!(g.teams.iter().all(|t| t.fouls.is_none()));
}

#[test]
fn logo_scale_and_offset() {
    let state = MatchState::new();
    let mut style = StyleModel::default();
    style.set_param(StyleParam::LogoScale, 1.0);
    style.set_param(StyleParam::LogoOffsetY, 0.0);
    let media = MediaInfo {
        background: None,
        logo: Some((300, 100)),
    };
    let g = compute_layout(1000, 500, &state, &style, media);
    let logo = g.logo.unwrap();
    assert!(approx(logo.height, 100.0));
    assert!(approx(logo.width, 300.0));
    assert!(approx(logo.center().0, 500.0));
    assert!(approx(logo.center().1, 250.0));
    assert!(g.background.is_none());
}

#[test]
fn background_fills_surface_regardless_of_aspect() {
    let state = MatchState::new();
    let style = StyleModel::default();
    let media = MediaInfo {
        background: Some((16, 9)),
        logo: None,
    };
    let g = compute_layout(1000, 1000, &state, &style, media);
    let bg = g.background.unwrap();
    assert!(approx(bg.width, 1000.0) && approx(bg.height, 1000.0));
    assert!(approx(bg.x, 0.0) && approx(bg.y, 0.0));
}

#[test]
fn timer_text_follows_state() {
    let mut state = MatchState::new();
    state.set_timer(65);
    let g = compute_layout(800, 450, &state, &StyleModel::default(), MediaInfo::default());
    assert_eq!(g.timer.unwrap().text.text, "01:05");
}

#[test]
fn repeated_calls_are_identical() {
    let mut state = MatchState::new();
    state.set_team_count(4);
    state.adjust_score(3, 7);
    let mut style = StyleModel::default();
    style.set_param(StyleParam::OffsetX, -0.13);
    let media = MediaInfo {
        background: Some((640, 480)),
        logo: Some((123, 77)),
    };
    let a = compute_layout(1366, 768, &state, &style, media);
    let b = compute_layout(1366, 768, &state, &style, media);
    assert_eq!(a, b);
}

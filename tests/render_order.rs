//! Draw order and colors of a full pass, observed through the display list.

mod common;

use common::{board, scenario_board};
use impro_scoreboard::assets::RasterImage;
use impro_scoreboard::color::Rgba;
use impro_scoreboard::layout::{MediaInfo, compute_layout};
use impro_scoreboard::render::{CLEAR_COLOR, MediaRefs, OUTLINE_COLOR, Renderer};
use impro_scoreboard::scoreboard::Action;
use impro_scoreboard::state::MatchState;
use impro_scoreboard::style::{StyleChange, StyleModel, Visibility};
use impro_scoreboard::surface::{DrawCommand, RecordingSurface};

/// Compact tag per command for order assertions.
fn tags(surface: &RecordingSurface) -> Vec<String> {
    surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Clear(_) => Some("clear".to_string()),
            DrawCommand::Image { size, .. } => Some(format!("image {}x{}", size.0, size.1)),
            DrawCommand::RoundedRect { .. } => Some("box".to_string()),
            DrawCommand::Circle { .. } => Some("dot".to_string()),
            DrawCommand::Text { text, color, .. } if *color != OUTLINE_COLOR => Some(format!("text {text}")),
            DrawCommand::Text { .. } => None,
        })
        .collect()
}

#[test]
fn full_pass_order() {
    let mut state = MatchState::new();
    state.set_team_count(2);
    let style = StyleModel::default();
    let background = RasterImage::solid(4, 4, Rgba::BLUE);
    let logo = RasterImage::solid(2, 1, Rgba::GREEN);
    let media = MediaRefs {
        background: Some(&background),
        logo: Some(&logo),
    };
    let geometry = compute_layout(1280, 720, &state, &style, media.info());
    let mut surface = RecordingSurface::new(1280, 720);
    Renderer::new().render(&mut surface, &geometry, &style, media);

    assert_eq!(
        tags(&surface),
        [
            "clear",
            "image 4x4",
            "image 2x1",
            "box",
            "text 04:00",
            "text RED",
            "box",
            "text 0",
            "box",
            "dot",
            "dot",
            "dot",
            "text YELLOW",
            "box",
            "text 0",
            "box",
            "dot",
            "dot",
            "dot",
        ]
    );
    assert_eq!(surface.commands()[0], DrawCommand::Clear(CLEAR_COLOR));
}

#[test]
fn hidden_timer_and_fouls_are_not_drawn() {
    let mut board = board();
    board.dispatch(Action::Style(StyleChange::Visible(Visibility::TIMER, false)));
    board.dispatch(Action::Style(StyleChange::Visible(Visibility::FOULS, false)));
    let mut surface = RecordingSurface::new(800, 450);
    board.render(&mut surface);
    let tags = tags(&surface);
    assert!(!tags.iter().any(|t| t == "dot"));
    assert!(!tags.iter().any(|t| t == "text 04:00"));
    assert_eq!(tags.iter().filter(|t| *t == "box").count(), 3);
}

#[test]
fn scenario_foul_dots_at_1080p() {
    let mut board = scenario_board();
    let mut surface = RecordingSurface::new(1920, 1080);
    board.render(&mut surface);

    let style = board.style().clone();
    let dots: Vec<Rgba> = surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Circle { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(dots.len(), 9);
    let active = |team: usize| dots[team * 3..team * 3 + 3].iter().filter(|c| **c == style.foul_color).count();
    let inactive = |team: usize| dots[team * 3..team * 3 + 3].iter().filter(|c| **c == Rgba::INACTIVE_DOT).count();
    assert_eq!((active(0), inactive(0)), (0, 3));
    assert_eq!((active(1), inactive(1)), (3, 0));
    assert_eq!((active(2), inactive(2)), (1, 2));

    assert_eq!(surface.texts("03:00").count(), 1);
    assert_eq!(surface.texts("5").count(), 1);
}

#[test]
fn text_colors_and_fonts() {
    let mut board = board();
    board.dispatch(Action::AdjustScore { team: 0, delta: 7 });
    let mut surface = RecordingSurface::new(800, 450);
    board.render(&mut surface);
    let style = board.style();

    let timer = surface.texts("04:00").next().unwrap();
    assert!(matches!(timer, DrawCommand::Text { color, font, .. }
        if *color == Rgba::WHITE && *font == style.score_font));
    let score = surface.texts("7").next().unwrap();
    assert!(matches!(score, DrawCommand::Text { color, font, .. }
        if *color == style.score_color && *font == style.score_font));
    let name = surface.texts("RED").last().unwrap();
    assert!(matches!(name, DrawCommand::Text { color, font, .. }
        if *color == style.name_color && *font == style.name_font));
}

#[test]
fn outline_surrounds_name_at_two_pixels() {
    let mut board = board();
    let mut surface = RecordingSurface::new(1920, 1080);
    board.render(&mut surface);
    let positions: Vec<(f32, f32)> = surface
        .texts("BLUE")
        .filter_map(|cmd| match cmd {
            DrawCommand::Text { cx, cy, color, .. } if *color == OUTLINE_COLOR => Some((*cx, *cy)),
            _ => None,
        })
        .collect();
    assert_eq!(positions.len(), 8);
    let (x, y) = match surface.texts("BLUE").last().unwrap() {
        DrawCommand::Text { cx, cy, .. } => (*cx, *cy),
        _ => unreachable!(),
    };
    for (ox, oy) in positions {
        let (dx, dy) = ((ox - x).abs(), (oy - y).abs());
        assert!(dx < 2.01 && dy < 2.01 && dx + dy > 1.99);
    }
}

#[test]
fn long_names_wrap_to_centered_lines() {
    let mut board = board();
    board.dispatch(Action::RenameTeam {
        team: 0,
        name: "THE EXTREMELY LONG TEAM NAME".into(),
    });
    board.dispatch(Action::Style(StyleChange::Visible(Visibility::OUTLINE, false)));
    let mut surface = RecordingSurface::new(900, 600);
    board.render(&mut surface);

    // Column 300 px, wrap width 270, size 30 → 18 px per char → 15 chars per line.
    let geometry = compute_layout(900, 600, board.state(), board.style(), MediaInfo::default());
    let name = &geometry.teams[0].name;
    let lines: Vec<(String, f32)> = surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Text { text, cy, size, .. } if (*size - name.size).abs() < 1e-3 && text != "YELLOW" && text != "BLUE" => {
                Some((text.clone(), *cy))
            }
            _ => None,
        })
        .collect();
    let texts: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, ["THE EXTREMELY", "LONG TEAM NAME"]);
    let mid = (lines[0].1 + lines[1].1) / 2.0;
    assert!((mid - name.y).abs() < 1e-3);
}

#[test]
fn zero_size_text_is_skipped() {
    let mut board = board();
    let mut surface = RecordingSurface::new(10, 10);
    board.render(&mut surface);
    // base font = trunc(0.5) = 0, so no text at all.
    assert!(!surface
        .commands()
        .iter()
        .any(|cmd| matches!(cmd, DrawCommand::Text { .. })));
}

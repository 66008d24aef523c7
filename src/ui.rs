mod palette;
pub mod screen;

pub use palette::Palette;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::{App, SettingRow};
use crate::celebration::Celebration;
use screen::current_screen;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const SETTINGS_WIDTH: u16 = 44;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.game.settings().visual_theme);

        current_screen(self.stage()).render(self, &palette, area, buf);

        if let Some(cursor) = self.settings_cursor {
            render_settings(self, cursor, &palette, area, buf);
        }

        if self.celebration.is_active() {
            render_celebration(&self.celebration, &palette, area, buf);
        }
    }
}

/// Settings panel drawn over whatever screen is active
fn render_settings(app: &App, cursor: usize, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let settings = app.game.settings();
    let label_width = SETTINGS_WIDTH as usize - 16;

    let mut lines: Vec<Line> = SettingRow::ALL
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = i == cursor;
            let marker = if selected { "› " } else { "  " };
            let label = format!("{marker}{:<label_width$}", row.to_string());
            let value = format!("{:>10}", row.value(settings));
            if selected {
                Line::from(vec![
                    Span::styled(label, palette.title()),
                    Span::styled(value, palette.selected()),
                ])
            } else {
                Line::from(vec![Span::raw(label), Span::styled(value, palette.bold())])
            }
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "(↑↓) select / (enter) change / (esc) close",
        palette.legend(),
    )));

    let popup = centered(area, SETTINGS_WIDTH, lines.len() as u16 + 2);
    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Settings ")
                .title_alignment(Alignment::Center)
                .border_style(palette.title()),
        )
        .render(popup, buf);
}

/// Render celebration sparks on top of the results screen
fn render_celebration(celebration: &Celebration, palette: &Palette, area: Rect, buf: &mut Buffer) {
    for spark in &celebration.sparks {
        if spark.x < 0.0 || spark.y < 0.0 {
            continue;
        }
        let x = spark.x as u16;
        let y = spark.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = palette.sparks[spark.color_index % palette.sparks.len()];
        let brightness = spark.brightness();
        let style = palette.bold().fg(color);
        let style = match (spark.is_letter(), brightness) {
            (true, b) if b > 0.4 => style,
            (true, _) => style.remove_modifier(Modifier::BOLD),
            (false, b) if b > 0.7 => style,
            (false, b) if b > 0.3 => style.remove_modifier(Modifier::BOLD),
            (false, _) => style.remove_modifier(Modifier::BOLD).add_modifier(Modifier::DIM),
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&spark.symbol.to_string());
            cell.set_style(style);
        }
    }
}

/// A `width` x `height` rect in the middle of `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Prepend blank lines so `lines` sit in the vertical middle of `height` rows
fn pad_to_center(lines: Vec<Line<'_>>, height: u16) -> Vec<Line<'_>> {
    let top = (height as usize).saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::raw(""); top];
    padded.extend(lines);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::scoring::Outcome;
    use crate::settings::Settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WORDS: &str = r#"{"theme":"Animals","words":["Elephant","Giraffe"]}"#;

    fn create_test_app() -> App {
        App::with_game(Game::with_rng(
            Settings::default(),
            StdRng::seed_from_u64(3),
        ))
    }

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn playing_app(mode: char) -> App {
        let mut app = create_test_app();
        app.game.submit_words(WORDS).unwrap();
        app.on_key(KeyEvent::new(KeyCode::Char(mode), KeyModifiers::NONE));
        app
    }

    #[test]
    fn test_input_screen_shows_presets_and_error() {
        let mut app = create_test_app();
        let screen = rendered(&app, Rect::new(0, 0, 100, 24));
        assert!(screen.contains("VOCABULARY DUEL"));
        assert!(screen.contains("Animals"));
        assert!(screen.contains("Weather"));

        app.on_paste("{not json");
        let _ = app.game.submit_words(&app.buffer.clone());
        let screen = rendered(&app, Rect::new(0, 0, 100, 24));
        assert!(screen.contains("✗"));
        assert!(screen.contains("{not json"));
    }

    #[test]
    fn test_mode_screen_lists_roster() {
        let mut app = create_test_app();
        app.game.submit_words(WORDS).unwrap();
        let screen = rendered(&app, Rect::new(0, 0, 100, 24));
        assert!(screen.contains("Player 1"));
        assert!(screen.contains("Player 2"));
        assert!(screen.contains("Free-for-all"));
    }

    #[test]
    fn test_playing_screen_shows_word_and_countdown() {
        let app = playing_app('s');
        let word = app.game.quiz().current_word().unwrap().to_string();
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains(&word));
        assert!(screen.contains("30s"));
        assert!(screen.contains("Word 1 of 2"));
    }

    #[test]
    fn test_playing_screen_feedback_after_answer() {
        let mut app = playing_app('s');
        app.game.answer(Outcome::Incorrect);
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains("Not this time."));
        assert!(screen.contains("(enter) next word"));
    }

    #[test]
    fn test_turn_based_screen_names_current_player() {
        let app = playing_app('t');
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains("Player 1's turn"));
    }

    #[test]
    fn test_results_screen_solo() {
        let mut app = playing_app('s');
        app.game.answer(Outcome::Correct);
        app.game.next_word();
        app.game.answer(Outcome::Incorrect);
        app.game.next_word();
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains("1 / 2"));
        assert!(screen.contains("50% known"));
        assert!(screen.contains("Good job!"));
        assert!(screen.contains("(p)lay again"));
    }

    #[test]
    fn test_results_screen_duel_draw() {
        let mut app = playing_app('f');
        app.game.answer(Outcome::CorrectBy(0));
        app.game.next_word();
        app.game.answer(Outcome::CorrectBy(1));
        app.game.next_word();
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains("It's a draw!"));
        assert!(screen.contains("#1 Player 1"));
        assert!(screen.contains("#1 Player 2"));
    }

    #[test]
    fn test_settings_overlay() {
        let mut app = create_test_app();
        app.on_key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE));
        let screen = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Time limit per word"));
        assert!(screen.contains("30s"));
    }

    #[test]
    fn test_celebration_rendering() {
        let mut app = playing_app('s');
        app.celebration.start("PERFECT!", 80, 24);
        assert!(app.celebration.is_active());
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_extreme_sizes() {
        let mut app = playing_app('t');
        app.on_key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE));
        for area in [
            Rect::new(0, 0, 10, 5),
            Rect::new(0, 0, 200, 5),
            Rect::new(0, 0, 20, 50),
            Rect::new(0, 0, 1000, 1000),
        ] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert!(*buffer.area() == area);
        }
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }

    #[test]
    fn test_pad_to_center() {
        let padded = pad_to_center(vec![Line::raw("x")], 5);
        assert_eq!(padded.len(), 3);
    }
}

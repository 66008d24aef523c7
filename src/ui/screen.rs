use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use webbrowser::Browser;

use super::{pad_to_center, Palette, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::app::App;
use crate::mode::GameMode;
use crate::scoring::{Outcome, Report, Verdict};
use crate::session::{Resolution, Stage};
use crate::util::fit_width;

/// A UI Screen boundary: one per quiz stage
pub trait Screen {
    fn render(&self, app: &App, palette: &Palette, area: Rect, buf: &mut Buffer);
}

/// JSON editor with presets and validation errors
pub struct InputScreen;

impl Screen for InputScreen {
    fn render(&self, app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(2), // instructions
                Constraint::Min(3),    // editor
                Constraint::Length(1), // error
                Constraint::Length(1), // presets
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("VOCABULARY DUEL", palette.title()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(
            r#"Paste or type a word list as JSON: {"theme": "Animals", "words": ["Cat", "Dog", ...]}. Ten words are drawn at random."#,
        )
        .style(palette.dim())
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

        render_editor(app, palette, chunks[2], buf);

        if let Some(err) = app.game.error() {
            Paragraph::new(Span::styled(format!("✗ {err}"), palette.bad())).render(chunks[3], buf);
        }

        let mut spans = vec![Span::styled("Presets: ", palette.bold())];
        for (i, preset) in app.presets().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" · "));
            }
            let style = if app.preset_index == Some(i) {
                palette.selected()
            } else {
                palette.dim()
            };
            spans.push(Span::styled(preset.theme.clone(), style));
        }
        Paragraph::new(Line::from(spans)).render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(ctrl+s) start / (ctrl+e) example / (tab) presets / (ctrl+u) clear / (f2) settings / (esc)ape",
            palette.legend(),
        ))
        .render(chunks[5], buf);
    }
}

fn render_editor(app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Word list ")
        .border_style(palette.dim());
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    if app.buffer.is_empty() {
        Paragraph::new(Span::styled(
            "Nothing here yet. Paste a list or press ctrl+e for an example.",
            palette.dim(),
        ))
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
        return;
    }

    let mut lines: Vec<Line> = app.buffer.split('\n').map(Line::raw).collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("█", palette.dim()));
    }

    // keep the cursor in view
    let rows: usize = app
        .buffer
        .split('\n')
        .map(|line| (line.chars().count() + 1).div_ceil(inner_width).max(1))
        .sum();
    let offset = rows.saturating_sub(inner_height) as u16;

    Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .render(area, buf);
}

/// Solo or duel, plus the duel roster
pub struct ModeScreen;

impl Screen for ModeScreen {
    fn render(&self, app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let roster = app.game.roster();
        let adding = app.name_edit.is_some() && app.roster_cursor >= roster.len();
        let rows = roster.len() + usize::from(adding);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(rows as u16 + 2),
                Constraint::Length(1),
            ])
            .split(area);

        let quiz = app.game.quiz();
        Paragraph::new(Line::from(vec![
            Span::styled(quiz.theme().to_string(), palette.title()),
            Span::styled(format!(" · {} words", quiz.total_words()), palette.dim()),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let option = |key: &str, name: &str, blurb: &str| {
            Line::from(vec![
                Span::styled(format!("({key}) "), palette.title()),
                Span::styled(name.to_string(), palette.bold()),
                Span::styled(format!("  {blurb}"), palette.dim()),
            ])
        };
        Paragraph::new(vec![
            option("s", "Solo", "test your own vocabulary"),
            option("t", "Turn-based duel", "players take turns, one word each"),
            option("f", "Free-for-all duel", "whoever knows the word scores"),
        ])
        .render(chunks[2], buf);

        let mut lines = Vec::with_capacity(rows);
        for i in 0..rows {
            let selected = i == app.roster_cursor;
            let marker = if selected { "› " } else { "  " };
            let line = match (&app.name_edit, selected) {
                (Some(edit), true) => Line::from(vec![
                    Span::styled(format!("{marker}{}. ", i + 1), palette.title()),
                    Span::styled(format!("{edit}_"), palette.selected()),
                ]),
                _ => {
                    let name = roster.names().get(i).cloned().unwrap_or_default();
                    let style = if selected {
                        palette.title()
                    } else {
                        palette.bold()
                    };
                    Line::from(Span::styled(format!("{marker}{}. {name}", i + 1), style))
                }
            };
            lines.push(line);
        }
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Duel players ")
                    .border_style(palette.dim()),
            )
            .render(chunks[4], buf);

        let legend = if app.name_edit.is_some() {
            "(enter) save name / (esc) cancel"
        } else {
            "(a)dd / (e)dit / (d)elete player / (↑↓) select / (f2) settings / (esc) back"
        };
        Paragraph::new(Span::styled(legend, palette.legend())).render(chunks[5], buf);
    }
}

/// One word at a time with the countdown and scores
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let quiz = app.game.quiz();
        let Some(mode) = quiz.mode() else {
            return;
        };
        let score_lines = match mode {
            GameMode::Solo { .. } => 1,
            GameMode::Duel(duel) => duel.players.len() as u16,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),           // theme and position
                Constraint::Length(1),           // progress
                Constraint::Length(1),           // countdown
                Constraint::Min(3),              // word
                Constraint::Length(1),           // feedback
                Constraint::Length(1),           // padding
                Constraint::Length(score_lines), // scores
                Constraint::Length(1),           // padding
                Constraint::Length(1),           // legend
            ])
            .split(area);

        let total = quiz.total_words();
        let position = (quiz.current_index() + 1).min(total);
        Paragraph::new(Line::from(vec![
            Span::styled(quiz.theme().to_string(), palette.title()),
            Span::styled(format!("   Word {position} of {total}"), palette.dim()),
        ]))
        .render(chunks[0], buf);

        Gauge::default()
            .gauge_style(palette.bold().fg(palette.accent))
            .ratio(quiz.progress().clamp(0.0, 1.0))
            .label(format!("{:.0}%", quiz.progress() * 100.0))
            .render(chunks[1], buf);

        match app.game.countdown() {
            Some(countdown) if countdown.is_enabled() => {
                let color = if countdown.remaining() <= 5 {
                    palette.warning
                } else {
                    palette.correct
                };
                Gauge::default()
                    .gauge_style(palette.bold().fg(color))
                    .ratio(countdown.fraction_left().clamp(0.0, 1.0))
                    .label(format!("{}s", countdown.remaining()))
                    .render(chunks[2], buf);
            }
            _ => Paragraph::new(Span::styled("no time limit", palette.dim()))
                .alignment(Alignment::Center)
                .render(chunks[2], buf),
        }

        let resolution = quiz.resolution();
        let word_style = match resolution.map(|r| credited(r.outcome) && !r.timed_out) {
            Some(true) => palette.good(),
            Some(false) => palette.bad(),
            None => palette.title(),
        };
        let mut word_lines = Vec::new();
        if let Some(player) = mode.duel().and_then(|duel| duel.current()) {
            if resolution.is_none() {
                word_lines.push(Line::from(Span::styled(
                    format!("{}'s turn", player.name),
                    palette.dim(),
                )));
                word_lines.push(Line::raw(""));
            }
        }
        let word = quiz.current_word().unwrap_or_default();
        word_lines.push(Line::from(Span::styled(
            fit_width(word, chunks[3].width as usize),
            word_style,
        )));
        Paragraph::new(pad_to_center(word_lines, chunks[3].height))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if let Some(resolution) = resolution {
            let (text, good) = feedback(resolution, mode);
            let style = if good { palette.good() } else { palette.bad() };
            Paragraph::new(Span::styled(text, style))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        render_scores(mode, palette, chunks[6], buf);

        let legend = match (resolution.is_some(), mode) {
            (true, _) if app.game.awaiting_next() => "(enter) next word / (f2) settings / (esc) restart",
            (true, _) => "(enter) skip pause / (f2) settings / (esc) restart",
            (false, GameMode::Duel(duel)) if !duel.turn_based => {
                "(1-9) who knew it / (0) nobody / (f2) settings / (esc) restart"
            }
            (false, GameMode::Duel(_)) => "(y) knew it / (n) did not / (f2) settings / (esc) restart",
            (false, GameMode::Solo { .. }) => {
                "(y) I know it / (n) I don't / (f2) settings / (esc) restart"
            }
        };
        Paragraph::new(Span::styled(legend, palette.legend())).render(chunks[8], buf);
    }
}

fn credited(outcome: Outcome) -> bool {
    matches!(outcome, Outcome::Correct | Outcome::CorrectBy(_))
}

/// Message shown once the current word is settled
fn feedback(resolution: Resolution, mode: &GameMode) -> (String, bool) {
    if resolution.timed_out {
        return ("Time's up!".to_string(), false);
    }
    match resolution.outcome {
        Outcome::Correct => ("Correct!".to_string(), true),
        Outcome::Incorrect => ("Not this time.".to_string(), false),
        Outcome::CorrectBy(idx) => {
            let name = mode
                .duel()
                .and_then(|duel| duel.players.get(idx))
                .map_or("Someone", |p| p.name.as_str());
            (format!("{name} knew it!"), true)
        }
        Outcome::NobodyCorrect => ("Nobody knew it.".to_string(), false),
    }
}

fn render_scores(mode: &GameMode, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let lines = match mode {
        GameMode::Solo { correct } => vec![Line::from(vec![
            Span::styled("Known so far: ", palette.dim()),
            Span::styled(correct.to_string(), palette.good()),
        ])],
        GameMode::Duel(duel) => duel
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                let up = duel.turn_based && i == duel.current_player;
                let name_style = if up { palette.selected() } else { palette.bold() };
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), palette.dim()),
                    Span::styled(player.name.clone(), name_style),
                    Span::styled(format!("  {}", player.score), palette.good()),
                ])
            })
            .collect(),
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Final score, ranking and what to do next
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let quiz = app.game.quiz();
        let Some(report) = quiz.report() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled("RESULTS", palette.title()),
            Span::styled(format!(" · {}", quiz.theme()), palette.dim()),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let lines = match &report {
            Report::Solo(solo) => vec![
                Line::from(Span::styled(
                    format!("{} / {}", solo.correct, solo.total),
                    palette.title(),
                )),
                Line::from(Span::styled(
                    format!("{}% known", solo.percentage),
                    palette.bold(),
                )),
                Line::raw(""),
                Line::from(Span::styled(solo.performance.to_string(), palette.good())),
            ],
            Report::Duel(duel) => {
                let mut lines = vec![
                    Line::from(match &duel.verdict {
                        Verdict::Winner(name) => {
                            Span::styled(format!("🏆 {name} wins!"), palette.title())
                        }
                        Verdict::Draw => Span::styled("It's a draw!", palette.title()),
                    }),
                    Line::raw(""),
                ];
                lines.extend(duel.standings.iter().map(|standing| {
                    let style = if standing.rank == 1 {
                        palette.good()
                    } else {
                        palette.bold()
                    };
                    Line::from(vec![
                        Span::styled(format!("#{} ", standing.rank), palette.dim()),
                        Span::styled(standing.name.clone(), style),
                        Span::styled(
                            format!("  {} pts ({}%)", standing.score, standing.percentage),
                            palette.dim(),
                        ),
                    ])
                }));
                lines
            }
        };
        Paragraph::new(pad_to_center(lines, chunks[1].height))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let legend = if Browser::is_available() {
            "(p)lay again / (r)estart / (t)weet / (f2) settings / (esc)ape"
        } else {
            "(p)lay again / (r)estart / (f2) settings / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, palette.legend())).render(chunks[2], buf);
    }
}

/// Helper to construct the appropriate screen for the current stage
pub fn current_screen(stage: Stage) -> Box<dyn Screen> {
    match stage {
        Stage::Input => Box::new(InputScreen),
        Stage::ModeSelect => Box::new(ModeScreen),
        Stage::Playing => Box::new(PlayingScreen),
        Stage::Finished => Box::new(ResultsScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{Duel, Player};

    fn duel() -> GameMode {
        GameMode::Duel(Duel {
            players: vec![
                Player::new("Ana").unwrap(),
                Player::new("Bo").unwrap(),
            ],
            turn_based: false,
            current_player: 0,
        })
    }

    #[test]
    fn feedback_names_the_credited_player() {
        let resolution = Resolution {
            word_index: 0,
            outcome: Outcome::CorrectBy(1),
            timed_out: false,
        };
        assert_eq!(feedback(resolution, &duel()), ("Bo knew it!".to_string(), true));
    }

    #[test]
    fn feedback_for_timeout_wins_over_outcome() {
        let resolution = Resolution {
            word_index: 0,
            outcome: Outcome::NobodyCorrect,
            timed_out: true,
        };
        assert_eq!(feedback(resolution, &duel()), ("Time's up!".to_string(), false));
    }
}

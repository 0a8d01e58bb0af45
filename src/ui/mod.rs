use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Popup, BOARD_COLS, BOARD_ROWS};
use crate::game::{Phase, Player};
use crate::theme::Theme;

// Palette chosen once at startup (config overrides applied in main)
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn inactive() -> Color { theme().inactive }

const CARD_WIDTH: u16 = 7;
const CARD_HEIGHT: u16 = 3;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Scores
            Constraint::Min(BOARD_ROWS as u16 * CARD_HEIGHT + 2), // Board
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_scores(f, app, chunks[1]);
    draw_board(f, app, chunks[2]);
    draw_footer(f, chunks[3]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
        Popup::GameOver => draw_game_over(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        // Mismatch hold reads as a miss, everything else as plain feedback
        let color = if app.holding() { danger() } else { warning() };
        Line::from(Span::styled(status.clone(), Style::default().fg(color)))
    } else if app.game.phase() == Phase::Won {
        Line::from(Span::styled("Game over", Style::default().fg(success())))
    } else {
        let name = app.player_name(app.game.current_player());
        Line::from(vec![
            Span::styled("Turn: ", Style::default().fg(text_dim())),
            Span::styled(name.to_string(), Style::default().fg(text())),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_scores(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Score ", Style::default().fg(inactive())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let current = app.game.current_player();
    let entry = |player: Player| -> Vec<Span> {
        let active = player == current;
        let marker = if active { "● " } else { "  " };
        let style = if active {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_dim())
        };
        vec![
            Span::styled(marker, style),
            Span::styled(
                format!("{}: {}", app.player_name(player), app.game.score(player)),
                style,
            ),
        ]
    };

    let mut spans = entry(Player::One);
    spans.push(Span::styled("   │   ", Style::default().fg(inactive())));
    spans.extend(entry(Player::Two));

    let scores = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(scores, area);
}

fn draw_board(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " kioku ",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cells = card_grid(inner);

    for (i, cell) in cells.iter().enumerate().take(app.game.card_count()) {
        if cell.width == 0 || cell.height == 0 {
            continue;
        }

        let face_up = app.game.is_face_up(i);
        let matched = app.game.is_matched(i);
        let under_cursor = i == app.cursor && app.popup == Popup::None;

        let border_color = if under_cursor {
            accent()
        } else if matched {
            success()
        } else {
            inactive()
        };

        let face_style = if matched {
            Style::default().fg(success()).add_modifier(Modifier::DIM)
        } else if face_up {
            Style::default().fg(text()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_dim())
        };

        let mut cell_style = Style::default();
        if under_cursor {
            cell_style = cell_style.bg(bg_selected());
        }

        let face = if face_up {
            app.game.symbol_at(i).to_string()
        } else {
            "?".to_string()
        };

        let card = Paragraph::new(Line::from(Span::styled(face, face_style)))
            .alignment(Alignment::Center)
            .style(cell_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        f.render_widget(card, *cell);
    }

    // Remember where the cards landed so clicks can find them
    app.card_areas = cells;
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints: [(&str, &str); 5] = [
        ("←↓↑→", "Move"),
        ("Space", "Flip"),
        ("n", "New"),
        ("?", "Help"),
        ("q", "Quit"),
    ];

    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Playing ═══",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ↑↓←→ hjkl ", Style::default().fg(accent())),
            Span::raw("Move the cursor across the board"),
        ]),
        Line::from(vec![
            Span::styled("  Space/Enter ", Style::default().fg(accent())),
            Span::raw("Flip the card under the cursor"),
        ]),
        Line::from(vec![
            Span::styled("  Mouse click ", Style::default().fg(accent())),
            Span::raw("Flip the card under the pointer"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Rules ═══",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from("  Every symbol hides on exactly two cards."),
        Line::from("  Match a pair: score a point and keep the turn."),
        Line::from("  Miss: the cards flip back and the turn passes."),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Game ═══",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  n ", Style::default().fg(accent())),
            Span::raw("Reshuffle and start over"),
        ]),
        Line::from(vec![
            Span::styled("  q ", Style::default().fg(accent())),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(Span::styled(" Help ", Style::default().fg(accent())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    );

    f.render_widget(help, popup_area);
}

fn draw_game_over(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(44, 28, f.area());

    f.render_widget(Clear, popup_area);

    let winner = app.game.winner();
    let announcement = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} wins the game!", app.player_name(winner)),
            Style::default().fg(success()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} {}  —  {} {}",
                app.player_name(Player::One),
                app.game.score(Player::One),
                app.player_name(Player::Two),
                app.game.score(Player::Two),
            ),
            Style::default().fg(text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(" Play again   ", Style::default().fg(text_dim())),
            Span::styled("q", Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
            Span::styled(" Quit", Style::default().fg(text_dim())),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Game Over ", Style::default().fg(success())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(success())),
    );

    f.render_widget(announcement, popup_area);
}

/// Screen rects for the card cells, centered as a grid inside `area`.
fn card_grid(area: Rect) -> Vec<Rect> {
    let grid_w = BOARD_COLS as u16 * CARD_WIDTH;
    let grid_h = BOARD_ROWS as u16 * CARD_HEIGHT;
    let x0 = area.x + area.width.saturating_sub(grid_w) / 2;
    let y0 = area.y + area.height.saturating_sub(grid_h) / 2;

    let mut cells = Vec::with_capacity(BOARD_COLS * BOARD_ROWS);
    for row in 0..BOARD_ROWS as u16 {
        for col in 0..BOARD_COLS as u16 {
            let cell = Rect::new(
                x0 + col * CARD_WIDTH,
                y0 + row * CARD_HEIGHT,
                CARD_WIDTH,
                CARD_HEIGHT,
            );
            // Cards that don't fit the terminal are clipped to nothing
            cells.push(cell.intersection(area));
        }
    }
    cells
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

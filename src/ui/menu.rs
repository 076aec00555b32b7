use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::DeathReason;
use crate::score::HighScores;

/// Draws the pause screen with the high-score table as a centered popup.
pub fn render_pause_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    high_scores: Option<&HighScores>,
) {
    let popup = centered_popup(area, 60, 80);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("PAUSED").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
    ];
    lines.extend(high_score_lines(high_scores));
    lines.push(Line::from(""));
    lines.push(Line::from("[P]/[Esc] Resume   [R] Restart   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen with the high-score table as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    level: u32,
    death_reason: Option<DeathReason>,
    high_scores: Option<&HighScores>,
) {
    let popup = centered_popup(area, 60, 80);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}   Level: {level}")),
        Line::from(match death_reason {
            Some(DeathReason::Obstacle) => "Cause: hit a rock",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
    ];

    lines.extend(high_score_lines(high_scores));
    lines.push(Line::from(""));
    lines.push(Line::from("[R]/[Enter] Play Again   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn high_score_lines(high_scores: Option<&HighScores>) -> Vec<Line<'static>> {
    let Some(table) = high_scores else {
        return Vec::new();
    };
    if table.entries().is_empty() {
        return vec![Line::from("No high scores yet")];
    }

    let mut lines = vec![Line::from("High scores").style(Style::default().fg(Color::Yellow))];
    for (rank, entry) in table.entries().iter().enumerate() {
        lines.push(Line::from(format!(
            "{:>2}. {:>6}  lvl {:>2}  {}",
            rank + 1,
            entry.score,
            entry.level,
            entry.recorded_date()
        )));
    }
    lines
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::FRAMES_PER_SECOND;
use crate::snapshot::{EffectDurations, GameSnapshot};

const SEPARATOR: &str = " │ ";

/// Renders the two HUD rows under the field and returns the area above them.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    high_score: u32,
    boost: bool,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot, high_score))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(&snapshot.effects, boost))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn score_line(snapshot: &GameSnapshot, high_score: u32) -> Line<'static> {
    let value = Style::default().fg(Color::White);
    let mut spans = vec![
        Span::raw("Length: "),
        Span::styled(snapshot.body.len().to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Level: "),
        Span::styled(snapshot.level.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Score: "),
        Span::styled(snapshot.score.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Hi: "),
        Span::styled(high_score.max(snapshot.score).to_string(), value),
    ];

    if snapshot.combo > 0 {
        spans.insert(
            0,
            Span::styled(
                format!("COMBO x{}!", snapshot.combo_multiplier()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        spans.insert(1, Span::raw(SEPARATOR));
    }

    Line::from(spans)
}

fn status_line(effects: &EffectDurations, boost: bool) -> Line<'static> {
    let timers = [
        (effects.speed_boost, "Speed", Color::Green),
        (effects.slowdown, "Slow", Color::Red),
        (effects.invincible, "Invincible", Color::Yellow),
        (effects.reverse_controls, "Reversed", Color::Magenta),
        (effects.freeze, "Frozen", Color::Cyan),
    ];

    let mut spans = Vec::new();
    for (frames, label, color) in timers.into_iter().filter(|(frames, ..)| *frames > 0) {
        if !spans.is_empty() {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::styled(
            format!("{label} {}", format_seconds(frames)),
            Style::default().fg(color),
        ));
    }

    if boost {
        if !spans.is_empty() {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::styled("Boost", Style::default().fg(Color::LightGreen)));
    }

    Line::from(spans)
}

/// Formats a frame count as seconds with one decimal.
fn format_seconds(frames: u32) -> String {
    let tenths = u64::from(frames) * 10 / FRAMES_PER_SECOND;
    format!("{}.{}s", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::format_seconds;

    #[test]
    fn frames_format_as_seconds() {
        assert_eq!(format_seconds(300), "5.0s");
        assert_eq!(format_seconds(30), "0.5s");
        assert_eq!(format_seconds(1), "0.0s");
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::collectible::CollectibleKind;
use crate::grid::{GridSize, Position, footprint_2x2};
use crate::input::Direction;
use crate::score::HighScores;
use crate::snapshot::{CollectibleView, GameSnapshot};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_SNAKE_TAIL: &str = "▓";
const GLYPH_OBSTACLE: &str = "▒";

/// Supplemental values the front-end passes alongside each snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// `None` when high scores are disabled.
    pub high_scores: Option<&'a HighScores>,
    pub boost: bool,
}

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, info: &HudInfo<'_>) {
    let high_score = info.high_scores.map_or(0, HighScores::top_score);
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, high_score, info.boost);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::White).bg(Color::DarkGray));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_obstacles(frame, inner, snapshot);
    render_collectibles(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    if snapshot.game_over {
        render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            snapshot.level,
            snapshot.death_reason,
            info.high_scores,
        );
    } else if snapshot.paused {
        render_pause_menu(frame, play_area, info.high_scores);
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot) {
    let style = Style::new().fg(Color::Gray);
    let buffer = frame.buffer_mut();

    for block in &snapshot.obstacles {
        for cell in footprint_2x2(*block) {
            if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, cell) {
                buffer.set_string(x, y, GLYPH_OBSTACLE, style);
            }
        }
    }
}

fn render_collectibles(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot) {
    let buffer = frame.buffer_mut();

    for item in snapshot.collectibles.iter().filter(|item| item.active) {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, item.position) else {
            continue;
        };
        let (glyph, color) = collectible_glyph(item);
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }
}

fn collectible_glyph(item: &CollectibleView) -> (&'static str, Color) {
    match item.kind {
        CollectibleKind::Food => ("●", Color::Red),
        CollectibleKind::Bonus => ("♦", Color::Green),
        CollectibleKind::Debuff => ("✱", Color::Magenta),
        CollectibleKind::Strawberry => ("♥", Color::LightRed),
        CollectibleKind::Diamond => ("◆", Color::Cyan),
        CollectibleKind::Star => ("★", Color::Yellow),
        CollectibleKind::Mushroom => ("♣", Color::LightMagenta),
        CollectibleKind::Ice => ("■", Color::LightCyan),
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot) {
    let invincible = snapshot.effects.invincible > 0;
    // Blink while invincible: hidden for 5 of every 10 frames.
    if invincible && snapshot.effects.invincible % 10 < 5 {
        return;
    }

    let body_color = if invincible { Color::Yellow } else { Color::Blue };
    let last = snapshot.body.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    for (index, segment) in snapshot.body.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(snapshot.heading),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(Color::DarkGray))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(body_color))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::grid::{GridSize, Position};

    use super::logical_to_terminal;

    #[test]
    fn cells_outside_grid_or_viewport_are_skipped() {
        let inner = Rect::new(1, 1, 10, 5);
        let bounds = GridSize {
            width: 20,
            height: 20,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(9, 4)),
            Some((10, 5))
        );
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(10, 0)), None);
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(-1, 0)), None);
    }
}

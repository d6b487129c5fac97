//! Heart die tab.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use momentos_core::dice::{face_label, pips};
use momentos_core::{DiceTransform, Session};

use super::Tab;

/// How often the tumbling die shows a new face.
const TUMBLE_FRAME: Duration = Duration::from_millis(90);

/// Dice tab state.
#[derive(Debug, Default)]
pub struct DiceTab {
    rolled_at: Option<Instant>,
}

impl DiceTab {
    /// Create the tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw the die if it is at rest.
    pub fn roll(&mut self, session: &mut Session, now: Instant) {
        if session.roll(now).is_some() {
            self.rolled_at = Some(now);
        }
    }

    /// Face drawn at `now`: a cycling face while tumbling, the committed
    /// face otherwise.
    fn shown_face(&self, session: &Session, now: Instant) -> u32 {
        match self.rolled_at {
            Some(at) if session.dice().is_rolling => {
                let frame = now.saturating_duration_since(at).as_millis() / TUMBLE_FRAME.as_millis();
                (frame % 6) as u32 + 1
            }
            _ => session.dice().current_face,
        }
    }
}

/// Three text rows drawing a face's pips on a 3x3 grid.
fn face_rows(face: u32) -> [String; 3] {
    let mut grid = [[false; 3]; 3];
    for pip in pips(face) {
        let (row, col) = pip.cell();
        grid[row][col] = true;
    }
    grid.map(|row| {
        row.iter()
            .map(|&on| if on { " \u{2665} " } else { "   " })
            .collect()
    })
}

fn transform_line(transform: DiceTransform) -> Line<'static> {
    Line::from(Span::styled(
        transform.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

impl Tab for DiceTab {
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session, now: Instant) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.roll(session, now);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &Session, now: Instant) {
        let block = Block::default()
            .title(" Dado ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 8 || inner.width < 20 {
            return;
        }

        let dice = session.dice();
        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(""));
        lines.push(Line::from("\u{250c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2510}"));
        for row in face_rows(self.shown_face(session, now)) {
            lines.push(Line::from(vec![
                Span::raw("\u{2502}"),
                Span::styled(row, Style::default().fg(Color::Red).bold()),
                Span::raw("\u{2502}"),
            ]));
        }
        lines.push(Line::from("\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2518}"));
        lines.push(Line::from(""));

        if dice.is_rolling {
            lines.push(Line::from(Span::styled(
                "LANÇANDO...",
                Style::default().fg(Color::DarkGray).italic(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                face_label(dice.current_face),
                Style::default().fg(Color::Red).bold(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter / Espaço para lançar",
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
        lines.push(transform_line(dice.transform));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn status_hint(&self) -> &str {
        "Enter/Space:lançar  1-3/Tab:aba  p:play  n/b:faixa  m:mudo  [/]:volume  ?:ajuda  q:sair"
    }
}

//! Roulette of moments tab.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};

use momentos_core::roulette::{SECTION_DEGREES, SPIN_SETTLE, section_index};
use momentos_core::{SECTIONS, Session};

use super::Tab;

/// A wheel animation from one cumulative rotation to another.
#[derive(Debug, Clone, Copy)]
struct SpinAnimation {
    from: u64,
    to: u64,
    started: Instant,
}

impl SpinAnimation {
    /// Rotation shown at `now`, easing out toward the target.
    fn angle_at(&self, now: Instant) -> f64 {
        let t = progress(now.saturating_duration_since(self.started), SPIN_SETTLE);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from as f64 + (self.to - self.from) as f64 * eased
    }
}

fn progress(elapsed: Duration, total: Duration) -> f64 {
    (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0)
}

/// Roulette tab state.
#[derive(Debug, Default)]
pub struct RouletteTab {
    animation: Option<SpinAnimation>,
}

impl RouletteTab {
    /// Create the tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start spinning if the wheel is at rest.
    pub fn spin(&mut self, session: &mut Session, now: Instant) {
        let from = session.roulette().cumulative_degrees;
        if let Some(plan) = session.spin(now) {
            self.animation = Some(SpinAnimation {
                from,
                to: plan.target_degrees,
                started: now,
            });
        }
    }

    /// Rotation to draw at `now`.
    fn displayed_angle(&self, session: &Session, now: Instant) -> f64 {
        match &self.animation {
            Some(anim) if session.roulette().is_spinning => anim.angle_at(now),
            _ => session.roulette().cumulative_degrees as f64,
        }
    }

    fn draw_wheel(&self, frame: &mut Frame, area: Rect, angle: f64) {
        let rotation = angle % 360.0;
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .title(" Roleta ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .marker(Marker::Braille)
            .x_bounds([-1.3, 1.3])
            .y_bounds([-1.3, 1.3])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: Color::White,
                });
                for (i, section) in SECTIONS.iter().enumerate() {
                    // Clockwise from the top, in screen terms.
                    let center = i as f64 * SECTION_DEGREES as f64 + rotation;
                    let edge = center - SECTION_DEGREES as f64 / 2.0;
                    let (ex, ey) = polar(edge, 1.0);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: ex,
                        y2: ey,
                        color: Color::DarkGray,
                    });
                    let (cx, cy) = polar(center, 0.72);
                    let (mark, color) = if section.is_good {
                        ("\u{2665}", Color::Magenta)
                    } else {
                        ("\u{2717}", Color::Red)
                    };
                    ctx.print(cx, cy, Span::styled(mark, Style::default().fg(color)));
                }
                ctx.print(
                    0.0,
                    1.18,
                    Span::styled("\u{25bc}", Style::default().fg(Color::Red).bold()),
                );
            });
        frame.render_widget(canvas, area);
    }

    fn draw_sections(&self, frame: &mut Frame, area: Rect, session: &Session, angle: f64) {
        let roulette = session.roulette();
        let under_pointer = section_index(angle.floor() as u64);

        let mut lines: Vec<Line<'static>> = SECTIONS
            .iter()
            .enumerate()
            .map(|(i, section)| {
                let color = if section.is_good { Color::Magenta } else { Color::Red };
                let pointer = if i == under_pointer { "\u{25b6} " } else { "  " };
                let mut style = Style::default().fg(color);
                if i == under_pointer {
                    style = style.bold().reversed();
                }
                Line::from(vec![
                    Span::styled(pointer, Style::default().fg(Color::Red)),
                    Span::styled(format!("{:>2}. {}", i + 1, section.text), style),
                ])
            })
            .collect();
        lines.push(Line::from(""));

        if roulette.is_spinning {
            lines.push(Line::from(Span::styled(
                "Rodando...",
                Style::default().fg(Color::DarkGray).italic(),
            )));
        } else if let Some(res) = &roulette.last_result {
            let (caption, color) = if res.section.is_good {
                ("Momento Mágico", Color::Magenta)
            } else {
                ("Que Chatice", Color::Red)
            };
            lines.push(Line::from(Span::styled(
                res.section.text,
                Style::default().fg(color).bold(),
            )));
            lines.push(Line::from(Span::styled(
                caption.to_uppercase(),
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter / Espaço para sortear",
                Style::default().fg(Color::Green),
            )));
        }

        let block = Block::default()
            .title(" Momentos ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Point on a circle of `radius` at `degrees` clockwise from the top.
fn polar(degrees: f64, radius: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (radius * rad.sin(), radius * rad.cos())
}

impl Tab for RouletteTab {
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session, now: Instant) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.spin(session, now);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &Session, now: Instant) {
        let angle = self.displayed_angle(session, now);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        self.draw_wheel(frame, chunks[0], angle);
        self.draw_sections(frame, chunks[1], session, angle);
    }

    fn status_hint(&self) -> &str {
        "Enter/Space:sortear  1-3/Tab:aba  p:play  n/b:faixa  m:mudo  [/]:volume  ?:ajuda  q:sair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentos_core::ScriptedSource;
    use ratatui::backend::TestBackend;

    fn render(tab: &RouletteTab, session: &Session, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| tab.draw(frame, frame.area(), session, now))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn animation_eases_to_target() {
        let start = Instant::now();
        let anim = SpinAnimation {
            from: 0,
            to: 1800,
            started: start,
        };
        assert_eq!(anim.angle_at(start), 0.0);
        let mid = anim.angle_at(start + Duration::from_millis(2000));
        assert!(mid > 900.0 && mid < 1800.0);
        assert_eq!(anim.angle_at(start + SPIN_SETTLE), 1800.0);
        assert_eq!(anim.angle_at(start + Duration::from_secs(60)), 1800.0);
    }

    #[test]
    fn polar_top_is_up() {
        let (x, y) = polar(0.0, 1.0);
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
        let (x, y) = polar(90.0, 1.0);
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn spin_key_starts_animation() {
        let mut session = Session::default().with_rng(ScriptedSource::new([0]));
        let mut tab = RouletteTab::new();
        let now = Instant::now();
        tab.handle_key(KeyEvent::from(KeyCode::Enter), &mut session, now);
        assert!(session.roulette().is_spinning);
        assert_eq!(tab.displayed_angle(&session, now), 0.0);
        assert!(render(&tab, &session, now).contains("Rodando..."));
    }

    #[test]
    fn shows_result_after_settle() {
        let mut session = Session::default().with_rng(ScriptedSource::new([0]));
        let mut tab = RouletteTab::new();
        let now = Instant::now();
        tab.spin(&mut session, now);
        session.advance(now + SPIN_SETTLE);
        let screen = render(&tab, &session, now + SPIN_SETTLE);
        assert!(screen.contains("QUE CHATICE"));
        assert!(screen.contains("Choveu"));
    }

    #[test]
    fn idle_prompt() {
        let session = Session::default();
        let screen = render(&RouletteTab::new(), &session, Instant::now());
        assert!(screen.contains("para sortear"));
        assert!(screen.contains("Momento incr"));
    }
}

//! Shared drawing helpers: music header, layout helpers and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use momentos_core::{Playback, VolumeLevel};

/// Width of the volume meter in cells.
const METER_WIDTH: usize = 10;

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

/// Text meter for a volume in `0.0..=1.0`.
pub fn volume_meter(volume: f32) -> String {
    let filled = ((volume.clamp(0.0, 1.0) * METER_WIDTH as f32).round() as usize).min(METER_WIDTH);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(METER_WIDTH - filled)
    )
}

fn volume_icon(level: VolumeLevel) -> &'static str {
    match level {
        VolumeLevel::Muted => "\u{1f507}",
        VolumeLevel::Low => "\u{1f509}",
        VolumeLevel::High => "\u{1f50a}",
    }
}

/// Draw the music transport header.
pub fn draw_header(frame: &mut Frame, playback: &Playback, area: Rect) {
    let state = playback.state();
    let track = playback.current_track();
    let play = if state.is_playing { "\u{23f8}" } else { "\u{25b6}" };

    let line = Line::from(vec![
        Span::styled(" TTT ", Style::default().fg(Color::Magenta).bold()),
        Span::styled("\u{23ee} ", Style::default().fg(Color::Magenta)),
        Span::styled(play, Style::default().fg(Color::White).bold()),
        Span::styled(" \u{23ed}", Style::default().fg(Color::Magenta)),
        Span::styled("  \u{2502}  ", Style::default().fg(Color::DarkGray)),
        Span::raw(volume_icon(state.volume_level())),
        Span::raw(" "),
        Span::styled(volume_meter(state.volume), Style::default().fg(Color::Magenta)),
        Span::styled(
            format!(" {:>3}%", (state.volume * 100.0).round() as u32),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("  \u{2502}  ", Style::default().fg(Color::DarkGray)),
        Span::styled("MUSICA ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} / {}", track.id, playback.tracks().len()),
            Style::default().fg(Color::Magenta).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Atalhos").style(Style::default().bold()),
        Line::from(""),
        Line::from("Abas:"),
        Line::from("  1-3 / Tab   Trocar de aba"),
        Line::from(""),
        Line::from("Roleta / Dado:"),
        Line::from("  Enter/Espaço  Sortear / lançar"),
        Line::from(""),
        Line::from("Pontuação:"),
        Line::from("  \u{2190}/\u{2192} h/l   Jogador"),
        Line::from("  \u{2191}/\u{2193} k/j   Amarelo / verde"),
        Line::from("  + / -       Somar / subtrair"),
        Line::from(""),
        Line::from("Música:"),
        Line::from("  p           Tocar / pausar"),
        Line::from("  n / b       Próxima / anterior"),
        Line::from("  m           Mudo"),
        Line::from("  [ / ]       Volume -/+"),
        Line::from(""),
        Line::from("  ?           Mostrar esta ajuda"),
        Line::from("  q / Ctrl+C  Sair"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Ajuda ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::style;
use crate::app::{App, BITRATES};
use crate::extract::AudioFormat;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(4), // Input / output paths
        Constraint::Length(9), // Format selector
        Constraint::Length(7), // Bitrate selector
        Constraint::Min(2),    // Spacer
        Constraint::Length(3), // Help
    ])
    .split(area);

    // Title
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled("┌─", style::border_style()),
        Span::styled(" OUTPUT SETTINGS ", style::title_style()),
        Span::styled(
            "─".repeat((area.width as usize).saturating_sub(22)),
            style::border_style(),
        ),
        Span::styled("┐", style::border_style()),
    ])]);
    frame.render_widget(title, chunks[0]);

    // Paths
    let input_display = app
        .input_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let output_display = app
        .derived_output()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let paths = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  Input:  ", style::muted_style()),
            Span::styled(input_display, style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("  Output: ", style::muted_style()),
            Span::styled(output_display, style::normal_style()),
        ]),
    ]);
    frame.render_widget(paths, chunks[1]);

    // Format selector
    let mut format_lines = vec![
        Line::from(vec![
            Span::styled("  FORMAT ", style::title_style()),
            Span::styled("(←/→)", style::muted_style()),
        ]),
        Line::from(""),
    ];
    for (i, format) in AudioFormat::ALL.iter().enumerate() {
        let selected = i == app.format_index;
        let marker = if selected { "  ▶ " } else { "    " };
        let line_style = if selected {
            style::highlight_style()
        } else {
            style::normal_style()
        };
        format_lines.push(Line::from(vec![
            Span::styled(marker, style::key_style()),
            Span::styled(format!("{:<28}", format.label()), line_style),
        ]));
    }
    let formats = Paragraph::new(format_lines).block(Block::default().borders(Borders::NONE));
    frame.render_widget(formats, chunks[2]);

    // Bitrate selector, disabled for lossless formats
    let lossless = app.selected_format().is_lossless();
    let mut bitrate_lines = vec![
        Line::from(vec![
            Span::styled("  QUALITY ", style::title_style()),
            Span::styled("(↑/↓)", style::muted_style()),
        ]),
        Line::from(""),
    ];
    if lossless {
        bitrate_lines.push(Line::from(vec![Span::styled(
            "    lossless format - bitrate not applicable",
            style::muted_style(),
        )]));
    } else {
        for (i, (rate, label)) in BITRATES.iter().enumerate() {
            let selected = i == app.bitrate_index;
            let marker = if selected { "  ▶ " } else { "    " };
            let line_style = if selected {
                style::highlight_style()
            } else {
                style::normal_style()
            };
            bitrate_lines.push(Line::from(vec![
                Span::styled(marker, style::key_style()),
                Span::styled(format!("{:<6} ({})", rate, label), line_style),
            ]));
        }
    }
    let bitrates = Paragraph::new(bitrate_lines).block(Block::default().borders(Borders::NONE));
    frame.render_widget(bitrates, chunks[3]);

    // Error (e.g. ffmpeg missing)
    if let Some(error) = &app.error_message {
        let error_widget = Paragraph::new(vec![Line::from(vec![
            Span::styled("⚠ ", style::error_style()),
            Span::styled(error.as_str(), style::error_style()),
        ])])
        .alignment(Alignment::Center);
        frame.render_widget(error_widget, chunks[4]);
    }

    // Help
    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled("  Enter", style::key_style()),
        Span::styled(" start extraction  •  ", style::muted_style()),
        Span::styled("Esc", style::key_style()),
        Span::styled(" back to file picker", style::muted_style()),
    ])]);
    frame.render_widget(help, chunks[5]);
}

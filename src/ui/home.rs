use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::style;
use crate::app::App;
use crate::extract::locator;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Create main layout
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(10),   // Content
        Constraint::Length(3), // Footer
    ])
    .split(area);

    // Title
    let title = Paragraph::new(vec![
        Line::from(vec![Span::styled(
            "╔═══════════════════════════════════════════════════╗",
            style::title_style(),
        )]),
        Line::from(vec![
            Span::styled("║            ", style::title_style()),
            Span::styled(
                "🎵 AUDIOSIFT",
                Style::default()
                    .fg(style::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  •  ", style::muted_style()),
            Span::styled("Audio Extractor", style::subtitle_style()),
            Span::styled("           ║", style::title_style()),
        ]),
        Line::from(vec![Span::styled(
            "╚═══════════════════════════════════════════════════╝",
            style::title_style(),
        )]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Main content
    let content_chunks =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

    // Left panel - Workflow
    let workflow = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ┌─", style::muted_style()),
            Span::styled(" WORKFLOW ", style::title_style()),
            Span::styled("─────────────────┐", style::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("    1. ", style::key_style()),
            Span::styled("Select Video File", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("       └─ ", style::muted_style()),
            Span::styled("MP4, MKV, AVI, MOV...", style::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("    2. ", style::key_style()),
            Span::styled("Pick Format & Quality", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("       └─ ", style::muted_style()),
            Span::styled("MP3, WAV, OGG, M4A, FLAC, AIFF", style::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("    3. ", style::key_style()),
            Span::styled("Extract Audio", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("       └─ ", style::muted_style()),
            Span::styled("FFmpeg with live progress", style::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  └──────────────────────────────┘",
            style::muted_style(),
        )]),
    ])
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(workflow, content_chunks[0]);

    // Right panel - Controls and encoder status
    let mut controls = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ┌─", style::muted_style()),
            Span::styled(" CONTROLS ", style::title_style()),
            Span::styled("─────────────────┐", style::muted_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("    Enter ", style::key_style()),
            Span::styled("Start / select", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("    ↑↓←→  ", style::key_style()),
            Span::styled("Navigate", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("    Esc   ", style::key_style()),
            Span::styled("Back / cancel", style::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("    Q     ", style::key_style()),
            Span::styled("Quit", style::normal_style()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  └──────────────────────────────┘",
            style::muted_style(),
        )]),
        Line::from(""),
    ];

    if app.ffmpeg_available {
        controls.push(Line::from(vec![
            Span::styled("    ● ", style::success_style()),
            Span::styled("FFmpeg detected", style::subtitle_style()),
        ]));
    } else {
        controls.push(Line::from(vec![
            Span::styled("    ⚠ ", style::error_style()),
            Span::styled("FFmpeg not found", style::error_style()),
        ]));
        controls.push(Line::from(vec![
            Span::styled("      ", style::muted_style()),
            Span::styled(locator::install_hint(), style::muted_style()),
        ]));
    }

    let controls =
        Paragraph::new(controls).block(Block::default().borders(Borders::NONE));
    frame.render_widget(controls, content_chunks[1]);

    // Footer
    let footer = Paragraph::new(vec![Line::from(vec![
        Span::styled("Press ", style::muted_style()),
        Span::styled("Enter", style::key_style()),
        Span::styled(" to select a video  •  ", style::muted_style()),
        Span::styled("Q", style::key_style()),
        Span::styled(" to quit", style::muted_style()),
    ])])
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::App;
use crate::composer::ComposerPhase;
use crate::domain::{ExampleCategory, FeedbackLine, FeedbackResult};

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_composer(app, frame, main[0]);
    render_feed(app, frame, main[1]);
    render_footer(app, frame, chunks[2]);

    if app.composer().view().visible
        && let Some(feedback) = app.composer().feedback()
    {
        render_feedback_popup(app, feedback, frame, chunks[1]);
    }

    if app.show_help {
        render_help_overlay(frame, chunks[1]);
    }
}

fn phase_label(phase: ComposerPhase) -> (&'static str, Color) {
    match phase {
        ComposerPhase::Idle => ("Idle", Color::DarkGray),
        ComposerPhase::Editing => ("Editing", Color::Yellow),
        ComposerPhase::Reviewing => ("Policy alert", Color::Red),
        ComposerPhase::Acknowledged => ("Alert acknowledged", Color::Magenta),
        ComposerPhase::ClearToPost => ("Ready to post", Color::Green),
    }
}

/// Render the header bar
fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let composer = app.composer();
    let (phase_text, phase_color) = phase_label(composer.phase());

    let mut spans = vec![
        Span::styled("Contento ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(phase_text, Style::default().fg(phase_color)),
    ];
    if composer.analysis().is_analyzing {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{} Analyzing...", app.spinner()),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{} posted", app.feed().len()),
        Style::default().fg(Color::Blue),
    ));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(header, area);
}

/// Render the editor, the example buttons and the inline feedback summary
fn render_composer(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3), Constraint::Length(6)])
        .split(area);

    let composer = app.composer();
    let text = if composer.text().is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "What do you want to talk about?",
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new(format!("{}▏", composer.text()))
    };
    frame.render_widget(
        text.block(Block::default().borders(Borders::ALL).title(" Compose "))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    render_examples_bar(app, frame, chunks[1]);
    render_feedback_summary(app, frame, chunks[2]);
}

fn render_examples_bar(app: &App, frame: &mut Frame, area: Rect) {
    let composer = app.composer();
    let enabled = composer.examples().is_some() && !composer.is_loading_examples();
    let key_style = if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = Vec::new();
    for (i, category) in ExampleCategory::ALL.iter().enumerate() {
        spans.push(Span::styled(format!(" F{}", i + 1), key_style));
        spans.push(Span::raw(format!(" {} ", category.label())));
    }
    if composer.is_loading_examples() {
        spans.push(Span::styled(
            format!(" {} loading", app.spinner()),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(" F5", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(" Refresh "));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Examples "));
    frame.render_widget(bar, area);
}

fn suggestion_lines(feedback: &FeedbackResult) -> Vec<Line<'_>> {
    feedback
        .suggestion_lines()
        .iter()
        .map(|line| match line {
            FeedbackLine::Bullet(text) => Line::from(vec![Span::styled("• ", Style::default().fg(Color::Cyan)), Span::raw(text.as_str())]),
            FeedbackLine::Paragraph(text) => Line::from(text.as_str()),
        })
        .collect()
}

fn render_feedback_summary(app: &App, frame: &mut Frame, area: Rect) {
    let composer = app.composer();
    let lines = match composer.feedback() {
        _ if composer.analysis().is_analyzing => vec![Line::from(Span::styled(
            format!("{} Analyzing...", app.spinner()),
            Style::default().fg(Color::Yellow),
        ))],
        None => vec![Line::from(Span::styled(
            "Feedback appears when you pause typing",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(feedback) if feedback.is_policy_alert() => vec![
            Line::from(Span::styled(
                format!("⚠ {}", feedback.alert_sentence()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Ctrl+F to review", Style::default().fg(Color::DarkGray))),
        ],
        Some(feedback) => suggestion_lines(feedback),
    };

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Feedback "))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, area);
}

/// Render the published feed, newest first
fn render_feed(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .feed()
        .iter()
        .map(|post| {
            let mut header = vec![Span::styled(
                post.published_at.format("%H:%M:%S").to_string(),
                Style::default().fg(Color::DarkGray),
            )];
            if post.over_alert {
                header.push(Span::styled(" ⚠", Style::default().fg(Color::Red)));
            }
            let mut lines = vec![Line::from(header)];
            lines.extend(post.text.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Feed "));
    frame.render_widget(list, area);
}

fn render_feedback_popup(app: &App, feedback: &FeedbackResult, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup_area);

    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let (title, border, lines) = if feedback.is_policy_alert() {
        let mut lines = vec![
            Line::from(Span::styled(
                feedback.alert_sentence(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if app.composer().view().show_suggestion {
            lines.push(Line::from(Span::styled(
                "Suggestion",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            lines.push(Line::from(feedback.alert_suggestion()));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("Ctrl+S", key),
            Span::raw(if app.composer().view().show_suggestion {
                " Hide suggestion  "
            } else {
                " Show suggestion  "
            }),
            Span::styled("Ctrl+E", key),
            Span::raw(" Edit  "),
            Span::styled("Ctrl+A", key),
            Span::raw(" Post anyway"),
        ]));
        (" ⚠ Policy Alert ", Color::Red, lines)
    } else {
        let mut lines = suggestion_lines(feedback);
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled("Ctrl+A", key), Span::raw(" Got it")]));
        (" Suggestions ", Color::Cyan, lines)
    };

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("{keys:<10} "), Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        entry("Ctrl+P", "Post"),
        entry("Ctrl+A", "Post anyway / Got it"),
        entry("Ctrl+E", "Edit (close feedback)"),
        entry("Ctrl+F", "Toggle feedback"),
        entry("Ctrl+S", "Toggle suggestion"),
        entry("F1-F3", "Load example"),
        entry("F5", "Refresh examples"),
        entry("F10", "Toggle help"),
        entry("Esc", "Close / Quit"),
        entry("Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(help, popup_area);
}

/// Render the footer bar
fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let post_style = if app.composer().can_publish() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(" Ctrl+P", post_style),
        Span::styled(" Post ", post_style),
        Span::styled(" F10", key),
        Span::raw(" Help "),
        Span::styled(" Esc", key),
        Span::raw(" Quit "),
    ];
    if let Some(error) = app.error() {
        spans.push(Span::styled(format!(" {error}"), Style::default().fg(Color::Red)));
    } else if let Some(status) = app.status() {
        spans.push(Span::styled(format!(" {status}"), Style::default().fg(Color::Green)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

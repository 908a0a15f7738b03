use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap,
};

use crate::app::{App, Mode};
use crate::theme::{Palette, ThemeId};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let palette = app.theme.palette();
    draw_background(frame, size, &palette);

    match app.mode {
        Mode::Setup => draw_setup(frame, app, size, &palette),
        Mode::Dashboard => draw_dashboard(frame, app, size, &palette),
        Mode::ThemeSelect => {
            // Keep the underlying screen visible behind the picker.
            if app.start_date.is_some() {
                draw_dashboard(frame, app, size, &palette);
            } else {
                draw_setup(frame, app, size, &palette);
            }
            draw_theme_select(frame, app, size, &palette);
        }
    }

    if matches!(app.mode, Mode::Setup | Mode::Dashboard) && !app.show_help {
        if let Some(toast) = app.active_toast() {
            draw_toast(frame, size, &toast.message, toast.is_error, &palette);
        }
    }

    if app.show_help {
        draw_help(frame, size, &palette);
    }
}

fn draw_setup(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    draw_chrome(frame, app, area, palette);

    let block = centered_rect(60, 45, area);
    frame.render_widget(Clear, block);

    let commit_hint = if app.input_is_complete() {
        Span::styled("Press Enter to save", palette.accent_style())
    } else {
        Span::styled("Enter the full date to save", palette.muted_style())
    };

    let mut lines = vec![
        Line::from("Please select your start date:"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date (YYYY-MM-DD): ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(app.input.clone(), palette.accent_style()),
            Span::styled("▏", palette.muted_style()),
        ]),
        Line::from(""),
        Line::from(commit_hint),
        Line::from(""),
        Line::from(Span::styled(
            "Tab theme · Esc quit",
            palette.muted_style(),
        )),
    ];

    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(palette.error),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Our Couples Project", palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    draw_chrome(frame, app, area, palette);

    let block = centered_rect(60, 45, area);
    frame.render_widget(Clear, block);

    let formatted = app.formatted_start().unwrap_or_default();
    let counter = app
        .elapsed_now()
        .map(|elapsed| elapsed.to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from("We've been together since:"),
        Line::from(""),
        Line::from(Span::styled(
            formatted,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            counter,
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "Enter copy · c change date · r reset all",
            palette.muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(panel_block("Our Couples Project", palette))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, block);
}

fn draw_chrome(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let content = area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(content);

    let header = Paragraph::new(header_line(app, palette))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(palette.border_style())
                .style(Style::default().bg(palette.bg).fg(palette.text)),
        );
    frame.render_widget(header, chunks[0]);

    let footer = Paragraph::new(footer_line(app, palette))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(palette.border_style())
                .style(Style::default().bg(palette.bg).fg(palette.text)),
        );
    frame.render_widget(footer, chunks[2]);
}

fn header_line(app: &App, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("💕 Ourdays", palette.title_style()),
        Span::raw("  "),
        Span::styled("Theme", palette.muted_style()),
        Span::raw(": "),
        Span::raw(app.theme.label().to_string()),
    ])
}

fn footer_line(app: &App, palette: &Palette) -> Line<'static> {
    let hints: &[(&str, &str)] = match app.mode {
        Mode::Setup => &[("Enter", "save"), ("Tab", "theme"), ("Esc", "quit")],
        Mode::Dashboard => &[
            ("Enter", "copy"),
            ("c", "change date"),
            ("t", "theme"),
            ("r", "reset all"),
            ("h", "help"),
            ("q", "quit"),
        ],
        Mode::ThemeSelect => &[("↑↓", "choose"), ("Enter", "apply"), ("Esc", "cancel")],
    };

    let mut spans = Vec::new();
    for (index, (keycap, action)) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" · ", palette.muted_style()));
        }
        spans.push(Span::styled(
            (*keycap).to_string(),
            Style::default().fg(palette.highlight),
        ));
        spans.push(Span::styled(format!(" {action}"), palette.muted_style()));
    }
    Line::from(spans)
}

fn draw_theme_select(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    let block = centered_rect(50, 45, area);
    frame.render_widget(Clear, block);

    let items: Vec<ListItem> = ThemeId::ALL
        .iter()
        .map(|id| {
            let marker = if *id == app.theme { " (current)" } else { "" };
            let line = Line::from(vec![
                Span::raw(id.label().to_string()),
                Span::styled(marker.to_string(), palette.muted_style()),
            ]);
            ListItem::new(line).style(palette.panel_style())
        })
        .collect();

    let list = List::new(items)
        .block(panel_block("Choose Theme", palette))
        .highlight_style(palette.selection_style())
        .highlight_symbol("▍ ");

    frame.render_stateful_widget(list, block, &mut app.theme_state);
}

fn draw_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = centered_rect(60, 60, area);
    frame.render_widget(Clear, block);

    let header_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(palette.accent);
    let key_style = Style::default().fg(palette.highlight);

    let rows = vec![
        Row::new(vec![
            Cell::from(Span::styled("Setup", header_style)),
            Cell::from(""),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("type / Backspace", key_style)),
            Cell::from("Edit the start date"),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("Enter", key_style)),
            Cell::from("Save the date (needs YYYY-MM-DD)"),
        ]),
        Row::new(vec![Cell::from(""), Cell::from("")]),
        Row::new(vec![
            Cell::from(Span::styled("Dashboard", header_style)),
            Cell::from(""),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("Enter", key_style)),
            Cell::from("Copy milestone to clipboard"),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("c", key_style)),
            Cell::from("Change the start date"),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("r", key_style)),
            Cell::from("Reset date and theme"),
        ]),
        Row::new(vec![Cell::from(""), Cell::from("")]),
        Row::new(vec![
            Cell::from(Span::styled("Themes", header_style)),
            Cell::from(""),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("t / Tab", key_style)),
            Cell::from("Open theme picker"),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("↑↓ Enter", key_style)),
            Cell::from("Choose and apply"),
        ]),
        Row::new(vec![Cell::from(""), Cell::from("")]),
        Row::new(vec![
            Cell::from(Span::styled("h / Esc", key_style)),
            Cell::from("Close help"),
        ]),
        Row::new(vec![
            Cell::from(Span::styled("q", key_style)),
            Cell::from("Quit"),
        ]),
    ];

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(10)])
        .block(panel_block("Help", palette));
    frame.render_widget(table, block);
}

fn draw_toast(frame: &mut Frame, area: Rect, message: &str, is_error: bool, palette: &Palette) {
    let width = (message.len() as u16 + 6).clamp(20, area.width.saturating_sub(2));
    let height = 3;
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + area.height.saturating_sub(height + 4);
    let rect = Rect::new(x, y, width, height);

    frame.render_widget(Clear, rect);
    let style = if is_error {
        Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.success)
            .add_modifier(Modifier::BOLD)
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .alignment(Alignment::Center)
        .block(panel_block("Note", palette));
    frame.render_widget(paragraph, rect);
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
    let vertical = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    vertical[1]
}

fn draw_background(frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default().style(Style::default().bg(palette.bg).fg(palette.text));
    frame.render_widget(block, area);
}

fn panel_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
        .style(palette.panel_style())
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            palette.title_style(),
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 45, parent);
        assert!(rect.x >= parent.x);
        assert!(rect.y >= parent.y);
        assert!(rect.right() <= parent.right());
        assert!(rect.bottom() <= parent.bottom());
    }
}

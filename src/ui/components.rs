//! Reusable UI component helpers
//!
//! Calculator cards, badges and banner lines shared by several pages.

use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Row, Table},
};

use crate::banner::BannerMessage;
use crate::catalog::{Calculator, Catalog};
use crate::theme::Theme;

/// Bordered block whose title and border follow the active/inactive colors
pub fn panel(title: &str, active: bool, theme: &Theme) -> Block<'static> {
    let border_color = if active { theme.accent } else { theme.inactive };
    let title_style = if active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.inactive)
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// "NEW" / "POPULAR" badges for a calculator
pub fn badges(calculator: &Calculator, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if calculator.is_new {
        spans.push(Span::styled(
            " NEW ",
            Style::default().fg(theme.bg).bg(theme.warning).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    if calculator.is_popular {
        spans.push(Span::styled(
            " POPULAR ",
            Style::default().fg(theme.bg).bg(theme.success).add_modifier(Modifier::BOLD),
        ));
    }
    spans
}

/// Table of calculator cards. `selected` is highlighted when the table is active.
pub fn calculator_table<'a>(
    calculators: &[&'a Calculator],
    catalog: &'a Catalog,
    theme: &Theme,
    selected: Option<usize>,
    show_category: bool,
    wide: bool,
) -> Table<'a> {
    let header_style = Style::default().fg(theme.header);
    let mut header = vec![
        Span::styled("", header_style),
        Span::styled("Name", header_style),
    ];
    if show_category {
        header.push(Span::styled("Category", header_style));
    }
    if wide {
        header.push(Span::styled("Description", header_style));
    }

    let rows: Vec<Row> = if calculators.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No calculators",
            Style::default().fg(theme.text_dim),
        )])]
    } else {
        calculators
            .iter()
            .enumerate()
            .map(|(i, &calculator)| {
                let mut name = vec![Span::styled(
                    format!("{} ", calculator.name),
                    Style::default().fg(theme.text),
                )];
                name.extend(badges(calculator, theme));

                let mut cells = vec![
                    Line::from(Span::styled(
                        calculator.icon.clone(),
                        Style::default().fg(theme.accent),
                    )),
                    Line::from(name),
                ];
                if show_category {
                    cells.push(Line::from(Span::styled(
                        catalog.category_name(&calculator.category),
                        Style::default().fg(theme.text_dim),
                    )));
                }
                if wide {
                    cells.push(Line::from(Span::styled(
                        calculator.description.clone(),
                        Style::default().fg(theme.text_dim),
                    )));
                }

                let row_style = if Some(i) == selected {
                    Style::default().bg(theme.bg_selected).fg(theme.text)
                } else {
                    Style::default()
                };
                Row::new(cells).style(row_style)
            })
            .collect()
    };

    let widths = match (show_category, wide) {
        (true, true) => vec![
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Percentage(17),
            Constraint::Percentage(48),
        ],
        (false, true) => vec![
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ],
        (true, false) => vec![
            Constraint::Length(3),
            Constraint::Percentage(65),
            Constraint::Percentage(35),
        ],
        (false, false) => vec![Constraint::Length(3), Constraint::Percentage(100)],
    };

    Table::new(rows, widths).header(Row::new(header))
}

/// One rotating banner message, highlighted messages in the bright accent
pub fn banner_line<'a>(message: &'a BannerMessage, theme: &Theme) -> Line<'a> {
    let style = if message.highlight {
        Style::default().fg(theme.accent_bright).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut spans = vec![Span::styled(message.text.as_str(), style)];
    if message.link.is_some() {
        spans.push(Span::styled("  (l) open", Style::default().fg(theme.text_dim)));
    }
    spans.push(Span::styled("  (x) dismiss", Style::default().fg(theme.inactive)));
    Line::from(spans)
}

mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Page, Popup};
use crate::banner::HomeBanners;
use crate::daterange::Endpoint;
use crate::theme::{Theme, ThemeMode};
use crate::timer::TimerState;
use crate::widgets::Deferred;

use components::{badges, banner_line, calculator_table, panel};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let t = &app.theme;

    f.render_widget(Block::default().style(Style::default().bg(t.bg).fg(t.text)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header (title, status, clock)
            Constraint::Min(3),    // Page
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_header(f, app, chunks[0]);

    match &app.page {
        Page::Home => draw_home(f, app, chunks[1]),
        Page::Categories => draw_categories(f, app, chunks[1]),
        Page::Category(id) => draw_category(f, app, id, chunks[1]),
        Page::AllCalculators => draw_all(f, app, chunks[1]),
        Page::Calculator(id) => draw_calculator(f, app, id, chunks[1]),
        Page::DateRange => draw_date_range(f, app, chunks[1]),
        Page::NotFound { kind, id } => draw_not_found(f, t, kind, id, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);

    if app.popup == Popup::Help {
        draw_help_popup(f, t);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let title = Line::from(vec![
        Span::styled(" calcdir", Style::default().fg(t.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" › ", Style::default().fg(t.inactive)),
        Span::styled(app.page.title(), Style::default().fg(t.header)),
    ]);
    f.render_widget(Paragraph::new(title), area);

    // Right side: status message takes priority over the clock
    let mut right = Vec::new();
    if let Some(ref status) = app.status_message {
        right.push(Span::styled(status.as_str(), Style::default().fg(t.warning)));
    } else if let Some(time) = app.clock.display() {
        right.push(Span::styled(time, Style::default().fg(t.text_dim)));
    }

    // The toggle only appears once the stored preference has been read
    if let Deferred::Ready(mode) = app.theme_mode {
        let icon = match mode {
            ThemeMode::Dark => "☾",
            ThemeMode::Light => "☼",
        };
        right.push(Span::styled(format!("  {} ", icon), Style::default().fg(t.accent)));
    }

    f.render_widget(Paragraph::new(Line::from(right)).alignment(Alignment::Right), area);
}

fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let Some(home) = app.home.as_ref() else {
        return;
    };
    let t = &app.theme;

    let banner_height = if home.rotating.current().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Rotating banner
            Constraint::Length(3),             // Featured marquee
            Constraint::Min(4),                // Featured lists
            Constraint::Length(1),             // Ticker
        ])
        .split(area);

    draw_rotating_banner(f, home, t, chunks[0]);
    draw_featured_marquee(f, home, t, chunks[1]);
    draw_featured_lists(f, app, chunks[2]);

    if home.ticker.state() == TimerState::Running {
        let ticker = Paragraph::new(Span::styled(
            home.ticker.visible_text(),
            Style::default().fg(t.warning),
        ));
        f.render_widget(ticker, chunks[3]);
    }
}

fn draw_rotating_banner(f: &mut Frame, home: &HomeBanners, t: &Theme, area: Rect) {
    let Some(message) = home.rotating.current() else {
        return;
    };

    // Position counter only while rotating
    let position = match home.rotating.state() {
        TimerState::Running => format!(
            " {}/{} ",
            home.rotating.rotation().current_index + 1,
            home.rotating.len()
        ),
        TimerState::Stopped => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.inactive))
        .title(Span::styled(position, Style::default().fg(t.text_dim)));

    let banner = Paragraph::new(banner_line(message, t))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(banner, area);
}

fn draw_featured_marquee(f: &mut Frame, home: &HomeBanners, t: &Theme, area: Rect) {
    if home.featured.state() == TimerState::Stopped {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.inactive));

    let marquee = Paragraph::new(Span::styled(
        home.featured.visible_text(),
        Style::default().fg(t.accent_bright),
    ))
    .block(block);
    f.render_widget(marquee, area);
}

fn draw_featured_lists(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let popular = app.catalog.popular();
    let newest = app.catalog.newest();

    // One cursor walks the popular list, then the new list
    let (popular_sel, new_sel) = if app.selected < popular.len() {
        (Some(app.selected), None)
    } else {
        (None, Some(app.selected - popular.len()))
    };

    let wide = area.width > 120;
    render_table(
        f,
        calculator_table(&popular, &app.catalog, t, popular_sel, true, wide)
            .block(panel("Popular", popular_sel.is_some(), t)),
        popular_sel,
        chunks[0],
    );
    render_table(
        f,
        calculator_table(&newest, &app.catalog, t, new_sel, true, wide)
            .block(panel("New", new_sel.is_some(), t)),
        new_sel,
        chunks[1],
    );
}

fn draw_categories(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let header_style = Style::default().fg(t.header);

    let rows: Vec<Row> = app
        .catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let count = app.catalog.in_category(&category.id).count();
            let row_style = if i == app.selected {
                Style::default().bg(t.bg_selected).fg(t.text)
            } else {
                Style::default()
            };

            Row::new(vec![
                Span::styled(category.icon.as_str(), Style::default().fg(t.accent)),
                Span::styled(category.name.as_str(), Style::default().fg(t.text)),
                Span::styled(count.to_string(), Style::default().fg(t.accent_bright)),
                Span::styled(category.description.as_str(), Style::default().fg(t.text_dim)),
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Percentage(60),
        ],
    )
    .header(Row::new(vec![
        Span::styled("", header_style),
        Span::styled("Category", header_style),
        Span::styled("Count", header_style),
        Span::styled("Description", header_style),
    ]))
    .block(panel("Categories", true, t));

    render_table(f, table, Some(app.selected), area);
}

fn draw_category(f: &mut Frame, app: &App, id: &str, area: Rect) {
    let t = &app.theme;
    let Ok(view) = app.catalog.category(id) else {
        draw_not_found(f, t, "category", id, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!(" {} ", view.category.icon), Style::default().fg(t.accent)),
            Span::styled(
                view.category.name.as_str(),
                Style::default().fg(t.header).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} calculators", view.calculators.len()),
                Style::default().fg(t.text_dim),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", view.category.description),
            Style::default().fg(t.text_dim),
        )),
    ]);
    f.render_widget(intro, chunks[0]);

    let table = calculator_table(
        &view.calculators,
        &app.catalog,
        t,
        Some(app.selected),
        false,
        true,
    )
    .block(panel(&view.category.name, true, t));
    render_table(f, table, Some(app.selected), chunks[1]);
}

fn draw_all(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let calculators: Vec<_> = app.catalog.calculators().iter().collect();
    let title = format!("All Calculators ({})", calculators.len());

    let table = calculator_table(
        &calculators,
        &app.catalog,
        t,
        Some(app.selected),
        true,
        area.width > 80,
    )
    .block(panel(&title, true, t));
    render_table(f, table, Some(app.selected), area);
}

fn draw_calculator(f: &mut Frame, app: &App, id: &str, area: Rect) {
    let t = &app.theme;
    let Ok(calculator) = app.catalog.calculator(id) else {
        draw_not_found(f, t, "calculator", id, area);
        return;
    };

    let mut title = vec![
        Span::styled(format!("{}  ", calculator.icon), Style::default().fg(t.accent)),
        Span::styled(
            format!("{}  ", calculator.name),
            Style::default().fg(t.header).add_modifier(Modifier::BOLD),
        ),
    ];
    title.extend(badges(calculator, t));

    let label = Style::default().fg(t.text_dim);
    let lines = vec![
        Line::from(""),
        Line::from(title),
        Line::from(""),
        Line::from(Span::styled(calculator.description.as_str(), Style::default().fg(t.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Category  ", label),
            Span::styled(
                app.catalog.category_name(&calculator.category),
                Style::default().fg(t.accent),
            ),
        ]),
        Line::from(vec![
            Span::styled("Route     ", label),
            Span::styled(format!("calculator:{}", calculator.id), Style::default().fg(t.text)),
        ]),
    ];

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel(&calculator.name, true, t));
    f.render_widget(detail, area);
}

fn draw_date_range(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let demo = &app.date_demo;
    let range = demo.range();

    let endpoint = |label: &'static str, date: chrono::NaiveDate, focused: bool| -> Vec<Span<'static>> {
        let style = if focused {
            Style::default().fg(t.bg).bg(t.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.text)
        };
        vec![
            Span::styled(label, Style::default().fg(t.text_dim)),
            Span::styled(format!(" {} ", date.format("%a %Y-%m-%d")), style),
        ]
    };

    let mut dates = endpoint("  From ", range.start(), demo.focus == Endpoint::Start);
    dates.extend(endpoint("   To ", range.end(), demo.focus == Endpoint::End));

    let stat = |label: &'static str, value: i64| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", label), Style::default().fg(t.text_dim)),
            Span::styled(value.to_string(), Style::default().fg(t.accent_bright)),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(dates),
        Line::from(""),
        stat("Days", range.days()),
        stat("Nights", range.nights()),
        stat("Weekdays", range.weekdays()),
        stat("Weekend days", range.weekend_days()),
        Line::from(""),
        Line::from(Span::styled(
            "  ←/→ day   ↑/↓ week   Tab switch endpoint",
            Style::default().fg(t.inactive),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(panel("Date Range", true, t)), area);
}

fn draw_not_found(f: &mut Frame, t: &Theme, kind: &str, id: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "404",
            Style::default().fg(t.danger).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("No {} named ", kind), Style::default().fg(t.text)),
            Span::styled(format!("'{}'", id), Style::default().fg(t.accent)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to go back · h for home",
            Style::default().fg(t.text_dim),
        )),
    ];

    let page = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(" Not Found ", Style::default().fg(t.danger)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.danger)),
        );
    f.render_widget(page, area);
}

fn render_table(f: &mut Frame, table: Table, selected: Option<usize>, area: Rect) {
    // Stateful render keeps the selected row scrolled into view
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let mut hints: Vec<(&str, &str)> = match app.page {
        Page::Home => vec![
            ("↑↓", "Nav"),
            ("Enter", "Open"),
            ("c", "Categories"),
            ("a", "All"),
            ("d", "Dates"),
            ("x", "Dismiss"),
            ("t", "Theme"),
            ("?", "Help"),
        ],
        Page::Categories | Page::Category(_) | Page::AllCalculators => vec![
            ("↑↓", "Nav"),
            ("Enter", "Open"),
            ("h", "Home"),
            ("t", "Theme"),
            ("?", "Help"),
        ],
        Page::DateRange => vec![
            ("←→", "Day"),
            ("↑↓", "Week"),
            ("Tab", "Endpoint"),
            ("h", "Home"),
        ],
        Page::Calculator(_) | Page::NotFound { .. } => vec![("h", "Home"), ("a", "All"), ("?", "Help")],
    };
    if app.can_go_back() {
        hints.insert(0, ("Esc", "Back"));
    }
    hints.push(("q", "Quit"));

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 6 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(t.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(t.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, t: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(t.header).add_modifier(Modifier::BOLD),
        ))
    };
    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), Style::default().fg(t.accent)),
            Span::styled(action, Style::default().fg(t.text)),
        ])
    };

    let help_text = vec![
        section("═══ Pages ═══"),
        key("h", "Home: banners and featured calculators"),
        key("c", "Browse categories"),
        key("a", "All calculators"),
        key("d", "Date range demo"),
        key("Esc", "Back to the previous page"),
        Line::from(""),
        section("═══ Lists ═══"),
        key("↑/↓ j/k", "Move up/down"),
        key("Enter", "Open the selected entry"),
        Line::from(""),
        section("═══ Widgets ═══"),
        key("x", "Dismiss the rotating banner"),
        key("l", "Follow the banner's link"),
        key("t", "Toggle light/dark theme"),
        key("w", "Show/hide the clock"),
        Line::from(""),
        section("═══ Quick Start ═══"),
        key("calcdir --list", "Print the catalog as JSON"),
        key("calcdir --open category:finance", ""),
        Line::from(""),
        Line::from(Span::styled("Press Esc or ? to close", Style::default().fg(t.text_dim))),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(t.bg))
        .block(
            Block::default()
                .title(Span::styled(" Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        );

    f.render_widget(help, popup_area);
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

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

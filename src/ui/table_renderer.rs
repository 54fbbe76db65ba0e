// Draws a TablePlan onto a ratatui frame. This file is the only place the
// populated/empty/loading bodies meet actual widgets; everything it needs
// arrives pre-computed in the plan. Tooltip wrappers are carried in the
// plan for the host application's status line and are not drawn here.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use crate::engine::actions::{ActionLayout, ResolvedAction};
use crate::engine::cells::CellContent;
use crate::engine::table::{RowPlan, TableBody, TablePhase, TablePlan};

/// Per-draw presentation options.
#[derive(Debug, Clone, Default)]
pub struct TableViewOptions {
    pub title: String,
    /// Index into the populated rows to highlight, if any.
    pub selected: Option<usize>,
}

/// Render a plan into the given area.
pub fn render_table<R>(f: &mut Frame, area: Rect, plan: &TablePlan<R>, options: &TableViewOptions) {
    let title = match plan.phase {
        TablePhase::Loading => format!("{} (loading)", options.title),
        TablePhase::Empty => options.title.clone(),
        TablePhase::Populated => match &plan.body {
            TableBody::Populated { rows } => format!("{} ({} rows)", options.title, rows.len()),
            _ => options.title.clone(),
        },
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &plan.body {
        TableBody::Loading { skeleton_rows } => {
            render_loading(f, inner, plan, *skeleton_rows);
        }
        TableBody::Empty { title, description } => {
            render_empty(f, inner, title, description);
        }
        TableBody::Populated { rows } => {
            render_populated(f, inner, plan, rows, options.selected);
        }
    }
}

/// Render the overflow menu for one row's action layout as a centered
/// popup. The caller decides when the menu is open.
pub fn render_action_menu<R>(f: &mut Frame, area: Rect, layout: &ActionLayout<R>) {
    if !layout.has_overflow() {
        return;
    }

    let lines: Vec<Line> = layout
        .overflow
        .iter()
        .map(|action| Line::from(action_text(action)))
        .collect();

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 30.min(area.width);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("More actions"),
    );
    f.render_widget(Clear, popup);
    f.render_widget(menu, popup);
}

fn column_constraints<R>(plan: &TablePlan<R>) -> Vec<Constraint> {
    plan.columns
        .iter()
        .map(|column| match column.explicit_width {
            // An explicit width always wins over the computed share.
            Some(width) => Constraint::Length(width),
            None => Constraint::Percentage(column.width_pct.round() as u16),
        })
        .collect()
}

fn header_row<R>(plan: &TablePlan<R>) -> Row<'static> {
    let cells: Vec<Cell> = plan
        .columns
        .iter()
        .map(|column| {
            Cell::from(column.header.clone()).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Row::new(cells)
}

fn render_loading<R>(f: &mut Frame, area: Rect, plan: &TablePlan<R>, skeleton_rows: usize) {
    let widths = column_constraints(plan);
    let skeleton_style = Style::default().fg(Color::DarkGray);

    let rows: Vec<Row> = (0..skeleton_rows)
        .map(|_| {
            let cells: Vec<Cell> = plan
                .columns
                .iter()
                .map(|_| Cell::from("░░░░░░").style(skeleton_style))
                .collect();
            Row::new(cells)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header_row(plan))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, description: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(title.to_string()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(description.to_string()).style(Style::default().fg(Color::DarkGray)),
    ];

    let placeholder = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(placeholder, area);
}

fn render_populated<R>(
    f: &mut Frame,
    area: Rect,
    plan: &TablePlan<R>,
    rows: &[RowPlan<R>],
    selected: Option<usize>,
) {
    let widths = column_constraints(plan);

    // Expanded rows break the table into segments so the sub-row can span
    // the full width beneath its parent.
    enum Segment<'a> {
        Rows(Vec<Row<'static>>),
        Sub(&'a str),
    }

    let mut segments: Vec<Segment> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let rendered = data_row(row, selected == Some(index));
        match segments.last_mut() {
            Some(Segment::Rows(bucket)) => bucket.push(rendered),
            _ => segments.push(Segment::Rows(vec![rendered])),
        }
        if let Some(sub) = &row.sub_content {
            segments.push(Segment::Sub(sub));
        }
    }

    let mut constraints = vec![Constraint::Length(1)];
    for segment in &segments {
        constraints.push(match segment {
            Segment::Rows(bucket) => Constraint::Length(bucket.len() as u16),
            Segment::Sub(content) => Constraint::Length(content.lines().count().max(1) as u16),
        });
    }
    constraints.push(Constraint::Min(0));

    let chunks = Layout::vertical(constraints).split(area);

    let header_only: Vec<Row> = Vec::new();
    let header = Table::new(header_only, widths.clone())
        .header(header_row(plan))
        .column_spacing(1);
    f.render_widget(header, chunks[0]);

    for (chunk, segment) in chunks.iter().skip(1).zip(segments.into_iter()) {
        match segment {
            Segment::Rows(bucket) => {
                let table = Table::new(bucket, widths.clone()).column_spacing(1);
                f.render_widget(table, *chunk);
            }
            Segment::Sub(content) => {
                let sub = Paragraph::new(content.to_string())
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: false });
                f.render_widget(sub, *chunk);
            }
        }
    }
}

fn data_row<R>(row: &RowPlan<R>, is_selected: bool) -> Row<'static> {
    let cells: Vec<Cell> = row
        .cells
        .iter()
        .map(|content| {
            if content.is_actions() {
                match &row.actions {
                    Some(layout) => actions_cell(layout),
                    None => Cell::from(""),
                }
            } else {
                cell_from_content(content, row.copied)
            }
        })
        .collect();

    let style = if is_selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Row::new(cells).style(style)
}

fn cell_from_content(content: &CellContent, row_copied: bool) -> Cell<'static> {
    let text = content.display_text().to_string();

    match content.clipboard_value() {
        Some(_) if row_copied => Cell::from(format!("{} ✓", text))
            .style(Style::default().fg(Color::Green)),
        Some(_) => Cell::from(format!("{} ⎘", text)),
        None => Cell::from(text),
    }
}

fn actions_cell<R>(layout: &ActionLayout<R>) -> Cell<'static> {
    let mut parts: Vec<String> = layout.inline.iter().map(action_text).collect();
    if layout.has_overflow() {
        parts.push(format!("[⋯{}]", layout.overflow.len()));
    }
    Cell::from(parts.join(" "))
}

fn action_text<R>(action: &ResolvedAction<R>) -> String {
    match &action.custom_render {
        Some(rendered) => rendered.clone(),
        None if action.icon.is_empty() => format!("[{}]", action.label),
        None => format!("[{} {}]", action.icon, action.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::VecDataSource;
    use crate::data::{CellValue, RowIdentity};
    use crate::engine::actions::ActionsConfig;
    use crate::engine::columns::ColumnSpec;
    use crate::engine::row_state::RowStateMap;
    use crate::engine::table::{ExpansionConfig, TableComposer};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[derive(Clone)]
    struct Account {
        id: u64,
        email: String,
    }

    impl RowIdentity for Account {
        fn row_id(&self) -> String {
            format!("acct-{}", self.id)
        }
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: 1,
                email: "ada@x.com".to_string(),
            },
            Account {
                id: 2,
                email: "grace@x.com".to_string(),
            },
        ]
    }

    fn composer() -> TableComposer<Account> {
        TableComposer::new(vec![
            ColumnSpec::new("email", "Email", 2.0)
                .accessor(|a: &Account| CellValue::Text(a.email.clone()))
                .clipboard(),
            ColumnSpec::new("actions", "Actions", 1.0),
        ])
        .actions(ActionsConfig::new().view("View", |_| {}))
    }

    fn draw<R>(plan: &TablePlan<R>) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.area();
                render_table(
                    f,
                    area,
                    plan,
                    &TableViewOptions {
                        title: "Accounts".to_string(),
                        selected: None,
                    },
                );
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.cell((x, y)).expect("cell").symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_loading_draws_skeleton_rows() {
        let source: VecDataSource<Account> = VecDataSource::loading();
        let plan = composer().compose(&source, &RowStateMap::new());
        let screen = draw(&plan);

        assert!(screen.contains("(loading)"));
        assert!(screen.contains("Email"));
        assert_eq!(screen.matches("░░░░░░").count(), 6); // 3 rows x 2 columns
    }

    #[test]
    fn test_empty_draws_placeholder() {
        let source: VecDataSource<Account> = VecDataSource::new(Vec::new(), 0);
        let plan = composer()
            .empty_state("No accounts", "Invite a teammate to get started.")
            .compose(&source, &RowStateMap::new());
        let screen = draw(&plan);

        assert!(screen.contains("No accounts"));
        assert!(screen.contains("Invite a teammate"));
    }

    #[test]
    fn test_populated_draws_rows_and_actions() {
        let source = VecDataSource::new(accounts(), 2);
        let plan = composer().compose(&source, &RowStateMap::new());
        let screen = draw(&plan);

        assert!(screen.contains("ada@x.com"));
        assert!(screen.contains("grace@x.com"));
        assert!(screen.contains("View"));
        assert!(screen.contains("(2 rows)"));
    }

    #[test]
    fn test_expanded_row_draws_sub_content() {
        let source = VecDataSource::new(accounts(), 2);
        let mut states = RowStateMap::new();
        states.toggle_expanded("acct-1");

        let plan = composer()
            .expansion(ExpansionConfig::new(
                |_| true,
                |a: &Account| format!("Login history for {}", a.email),
            ))
            .compose(&source, &states);
        let screen = draw(&plan);

        assert!(screen.contains("Login history for ada@x.com"));
    }
}

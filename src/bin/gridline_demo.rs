// Interactive demo: a product catalogue table wired to the composition
// engine, with simulated fetch latency so the loading skeleton is visible.
//
// Keys: j/k select, n/p/f/l pages, s page size, e expand, y copy SKU,
// m overflow menu, d delete (confirmation), q quit.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use serde::Deserialize;
use std::io;
use std::time::{Duration, Instant};

use gridline::config::Config;
use gridline::data::provider::VecDataSource;
use gridline::TableDataSource;
use gridline::data::{CellValue, RowIdentity};
use gridline::engine::actions::{ActionKind, ActionsConfig, Confirmation};
use gridline::engine::columns::ColumnSpec;
use gridline::engine::pagination::{PageCursor, PageView};
use gridline::engine::row_state::RowStateMap;
use gridline::engine::table::{
    ExpansionConfig, PhaseTracker, TableBody, TableComposer, TablePlan,
};
use gridline::ui::clipboard::{CopyEvent, CopyFeedback, SystemClipboard};
use gridline::ui::table_renderer::{render_action_menu, render_table, TableViewOptions};

const FETCH_LATENCY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Deserialize)]
struct Product {
    id: u64,
    name: String,
    sku: String,
    price: f64,
    stock: i64,
    active: bool,
    description: String,
}

impl RowIdentity for Product {
    fn row_id(&self) -> String {
        format!("product-{}", self.id)
    }
}

const SAMPLE_PRODUCTS: &str = r#"[
  {"id": 1, "name": "Anvil", "sku": "AVL-001", "price": 129.0, "stock": 12, "active": true, "description": "Drop-forged steel anvil, 25 kg."},
  {"id": 2, "name": "Ball Peen Hammer", "sku": "BPH-014", "price": 24.5, "stock": 140, "active": true, "description": "Polished head, hickory handle."},
  {"id": 3, "name": "Crosscut Saw", "sku": "CCS-090", "price": 41.0, "stock": 0, "active": false, "description": "660 mm blade, 11 TPI."},
  {"id": 4, "name": "Dovetail Jig", "sku": "DTJ-220", "price": 189.99, "stock": 8, "active": true, "description": "Through and half-blind joints up to 300 mm."},
  {"id": 5, "name": "Engineer's Square", "sku": "ESQ-050", "price": 18.75, "stock": 64, "active": true, "description": "Hardened blade, DIN 875/1."},
  {"id": 6, "name": "Files, Assorted", "sku": "FIL-777", "price": 32.0, "stock": 23, "active": true, "description": "Set of five with cut 2 teeth."},
  {"id": 7, "name": "Grinding Wheel", "sku": "GRW-125", "price": 12.4, "stock": 310, "active": true, "description": "125 mm, aluminium oxide."},
  {"id": 8, "name": "Hacksaw Frame", "sku": "HSF-300", "price": 16.9, "stock": 77, "active": false, "description": "Adjustable 250-300 mm."},
  {"id": 9, "name": "Inspection Mirror", "sku": "IMR-032", "price": 9.99, "stock": 55, "active": true, "description": "Telescoping handle, 32 mm head."},
  {"id": 10, "name": "Jack Plane", "sku": "JPL-005", "price": 98.0, "stock": 6, "active": true, "description": "No. 5, 355 mm sole."},
  {"id": 11, "name": "Knife, Marking", "sku": "KNM-002", "price": 21.5, "stock": 48, "active": true, "description": "Single bevel, O1 steel."},
  {"id": 12, "name": "Level, Torpedo", "sku": "LVT-009", "price": 14.25, "stock": 0, "active": false, "description": "Three vials, magnetic edge."}
]"#;

struct DemoApp {
    catalogue: Vec<Product>,
    source: VecDataSource<Product>,
    cursor: PageCursor,
    pending_fetch: Option<Instant>,
    row_states: RowStateMap,
    copy: Option<CopyFeedback<SystemClipboard>>,
    phase: PhaseTracker,
    selected: usize,
    menu_open: bool,
    confirm_delete: bool,
    notice: Option<String>,
    page_sizes: Vec<usize>,
}

impl DemoApp {
    fn new(config: &Config) -> Result<Self> {
        let catalogue: Vec<Product> = serde_json::from_str(SAMPLE_PRODUCTS)?;
        let page_size = config.table.page_sizes.first().copied().unwrap_or(10);

        let mut app = Self {
            catalogue,
            source: VecDataSource::loading(),
            cursor: PageCursor::first_page(page_size),
            pending_fetch: None,
            row_states: RowStateMap::new(),
            copy: SystemClipboard::new().ok().map(CopyFeedback::new),
            phase: PhaseTracker::new(),
            selected: 0,
            menu_open: false,
            confirm_delete: false,
            notice: None,
            page_sizes: config.table.page_sizes.clone(),
        };
        app.start_fetch(app.cursor);
        Ok(app)
    }

    fn page_view(&self) -> PageView {
        PageView::derive(self.cursor, self.catalogue.len())
    }

    /// Hand the cursor to the "backend": mark the source loading and
    /// remember when to deliver the slice.
    fn start_fetch(&mut self, cursor: PageCursor) {
        self.cursor = cursor;
        self.source.set_loading(true);
        self.pending_fetch = Some(Instant::now());
        self.menu_open = false;
        self.confirm_delete = false;
    }

    fn complete_fetch_if_due(&mut self) {
        let due = matches!(self.pending_fetch, Some(started) if started.elapsed() >= FETCH_LATENCY);
        if !due {
            return;
        }
        self.pending_fetch = None;

        let view = self.page_view();
        let start = (view.first_row - 1).min(self.catalogue.len());
        let end = (start + self.cursor.page_size).min(self.catalogue.len());
        let slice: Vec<Product> = self.catalogue[start..end].to_vec();

        let ids: Vec<String> = slice.iter().map(|p| p.row_id()).collect();
        self.row_states.retain_rows(ids.iter().map(String::as_str));
        self.source.set_rows(slice, self.catalogue.len());
        self.selected = 0;
    }

    fn selected_product(&self) -> Option<&Product> {
        self.source.rows().get(self.selected)
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.source.rows().len();
        if count == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
        self.menu_open = false;
        self.confirm_delete = false;
    }

    fn cycle_page_size(&mut self) {
        if self.page_sizes.is_empty() {
            return;
        }
        let current = self
            .page_sizes
            .iter()
            .position(|&size| size == self.cursor.page_size)
            .unwrap_or(0);
        let next = self.page_sizes[(current + 1) % self.page_sizes.len()];
        let cursor = self.page_view().with_page_size(next);
        self.start_fetch(cursor);
    }

    fn request_copy(&mut self) {
        let Some(product) = self.selected_product() else {
            return;
        };
        let row_id = product.row_id();
        let value = CellValue::Text(product.sku.clone());
        if let Some(copy) = &mut self.copy {
            copy.request_copy(&row_id, &value);
        }
    }

    fn pump_copy_events(&mut self, now: Instant) {
        let Some(copy) = &mut self.copy else {
            return;
        };
        for event in copy.poll(now) {
            match event {
                CopyEvent::Confirmed(notice) => {
                    self.row_states.set_copied(&notice.row_id, true);
                    self.notice = Some(format!("Copied {}", notice.preview));
                }
                CopyEvent::Expired { row_id } => {
                    self.row_states.set_copied(&row_id, false);
                }
            }
        }
    }
}

fn build_composer(config: &Config) -> TableComposer<Product> {
    let icons = config.display.icons.clone();

    let mut actions = ActionsConfig::new()
        .view("View", |p: &Product| {
            tracing::info!(target: "demo", "viewing {}", p.name);
        })
        .edit("Edit", |p: &Product| {
            tracing::info!(target: "demo", "editing {}", p.name);
        })
        .toggle(
            "Active",
            |p: &Product| p.active,
            |p: &Product| {
                tracing::info!(target: "demo", "toggling {}", p.name);
            },
        )
        .delete(
            "Delete",
            "Delete product",
            "The product and its history will be removed.",
            |p: &Product| {
                tracing::info!(target: "demo", "deleting {}", p.name);
            },
        )
        .custom("Archive", icons.overflow.clone(), |p: &Product| {
            tracing::info!(target: "demo", "archiving {}", p.name);
        });

    if let Some(slot) = actions.view.as_mut() {
        slot.icon = icons.view.clone();
    }
    if let Some(slot) = actions.edit.as_mut() {
        slot.icon = icons.edit.clone();
    }
    if let Some(slot) = actions.toggle.as_mut() {
        slot.icon_on = icons.toggle_on.clone();
        slot.icon_off = icons.toggle_off.clone();
    }
    if let Some(slot) = actions.delete.as_mut() {
        slot.icon = icons.delete.clone();
    }

    TableComposer::new(vec![
        ColumnSpec::new("name", "Name", 2.0)
            .accessor(|p: &Product| CellValue::Text(p.name.clone()))
            .tooltip(),
        ColumnSpec::new("sku", "SKU", 1.5)
            .accessor(|p: &Product| CellValue::Text(p.sku.clone()))
            .clipboard(),
        ColumnSpec::new("price", "Price", 1.0)
            .accessor(|p: &Product| CellValue::Float(p.price))
            .cell(|p: &Product| format!("${:.2}", p.price)),
        ColumnSpec::new("stock", "Stock", 1.0)
            .accessor(|p: &Product| CellValue::Integer(p.stock)),
        ColumnSpec::new(config.table.actions_key.clone(), "Actions", 2.0),
    ])
    .actions(actions)
    .actions_key(config.table.actions_key.clone())
    .skeleton_rows(config.table.skeleton_rows)
    .empty_state(
        config.table.empty_title.clone(),
        config.table.empty_description.clone(),
    )
    .expansion(ExpansionConfig::new(
        |p: &Product| !p.description.is_empty(),
        |p: &Product| format!("  └ {} (stock: {})", p.description, p.stock),
    ))
}

fn draw(f: &mut Frame, app: &DemoApp, plan: &TablePlan<Product>) {
    let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).split(f.area());

    render_table(
        f,
        chunks[0],
        plan,
        &TableViewOptions {
            title: "Products".to_string(),
            selected: Some(app.selected),
        },
    );

    let view = app.page_view();
    let status = format!(
        "page {}/{}  rows {}-{} of {}  [n]ext [p]rev [f]irst [l]ast [s]ize={}",
        view.cursor.page,
        view.page_count,
        view.first_row,
        (view.first_row + app.source.rows().len()).saturating_sub(1),
        app.catalogue.len(),
        view.cursor.page_size,
    );
    let notice = app.notice.clone().unwrap_or_default();
    let bar = Paragraph::new(vec![
        Line::from(status),
        Line::from(notice).style(Style::default().fg(Color::Green)),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, chunks[1]);

    if let TableBody::Populated { rows } = &plan.body {
        if let Some(row) = rows.get(app.selected) {
            if let Some(layout) = &row.actions {
                if app.menu_open {
                    render_action_menu(f, chunks[0], layout);
                }
                if app.confirm_delete {
                    let delete = layout
                        .inline
                        .iter()
                        .chain(layout.overflow.iter())
                        .find(|action| action.kind == ActionKind::Delete);
                    if let Some(confirm) = delete.and_then(|action| action.confirm.as_ref()) {
                        render_confirm_prompt(f, chunks[0], confirm);
                    }
                }
            }
        }
    }
}

fn render_confirm_prompt(f: &mut Frame, area: Rect, confirm: &Confirmation) {
    let width = 44.min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let body = Paragraph::new(vec![
        Line::from(confirm.description.clone()),
        Line::from(""),
        Line::from("[y] confirm   [n] cancel").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(confirm.title.clone())
            .style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}

fn run(terminal: &mut Terminal<impl Backend>, config: &Config) -> Result<()> {
    let composer = build_composer(config);
    let mut app = DemoApp::new(config)?;

    loop {
        app.complete_fetch_if_due();
        app.pump_copy_events(Instant::now());

        let plan = composer.compose(&app.source, &app.row_states);
        app.phase.observe(plan.phase);
        terminal.draw(|f| draw(f, &app, &plan))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.confirm_delete {
            match key.code {
                KeyCode::Char('y') => {
                    let product = app.selected_product().cloned();
                    if let (TableBody::Populated { rows }, Some(product)) =
                        (&plan.body, product)
                    {
                        if let Some(layout) = rows.get(app.selected).and_then(|r| r.actions.as_ref())
                        {
                            if let Some(delete) = layout
                                .inline
                                .iter()
                                .chain(layout.overflow.iter())
                                .find(|action| action.kind == ActionKind::Delete)
                            {
                                delete.activate_confirmed(&product);
                                app.notice = Some(format!("Deleted {}", product.name));
                            }
                        }
                    }
                    app.confirm_delete = false;
                }
                KeyCode::Char('n') | KeyCode::Esc => app.confirm_delete = false,
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
            KeyCode::Char('n') => {
                let cursor = app.page_view().next();
                if cursor != app.cursor {
                    app.start_fetch(cursor);
                }
            }
            KeyCode::Char('p') => {
                let cursor = app.page_view().previous();
                if cursor != app.cursor {
                    app.start_fetch(cursor);
                }
            }
            KeyCode::Char('f') => {
                let cursor = app.page_view().first();
                if cursor != app.cursor {
                    app.start_fetch(cursor);
                }
            }
            KeyCode::Char('l') => {
                let cursor = app.page_view().last();
                if cursor != app.cursor {
                    app.start_fetch(cursor);
                }
            }
            KeyCode::Char('s') => app.cycle_page_size(),
            KeyCode::Char('e') => {
                let row_id = app.selected_product().map(|p| p.row_id());
                if let Some(row_id) = row_id {
                    app.row_states.toggle_expanded(&row_id);
                }
            }
            KeyCode::Char('y') => app.request_copy(),
            KeyCode::Char('m') => app.menu_open = !app.menu_open,
            KeyCode::Char('d') => app.confirm_delete = true,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _log_buffer = gridline::logging::init_tracing();
    let config = Config::load().unwrap_or_default();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

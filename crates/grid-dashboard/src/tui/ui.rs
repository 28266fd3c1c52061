//! Rendering of the dashboard: header, widget grid, footer and the
//! add-widget menu.

use crate::grid::GestureKind;
use crate::tui::app::App;
use crate::widgets::{fit, RenderSize, WidgetContext};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Grid Dashboard";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str =
    "[a] Add  [d] Remove  [Tab] Select  [←↓↑→] Move  [Shift] Resize  [R] Reset  [q] Quit";

/// Shown instead of the grid when it has no widgets.
const EMPTY_TEXT: &str = "No widgets yet. Press [a] to add one.";

/// Marker drawn on the resize handle of the selected widget.
const RESIZE_HANDLE: &str = "◢";

/// Grid area inside a terminal of `area`: everything but the header and
/// footer lines.
pub fn grid_area(area: Rect) -> Rect {
    let [_, body, _] = areas(area);
    body
}

fn areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Renders the whole dashboard and records the grid area on `app` for
/// mouse hit-testing.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [header, body, footer] = areas(frame.area());
    app.set_grid_area(body);

    frame.render_widget(Paragraph::new(header_line(app)), header);
    render_grid(frame, app);
    frame.render_widget(Paragraph::new(footer_line(app, footer.width)), footer);
    if app.menu_open() {
        render_menu(frame, app, body);
    }
}

fn header_line(app: &App) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {HEADER_TEXT} "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} · {} cols · {}px",
                app.breakpoint(),
                app.grid.cols(),
                app.viewport_px()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some((id, kind)) = app.pointer_target() {
        let verb = match kind {
            GestureKind::Drag => "moving",
            GestureKind::Resize => "resizing",
        };
        spans.push(Span::styled(
            format!("  {verb} {id} (Esc cancels)"),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn footer_line(app: &App, width: u16) -> Line<'static> {
    if let Some((message, _)) = &app.status_message {
        return Line::styled(fit(message, width), Style::default().fg(Color::Yellow));
    }
    let geometry = app.geometry();
    let below = app.grid.active_layout().height() > geometry.scroll + geometry.visible_rows();
    let mut hints = FOOTER_TEXT.to_string();
    if below {
        hints.push_str("  [PgDn] More");
    }
    Line::styled(fit(&hints, width), Style::default().fg(Color::DarkGray))
}

fn render_grid(frame: &mut Frame, app: &App) {
    let geometry = app.geometry();
    if app.grid.widgets().is_empty() {
        let y = geometry.area.y + geometry.area.height / 2;
        let line = Rect::new(geometry.area.x, y, geometry.area.width, 1.min(geometry.area.height));
        frame.render_widget(
            Paragraph::new(EMPTY_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            line,
        );
        return;
    }

    let ctx = WidgetContext::new(app.now())
        .with_offset(app.offset)
        .with_todos(app.todos.items())
        .with_notes(app.notes.items())
        .with_monitor(&app.monitor);
    let target = app.pointer_target().map(|(id, _)| id);

    for rect in app.grid.active_layout().iter() {
        let Some(area) = geometry.cell_rect(rect) else {
            continue;
        };
        let Some(instance) = app.grid.widget(&rect.id) else {
            continue;
        };
        let selected = app.selected.as_deref() == Some(rect.id.as_str());
        let border = if target == Some(rect.id.as_str()) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_style(border)
            .title(fit(&instance.title, area.width.saturating_sub(2)));
        let inner = block.inner(area);
        let text = app.grid.registry().render(
            &instance.config(),
            RenderSize::new(rect.size(), inner.width, inner.height),
            &ctx,
        );
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(text), inner);

        if selected && geometry.is_resize_handle(rect, area.right() - 1, area.bottom() - 1) {
            if let Some(cell) = frame
                .buffer_mut()
                .cell_mut((area.right() - 1, area.bottom() - 1))
            {
                cell.set_symbol(RESIZE_HANDLE).set_style(border);
            }
        }
    }
}

fn render_menu(frame: &mut Frame, app: &App, body: Rect) {
    let kinds = app.menu_kinds();
    let lines: Vec<Line> = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let spec = kind.builtin_spec();
            let min = app.grid.registry().min_size(*kind);
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{:<15}", spec.title)),
                Span::styled(
                    format!("{}x{}", min.w, min.h),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let width = 28.min(body.width);
    let height = (lines.len() as u16 + 2).min(body.height);
    let area = Rect::new(
        body.x + (body.width - width) / 2,
        body.y + (body.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Add widget ")),
        area,
    );
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::components::{Composer, Picker};

const HELP_LINE: &str = "Ctrl+K customer  Ctrl+G group  Tab channel  Ctrl+S send  Ctrl+C quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    // Title bar
    let title = Line::from(vec![
        Span::styled(
            " TPIR ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Incident Notification Console"),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    // Main area: selection panel on the left, composer on the right
    let [selection_area, composer_area] =
        Layout::horizontal([Length(36), Min(40)]).areas(main_area);
    draw_selection_panel(frame, selection_area, app);
    Composer::new(&tui.composer, &app.email_draft, &app.sms_draft, app.is_sending)
        .render(frame, composer_area);

    // Status line: last error wins over the status message
    let status = match &app.error {
        Some(error) => Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::raw(format!(" {}", app.status_message)),
            Span::styled(
                format!("  |  {HELP_LINE}"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(status), status_area);

    // Overlay picker on top of everything
    if let Some((_, picker_state)) = tui.picker.as_mut() {
        Picker::new(picker_state).render(frame, frame.area());
    }
}

fn draw_selection_panel(frame: &mut Frame, area: Rect, app: &App) {
    use Constraint::{Length, Min};
    let [customer_area, group_area, recipients_area] =
        Layout::vertical([Length(3), Length(3), Min(3)]).areas(area);

    let customer_text = app
        .selected_customer()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| String::from("Choose a customer... (Ctrl+K)"));
    let customer_style = if app.selected_customer.is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(customer_text)
            .style(customer_style)
            .block(Block::bordered().title("Customer")),
        customer_area,
    );

    let group_text = app
        .selected_group()
        .map(|g| g.name.clone())
        .unwrap_or_else(|| {
            if app.selected_customer.is_some() {
                String::from("Choose a vendor group... (Ctrl+G)")
            } else {
                String::from("—")
            }
        });
    let group_style = if app.selected_group.is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(group_text)
            .style(group_style)
            .block(Block::bordered().title("Vendor Group")),
        group_area,
    );

    // Recipient roster for the selected group
    let mut lines: Vec<Line> = Vec::new();
    if let Some(group) = app.selected_group() {
        for email in &group.emails {
            lines.push(Line::from(vec![
                Span::styled("✉ ", Style::default().fg(Color::Cyan)),
                Span::raw(email.clone()),
            ]));
        }
        for phone in &group.phones {
            lines.push(Line::from(vec![
                Span::styled("☎ ", Style::default().fg(Color::Green)),
                Span::raw(phone.clone()),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No group selected",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Recipients")),
        recipients_area,
    );
}

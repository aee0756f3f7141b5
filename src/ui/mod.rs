//! UI module for rendering the TUI

mod components;
mod echo_panel;
mod forms;
mod layout;
mod response_panel;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    forms::draw_pass_form(frame, areas.form, app);
    echo_panel::draw(frame, areas.echo, &app.state.form);
    response_panel::draw(frame, areas.response, &app.state.response);
    layout::draw_status_bar(frame, areas.status, app);

    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}

use ratatui::Frame;

use crate::app::App;

pub fn render(app: &mut App, frame: &mut Frame) {
    app.render(frame);

    app.section.rules.render_editor_popup(frame);

    if app.show_help {
        app.help.render(frame);
    }

    for (index, notification) in app.notifications.iter().enumerate() {
        notification.render(index, frame);
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kanal::Sender;

use crate::app::{App, AppResult};
use crate::event::Event;

pub fn handle_key_events(
    key_event: KeyEvent,
    app: &mut App,
    sender: Sender<Event>,
) -> AppResult<()> {
    if app.show_help {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.show_help = false,
            KeyCode::Char('j') | KeyCode::Down => app.help.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.help.scroll_up(),
            _ => {}
        }
        return Ok(());
    }

    // the rule editor swallows every key, including the global ones
    if app.section.is_editing() {
        return app.section.handle_keys(key_event, sender);
    }

    match key_event.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Char('c') | KeyCode::Char('C') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                app.quit();
            }
        }

        KeyCode::Char('r') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                sender.send(Event::Reset)?;
            }
        }

        KeyCode::Char('?') => app.show_help = true,

        _ => app.section.handle_keys(key_event, sender)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::config::Config;

    fn app() -> App {
        let config = Config::default();
        App::new(Client::new(&config).unwrap(), &config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_outside_the_editor() {
        let (sender, _receiver) = kanal::unbounded();
        let mut app = app();

        handle_key_events(key(KeyCode::Char('q')), &mut app, sender).unwrap();

        assert!(!app.running);
    }

    #[test]
    fn quit_keys_are_typed_into_an_open_editor_instead() {
        let (sender, _receiver) = kanal::unbounded();
        let mut app = app();

        handle_key_events(key(KeyCode::Char('n')), &mut app, sender.clone()).unwrap();
        assert!(app.section.is_editing());

        handle_key_events(key(KeyCode::Char('q')), &mut app, sender).unwrap();

        assert!(app.running);
        assert!(app.section.is_editing());
    }

    #[test]
    fn question_mark_toggles_the_help() {
        let (sender, _receiver) = kanal::unbounded();
        let mut app = app();

        handle_key_events(key(KeyCode::Char('?')), &mut app, sender.clone()).unwrap();
        assert!(app.show_help);

        handle_key_events(key(KeyCode::Esc), &mut app, sender).unwrap();
        assert!(!app.show_help);
    }

    #[test]
    fn ctrl_r_requests_a_reset() {
        let (sender, receiver) = kanal::unbounded();
        let mut app = app();

        handle_key_events(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            &mut app,
            sender,
        )
        .unwrap();

        assert!(matches!(
            receiver.try_recv().unwrap(),
            Some(Event::Reset)
        ));
    }
}

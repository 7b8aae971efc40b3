use std::io;
use std::path::PathBuf;

use mimalloc::MiMalloc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use pangolin_tui::app::{App, AppResult, TICK_RATE};
use pangolin_tui::cli;
use pangolin_tui::client::{self, Client};
use pangolin_tui::config::Config;
use pangolin_tui::event::{Event, EventHandler};
use pangolin_tui::handler::handle_key_events;
use pangolin_tui::tui::Tui;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> AppResult<()> {
    env_logger::init();

    let matches = cli::cli().get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = matches.get_one::<String>("url") {
        config.backend.url = url.clone();
    }
    if let Some(refresh) = matches.get_one::<u64>("refresh") {
        config.display.refresh_interval = *refresh;
    }

    let client = Client::new(&config)?;

    let events = EventHandler::new(TICK_RATE);
    client::spawn_poller(client.clone(), config.refresh_interval(), events.sender.clone());

    let mut app = App::new(client.clone(), &config);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    while app.running {
        tui.draw(&mut app)?;
        match tui.events.next()? {
            Event::Tick => app.tick(),
            Event::Key(key_event) => {
                handle_key_events(key_event, &mut app, tui.events.sender.clone())?
            }
            Event::Telemetry(telemetry) => app.handle_telemetry(telemetry),
            Event::Notification(notification) => app.notifications.push(notification),
            Event::Reset => app = App::new(client.clone(), &config),
            Event::Resize(_, _) => {}
        }
    }

    tui.exit()?;
    Ok(())
}

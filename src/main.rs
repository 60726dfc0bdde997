use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fynoraq::chat_view;
use fynoraq::client::RelayClient;
use fynoraq::config::ViewConfig;
use fynoraq::key_handlers::{handle_chat_input, ChatAction};
use fynoraq::splash_screen::SplashScreenAction;
use fynoraq::{App, AppScreen};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};

enum Event {
    Input(CEvent),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = ViewConfig::from_env();
    let client = RelayClient::new(&config.relay_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new()));
    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

/// Main loop: draw, then process one event at a time. User actions and
/// network completions are discrete events; the reply task is the only
/// concurrent writer and goes through the same mutex.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: RelayClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Input reader with a ~10Hz tick for the spinner and copied-marker TTL.
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let poll_timeout = Duration::from_millis(50);
            let has_input = tokio::task::block_in_place(|| event::poll(poll_timeout));
            if has_input.unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if tx.send(Event::Input(ev)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(100) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| chat_view::draw(f, &mut guard))?;
            if guard.should_quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Tick) => {
                app.lock().await.tick();
            }
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                handle_key(key, &app, &client).await;
            }
            Some(Event::Input(_)) => {}
            None => break,
        }
    }

    Ok(())
}

async fn handle_key(key: KeyEvent, app: &Arc<Mutex<App>>, client: &RelayClient) {
    let mut guard = app.lock().await;
    match guard.screen {
        AppScreen::Landing => {
            if let Some(action) = guard.splash_screen.handle_input(key) {
                match action {
                    SplashScreenAction::Quit => guard.should_quit = true,
                    SplashScreenAction::StartChat => guard.start_chat(),
                }
            }
        }
        AppScreen::Chat => {
            if let Some(action) = handle_chat_input(key, &mut guard) {
                match action {
                    ChatAction::Quit => guard.should_quit = true,
                    ChatAction::SendMessage(text) => {
                        let app = Arc::clone(app);
                        let client = client.clone();
                        tokio::spawn(async move {
                            let outcome = client.send(&text).await;
                            app.lock().await.apply_reply(outcome);
                        });
                    }
                }
            }
        }
    }
}

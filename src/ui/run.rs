use crate::config::Config;
use crate::countdown::CountdownBoard;
use crate::loader::{NameSource, load_blocking};
use crate::schedule::wall_clock_ms;
use crate::ui::model::{Model, initial_model};
use crate::ui::{Effect, Msg};
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

// Program::init takes no arguments, so the session is handed over here.
struct Session {
    source: Arc<dyn NameSource>,
    board: CountdownBoard,
    tick: Duration,
}

static SESSION: OnceCell<Session> = OnceCell::new();

impl Session {
    fn from_config(config: &Config) -> Self {
        Session {
            source: config.name_source(),
            board: config.board(),
            tick: config.tick,
        }
    }
}

// Loads the names on a blocking task and reports back as a message.
fn fetch_names_cmd(source: Arc<dyn NameSource>) -> Cmd {
    Box::pin(async move {
        debug!(source = %source.describe(), "fetching names");
        let result = load_blocking(source).await.map_err(|e| e.to_string());
        Some(Box::new(Msg::NamesLoaded(result)) as bubbletea_rs::event::Msg)
    })
}

fn tick_cmd(period: Duration) -> Cmd {
    Box::pin(async move {
        tokio::time::sleep(period).await;
        Some(Box::new(Msg::Tick {
            now_ms: wall_clock_ms(),
        }) as bubbletea_rs::event::Msg)
    })
}

struct TeaAdapter {
    inner: Model,
    source: Arc<dyn NameSource>,
    tick: Duration,
}

impl TeaAdapter {
    fn apply(&mut self, msg: Msg) -> Option<Cmd> {
        match self.inner.update(msg)? {
            Effect::FetchNames => Some(fetch_names_cmd(Arc::clone(&self.source))),
            Effect::ScheduleTick => Some(tick_cmd(self.tick)),
            Effect::Quit => Some(bubbletea_rs::quit()),
        }
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let session = SESSION.get_or_init(|| Session::from_config(&Config::default()));
        let mut adapter = TeaAdapter {
            inner: initial_model(session.board.clone()),
            source: Arc::clone(&session.source),
            tick: session.tick,
        };
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        adapter.inner.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        // first frame shows the counters without waiting a full period
        let cmd = adapter.apply(Msg::Tick {
            now_ms: wall_clock_ms(),
        });
        (adapter, cmd)
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(own) = msg.downcast_ref::<Msg>() {
            return self.apply(own.clone());
        }
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            // Normalize and handle global quit keys first for reliability across terminals:
            return match &km.key {
                KeyCode::Esc => Some(bubbletea_rs::quit()),
                KeyCode::Char('\u{1b}') | KeyCode::Char('\u{03}') => Some(bubbletea_rs::quit()),
                KeyCode::Char(ch) if km.modifiers.contains(KeyModifiers::CONTROL) => match ch {
                    'c' | 'C' => Some(bubbletea_rs::quit()),
                    'n' | 'N' => self.apply(Msg::KeyDown),
                    'p' | 'P' => self.apply(Msg::KeyUp),
                    'u' | 'U' => self.apply(Msg::ClearQuery),
                    _ => None,
                },
                KeyCode::Char(ch) => self.apply(Msg::Rune(*ch)),
                KeyCode::Enter => self.apply(Msg::KeyEnter),
                KeyCode::Backspace => self.apply(Msg::KeyBackspace),
                KeyCode::Up => self.apply(Msg::KeyUp),
                KeyCode::Down => self.apply(Msg::KeyDown),
                _ => None,
            };
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.apply(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        None
    }

    fn view(&self) -> String {
        self.inner.render_full()
    }
}

/// Runs the interactive view. Returns the link of the suggestion chosen with
/// Enter, or an empty string when the user quit.
pub async fn run(config: &Config) -> Result<String, String> {
    if SESSION.set(Session::from_config(config)).is_err() {
        debug!("interactive session already configured");
    }
    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = match builder.build() {
        Ok(p) => p,
        Err(e) => return Err(format!("failed to build program: {e:?}")),
    };
    let final_adapter = match program.run().await {
        Ok(fa) => fa,
        Err(e) => return Err(format!("program error: {e:?}")),
    };

    Ok(final_adapter.inner.exit_link.clone())
}

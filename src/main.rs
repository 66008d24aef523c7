use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;
use vocab_duel::{
    app::App,
    error::ValidationError,
    game::Cue,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    settings::{Settings, TimeLimit, VisualTheme},
};

/// vocabulary quiz tui: solo practice or a duel between friends
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Paste a themed JSON word list, get ten random words and judge whether you know each one. Play alone or as a turn-based or free-for-all duel."
)]
pub struct Cli {
    /// JSON word list to pre-fill the input screen with
    #[clap(short = 'w', long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// seconds per word: 10, 15, 20, 30, 45, 60 or 0 for no limit
    #[clap(short = 't', long, default_value_t = 30)]
    time_limit: u32,

    /// move to the next word on its own after a solo answer
    #[clap(long)]
    auto_advance: bool,

    /// never ring the terminal bell
    #[clap(long)]
    no_sound: bool,

    /// skip the fireworks on the results screen
    #[clap(long)]
    no_animations: bool,

    /// color theme
    #[clap(long, value_enum, default_value_t = VisualTheme::Default)]
    theme: VisualTheme,

    /// write logs to this file (level from RUST_LOG, default info)
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Initial settings for the session
    fn settings(&self) -> Result<Settings, ValidationError> {
        Ok(Settings {
            sound_enabled: !self.no_sound,
            animations_enabled: !self.no_animations,
            visual_theme: self.theme,
            time_limit: TimeLimit::try_from(self.time_limit)?,
            auto_advance: self.auto_advance,
        })
    }
}

fn load_words(path: &Path) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(text.trim_start_matches('\u{feff}').trim_end().to_string())
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let log_file = fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    let buffer = match &cli.words {
        Some(path) => match load_words(path) {
            Ok(text) => text,
            Err(err) => Cli::command()
                .error(ErrorKind::Io, format!("{}: {err}", path.display()))
                .exit(),
        },
        None => String::new(),
    };

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    info!(?settings, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings).with_buffer(buffer);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Paste(text) => app.on_paste(&text),
            AppEvent::Resize => {
                let size = terminal.size()?;
                app.resize(size.width, size.height);
            }
            AppEvent::Tick => {}
        }
        app.on_tick(runner.elapsed());
        ring(&app.take_cues())?;
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    info!("quit");
    Ok(())
}

/// Terminal bell for answer feedback; clicks stay silent
fn ring(cues: &[Cue]) -> io::Result<()> {
    if cues
        .iter()
        .any(|cue| matches!(cue, Cue::Correct | Cue::Incorrect))
    {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
    }
    Ok(())
}

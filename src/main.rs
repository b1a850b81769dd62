use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use piano_tiles::app::App;
use piano_tiles::games::{GameMode, GameSignal};
use piano_tiles::input::{handle_key, handle_mouse, InputResult};
use piano_tiles::scores::{FileScoreStore, HighScoreStore};
use piano_tiles::settings::Settings;
use piano_tiles::ui;
use piano_tiles::utils::{build_info, logging};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Target frame interval (about 60 frames per second).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    mode: Option<GameMode>,
    reset_scores: bool,
}

fn print_help() {
    println!("Piano Tiles - terminal rhythm game\n");
    println!("Usage: piano-tiles [options]\n");
    println!("Options:");
    println!("  --mode <classic|rush|simon>  Open a mode directly");
    println!("  --reset-scores               Clear all high scores and exit");
    println!("  --version                    Show version information");
    println!("  --help                       Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'piano-tiles --help' for usage.");
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--mode" => {
                let value = iter
                    .next()
                    .unwrap_or_else(|| usage_error("--mode needs a value"));
                options.mode = Some(
                    GameMode::parse(value)
                        .unwrap_or_else(|| usage_error(&format!("Unknown mode: {}", value))),
                );
            }
            "--reset-scores" => options.reset_scores = true,
            other => usage_error(&format!("Unknown option: {}", other)),
        }
    }
    options
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args);

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("{}", build_info::version_string());

    let mut store = FileScoreStore::open()?;
    if options.reset_scores {
        store.clear()?;
        println!("High scores cleared ({}).", store.path().display());
        return Ok(());
    }

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("could not load settings, using defaults: {}", e);
        Settings::default()
    });
    let bell_on_tap = settings.bell_on_tap;

    let mut app = App::new(settings, store);
    if let Some(mode) = options.mode {
        app.open_mode(mode);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, bell_on_tap);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileScoreStore>,
    bell_on_tap: bool,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let timeout = FRAME_INTERVAL.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(key, app, &mut rng) == InputResult::Quit {
                        app.should_quit = true;
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(mouse, app, size, &mut rng);
                }
                _ => {}
            }
        }

        if last_frame.elapsed() >= FRAME_INTERVAL {
            let dt_ms = last_frame.elapsed().as_secs_f64() * 1000.0;
            last_frame = Instant::now();
            app.tick(dt_ms, &mut rng);
        }

        for signal in app.drain_signals() {
            match signal {
                GameSignal::Tap { lane } => {
                    log::trace!("tap on lane {}", lane);
                    if bell_on_tap {
                        terminal.backend_mut().write_all(b"\x07")?;
                        terminal.backend_mut().flush()?;
                    }
                }
                GameSignal::PlayingChanged(playing) => {
                    log::debug!("playing: {}", playing);
                }
            }
        }
    }

    // Ctrl+C mid-game still saves the score
    app.back_to_menu();
    Ok(())
}

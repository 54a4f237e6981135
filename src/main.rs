use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use fishy_fortune::build_info;
use fishy_fortune::config::{GameConfig, TableSource};
use fishy_fortune::constants::{INPUT_POLL_MS, LOG_FILENAME};
use fishy_fortune::identity::{
    os_username, EnvIdentityProvider, IdentityResolver, PlayerIdentity, RetryPolicy,
};
use fishy_fortune::reward::{RarityTier, RewardEngine};
use fishy_fortune::session::{
    RoundEvent, SessionController, SessionPhase, TimedPresentation,
};
use fishy_fortune::share::OutboxShareTarget;
use fishy_fortune::stats::{FileStorage, KeyValueStorage, StatisticsStore};
use fishy_fortune::ui::{draw_ui, Hud};
use fishy_fortune::utils::logging::init_file_logger;
use fishy_fortune::utils::persistence::data_path;
use fishy_fortune::ConfigError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

type Controller<S> = SessionController<S, rand::rngs::ThreadRng, TimedPresentation>;

enum Command {
    Play,
    Stats,
}

fn config_error(e: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut command = Command::Play;
    let mut table_override: Option<String> = None;
    let mut name_override: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Fishy Fortune - cast a line, see what bites\n");
                println!("Usage: fishy-fortune [command] [options]\n");
                println!("Commands:");
                println!("  stats            Show your catch statistics and exit");
                println!("  --version        Show version information");
                println!("  --help           Show this help message\n");
                println!("Options:");
                println!("  --table <name>   Reward table: reference | nusantara");
                println!("  --name <name>    Name shown as the angler");
                std::process::exit(0);
            }
            "stats" => command = Command::Stats,
            "--table" | "-t" => match args.get(i + 1) {
                Some(name) => {
                    table_override = Some(name.clone());
                    i += 1;
                }
                None => {
                    eprintln!("--table needs a name (reference | nusantara)");
                    std::process::exit(1);
                }
            },
            "--name" => match args.get(i + 1) {
                Some(name) => {
                    name_override = Some(name.clone());
                    i += 1;
                }
                None => {
                    eprintln!("--name needs a value");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'fishy-fortune --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    init_file_logger(&data_path(LOG_FILENAME)?)?;

    let mut config = GameConfig::load_default().map_err(config_error)?;
    if let Some(name) = table_override {
        config.table = TableSource::Named(name);
    }
    let table = config.reward_table().map_err(config_error)?;
    let store = StatisticsStore::with_key(FileStorage::in_data_dir()?, &config.storage_key);

    if let Command::Stats = command {
        let stats = store.load();
        println!("Fish caught: {}", stats.total_catches);
        println!("Tokens:      {}", stats.total_tokens);
        return Ok(());
    }

    let table_name = match &config.table {
        TableSource::Named(name) => name.clone(),
        TableSource::Custom(_) => "custom".to_string(),
    };
    log::info!("Starting {} with the '{}' table", build_info::version_line(), table_name);

    let mut controller = SessionController::new(
        RewardEngine::new(table),
        store,
        rand::thread_rng(),
        TimedPresentation::new(config.presentation_duration()),
    );
    controller.on_round_resolved(|outcome| {
        if outcome.reward.rarity == RarityTier::Legendary {
            log::info!(
                "Legendary catch in round {}: {}",
                outcome.round,
                outcome.reward.name
            );
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(
        &mut terminal,
        &mut controller,
        &config,
        &table_name,
        name_override.as_deref(),
    );

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        log::error!("Game loop failed: {}", e);
    }
    result?;

    let stats = controller.statistics();
    println!(
        "Thanks for fishing! {} fish caught, {} tokens.",
        stats.total_catches, stats.total_tokens
    );
    Ok(())
}

/// Main loop: poll the presenter and identity, draw, then handle one key.
fn run<S: KeyValueStorage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<S>,
    config: &GameConfig,
    table_name: &str,
    name_override: Option<&str>,
) -> io::Result<()> {
    let mut identity = IdentityResolver::new(EnvIdentityProvider, RetryPolicy::default());
    if let Some(name) = name_override {
        identity.notify(PlayerIdentity::new(Some(name), os_username().as_deref()));
    }
    let mut share_target = OutboxShareTarget::in_data_dir()?;
    let mut status: Option<String> = None;
    let mut rounds: u64 = 0;

    let odds: Vec<(RarityTier, f64)> = controller
        .engine()
        .table()
        .tiers()
        .iter()
        .map(|group| (group.tier, group.weight))
        .collect();

    loop {
        let now = Instant::now();
        identity.poll(now);

        if let Some(signal) = controller.presenter_mut().poll(now) {
            if let Some(message) = describe(&controller.handle_signal(signal)) {
                status = Some(message);
            }
        }

        {
            let handle = identity.handle();
            let presenter = controller.presenter();
            let hud = Hud {
                phase: controller.phase(),
                stage: presenter.stage(now),
                progress: presenter.progress(now),
                last_result: controller.last_result(),
                statistics: controller.statistics(),
                player_name: identity.shown_name(),
                player_handle: &handle,
                table_name,
                odds: &odds,
                status: status.as_deref(),
                rounds,
            };
            terminal.draw(|frame| draw_ui(frame, &hud))?;
        }

        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };

        match key_event.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('F') => {
                let event = controller.start_round();
                if let RoundEvent::Started(_) = event {
                    rounds += 1;
                    status = None;
                }
                if let Some(message) = describe(&event) {
                    status = Some(message);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let RoundEvent::Reset = controller.reset_round() {
                    status = None;
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                status = Some(
                    match controller.share(&mut share_target, config.embed_url.as_deref()) {
                        Ok(()) => "Shared to the feed!".to_string(),
                        Err(e) => format!("Share failed: {}", e),
                    },
                );
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                if controller.phase() == SessionPhase::Presenting {
                    if let Some(signal) = controller.presenter_mut().interrupt("player quit") {
                        controller.handle_signal(signal);
                    }
                }
                return Ok(());
            }
            _ => {}
        }
    }
}

/// Footer message for events the player should hear about.
fn describe(event: &RoundEvent) -> Option<String> {
    match event {
        RoundEvent::Resolved(outcome) if !outcome.saved => {
            Some("Could not save statistics; progress kept for this session".to_string())
        }
        RoundEvent::Aborted { error, .. } => Some(format!("The line snapped: {}", error)),
        _ => None,
    }
}

// ============================================================================
// Articulate Chart - Démonstration TUI
// ============================================================================
// Parcourt des snapshots JSON et anime le graphique entre eux
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : résultats du worker → tick → rendu → clavier
// 3. Async dans sync : un runtime tokio dans un thread worker
// 4. Channels : commandes vers le worker, résultats vers l'UI
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use articulate_chart::animation::Easing;
use articulate_chart::app::App;
use articulate_chart::config::ChartConfig;
use articulate_chart::loader::read_snapshot;
use articulate_chart::models::RawInput;
use articulate_chart::ui::{events::EventHandler, render};

// ============================================================================
// Ligne de commande
// ============================================================================

/// Graphique boursier animé dans le terminal
#[derive(Debug, Parser)]
#[command(name = "articulate-chart", version, about)]
struct Cli {
    /// Snapshots JSON ({"symbol": ..., "points": [{"t": ..., "v": ...}]})
    #[arg(required = true)]
    snapshots: Vec<PathBuf>,

    /// Fichier de configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Durée d'une transition en millisecondes
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Courbe d'easing : linear, ease-in, ease-out, ease-in-out
    #[arg(long)]
    easing: Option<Easing>,
}

impl Cli {
    /// Défauts, puis fichier, puis options de la ligne de commande
    fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_file(path)?,
            None => ChartConfig::default(),
        };
        if let Some(duration_ms) = self.duration_ms {
            config.animation_duration_ms = duration_ms;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
        Ok(config)
    }
}

// ============================================================================
// Commandes et résultats du worker
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum LoaderCommand {
    /// Lire le snapshot `path` (position `index` dans la liste)
    Load { path: PathBuf, index: usize },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum LoaderResult {
    Loaded { index: usize, data: RawInput },
    Failed { index: usize, error: String },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux : ~/.local/share/articulate-chart/logs/articulate-chart.log
/// - macOS : ~/Library/Application Support/articulate-chart/logs/articulate-chart.log
/// - Sinon : ./logs/articulate-chart.log
///
/// # Utilisation
/// ```bash
/// RUST_LOG=articulate_chart=trace articulate-chart data/*.json
/// ```
fn init_logging() -> Result<PathBuf> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("articulate-chart").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "articulate-chart.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "articulate_chart=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(log_dir)
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    }

    info!(snapshots = cli.snapshots.len(), "Articulate Chart starting up");

    let config = cli.chart_config()?;
    debug!(?config, "Chart configuration resolved");

    let (command_tx, command_rx) = mpsc::channel::<LoaderCommand>();
    let (result_tx, result_rx) = mpsc::channel::<LoaderResult>();

    // Le runtime est créé avant le terminal : une erreur ici s'affiche normalement
    let runtime = tokio::runtime::Runtime::new().context("Impossible de créer le runtime tokio")?;
    info!("Spawning background loader thread");
    spawn_background_worker(runtime, command_rx, result_tx);

    let events = EventHandler::new(config.frame_interval());
    let mut app = App::new(cli.snapshots, config);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    request_current(&mut app, &command_tx);

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Thread + async runtime
// - std::thread::spawn() : crée un thread OS
// - runtime.block_on() bloque le worker, pas l'UI
// - Le thread se termine quand command_tx est droppé
// ============================================================================

fn spawn_background_worker(
    runtime: tokio::runtime::Runtime,
    command_rx: mpsc::Receiver<LoaderCommand>,
    result_tx: mpsc::Sender<LoaderResult>,
) {
    std::thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            debug!(?command, "Worker received command");

            let LoaderCommand::Load { path, index } = command;
            let result = match runtime.block_on(read_snapshot(&path)) {
                Ok(data) => LoaderResult::Loaded { index, data },
                Err(e) => {
                    error!(path = %path.display(), error = ?e, "Failed to read snapshot");
                    LoaderResult::Failed {
                        index,
                        error: format!("{:#}", e),
                    }
                }
            };

            if result_tx.send(result).is_err() {
                break;
            }
        }
        info!("Worker thread exiting (channel closed)");
    });
}

/// Demande au worker de lire le snapshot courant
fn request_current(app: &mut App, command_tx: &mpsc::Sender<LoaderCommand>) {
    let Some(path) = app.current_snapshot().map(PathBuf::from) else {
        return;
    };
    let index = app.current_index();

    app.start_loading(Some(format!("Lecture de {}...", path.display())));
    if command_tx.send(LoaderCommand::Load { path, index }).is_err() {
        error!("Worker thread disconnected!");
        app.apply_failed(index, "Le worker de chargement est arrêté".to_string());
    }
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker (configure + animate)
//   1. Update : avance l'animation
//   2. Render : dessine l'interface
//   3. Input : attend une touche au plus une frame
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<LoaderCommand>,
    result_rx: &mpsc::Receiver<LoaderResult>,
) -> Result<()> {
    while app.is_running() {
        // 0. RÉSULTATS
        loop {
            match result_rx.try_recv() {
                Ok(LoaderResult::Loaded { index, data }) => {
                    app.apply_loaded(index, &data, Instant::now());
                }
                Ok(LoaderResult::Failed { index, error }) => app.apply_failed(index, error),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("Worker thread disconnected");
                    break;
                }
            }
        }

        // 1. UPDATE
        app.tick(Instant::now());

        // 2. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 3. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event, command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(
    app: &mut App,
    event: articulate_chart::ui::events::Event,
    command_tx: &mpsc::Sender<LoaderCommand>,
) {
    use articulate_chart::ui::events::{
        is_animate_event, is_easing_event, is_next_event, is_previous_event, is_quit_event,
        is_reload_event, Event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_next_event(&event) => {
            app.cancel_quit();
            if let Some(index) = app.next_snapshot() {
                info!(index, "User selected next snapshot");
                request_current(app, command_tx);
            }
        }

        Event::Key(_) if is_previous_event(&event) => {
            app.cancel_quit();
            if let Some(index) = app.previous_snapshot() {
                info!(index, "User selected previous snapshot");
                request_current(app, command_tx);
            }
        }

        Event::Key(_) if is_reload_event(&event) => {
            app.cancel_quit();
            info!(index = app.current_index(), "User requested reload");
            request_current(app, command_tx);
        }

        Event::Key(_) if is_animate_event(&event) => {
            app.cancel_quit();
            debug!("User requested animation");
            app.animate(Instant::now());
        }

        Event::Key(_) if is_easing_event(&event) => {
            app.cancel_quit();
            app.cycle_easing(Instant::now());
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

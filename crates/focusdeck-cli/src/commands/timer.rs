use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Subcommand};
use focusdeck_core::error::EnvironmentError;
use focusdeck_core::reminder::{AlertCue, AlertSink, NoWakeLock, ReminderManager, WakeLockProvider};
use focusdeck_core::timer::{
    initial_countdown_minutes, parse_minutes_input, NullDisplay, Preset, TickSchedule, TimerDisplay, TimerEngine, TimerMode,
    TimerState,
};
use focusdeck_core::{Config, Event};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::terminal::{InhibitWakeLock, TerminalAlerts, TerminalDisplay, WakeLockEvent};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer interactively (commands are read from stdin)
    Run(SessionArgs),
    /// Tick the timer without waiting and print what happened as JSON
    Simulate {
        #[command(flatten)]
        session: SessionArgs,
        /// Number of one-second ticks to run
        #[arg(long, default_value = "60")]
        ticks: u64,
    },
}

#[derive(Args)]
pub struct SessionArgs {
    /// countdown, stopwatch or clock
    #[arg(long, default_value = "countdown")]
    mode: TimerMode,
    /// Countdown length in minutes (defaults to the configured value;
    /// anything below one minute falls back to 25)
    #[arg(long)]
    minutes: Option<String>,
    /// Enable interval reminders from the start
    #[arg(long)]
    reminders: bool,
    /// Seconds between reminders (defaults to the configured value)
    #[arg(long)]
    interval: Option<u64>,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        TimerAction::Run(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_interactive(args, config))
        }
        TimerAction::Simulate { session, ticks } => {
            let report = simulate(&session, &config, ticks);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn build_engine<D, A, W>(
    display: D,
    alerts: A,
    wake_lock: W,
    args: &SessionArgs,
    config: &Config,
) -> TimerEngine<D, ReminderManager<A, W>>
where
    D: TimerDisplay,
    A: AlertSink,
    W: WakeLockProvider,
{
    let interval = args.interval.unwrap_or(config.reminders.interval_secs);
    let reminders = ReminderManager::with_interval(alerts, wake_lock, interval);
    let minutes = args
        .minutes
        .as_deref()
        .map_or(config.timer.default_countdown_minutes, initial_countdown_minutes);
    let mut engine =
        TimerEngine::new(display, reminders, minutes).with_presets(config.timer.presets());
    engine.switch_mode(args.mode);
    if args.reminders || config.reminders.enabled {
        engine.toggle_reminders();
    }
    engine
}

// ── Simulation ───────────────────────────────────────────────────────

#[derive(Default)]
struct AlertLog {
    played: Vec<AlertCue>,
}

impl AlertSink for AlertLog {
    fn play(&mut self, cue: AlertCue) -> Result<(), EnvironmentError> {
        self.played.push(cue);
        Ok(())
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub events: Vec<Event>,
    pub alerts: Vec<AlertCue>,
    pub elapsed_secs: u64,
    pub state: TimerState,
}

fn simulate(args: &SessionArgs, config: &Config, ticks: u64) -> SimulationReport {
    let mut engine = build_engine(NullDisplay, AlertLog::default(), NoWakeLock, args, config);
    let mut events: Vec<Event> = engine.start().into_iter().collect();
    for _ in 0..ticks {
        if engine.schedule() == TickSchedule::Stopped {
            break;
        }
        events.extend(engine.tick());
    }
    SimulationReport {
        events,
        alerts: engine.reminders().alerts().played.clone(),
        elapsed_secs: engine.elapsed_seconds(),
        state: engine.state().clone(),
    }
}

// ── Interactive session ──────────────────────────────────────────────

/// One line of stdin input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Toggle,
    Start,
    Pause,
    Reset,
    Mode(TimerMode),
    Minutes(String),
    Preset(Preset),
    Reminders,
    Visible(bool),
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or("").to_ascii_lowercase();
        let arg = words.collect::<Vec<_>>().join(" ");

        let command = match verb.as_str() {
            "" | "t" | "toggle" => Command::Toggle,
            "s" | "start" => Command::Start,
            "p" | "pause" => Command::Pause,
            "r" | "reset" => Command::Reset,
            "m" | "mode" => Command::Mode(arg.parse()?),
            "min" | "minutes" => Command::Minutes(arg),
            "preset" => Command::Preset(arg.parse()?),
            "remind" | "reminders" => Command::Reminders,
            "hide" => Command::Visible(false),
            "show" => Command::Visible(true),
            "status" => Command::Status,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (try 'help')")),
        };
        Ok(command)
    }
}

const HELP: &str = "\
commands:
  <enter> | toggle     start or pause
  start | pause | reset
  mode <countdown|stopwatch|clock>
  min <minutes>        set the countdown length
  preset <pomodoro|short|long>
  remind               toggle interval reminders
  hide | show          simulate the window losing or regaining focus
  status               print the timer state as JSON
  quit";

type LiveEngine = TimerEngine<TerminalDisplay, ReminderManager<TerminalAlerts, InhibitWakeLock>>;

fn one_second_ticker() -> Interval {
    let period = Duration::from_secs(1);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run_interactive(
    args: SessionArgs,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (wake_tx, mut wake_rx) = mpsc::unbounded_channel();
    let mut engine = build_engine(
        TerminalDisplay::new(),
        TerminalAlerts::new(config.audio.clone()),
        InhibitWakeLock::new(wake_tx),
        &args,
        &config,
    );
    info!(mode = %engine.mode(), "Timer ready, type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut epoch = engine.schedule_epoch();
    let mut ticker = one_second_ticker();

    loop {
        if engine.schedule_epoch() != epoch {
            epoch = engine.schedule_epoch();
            ticker = one_second_ticker();
        }
        let armed = engine.schedule() != TickSchedule::Stopped;

        tokio::select! {
            _ = ticker.tick(), if armed => {
                if let Some(event) = engine.tick() {
                    report(&event);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle(&mut engine, command),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(event) = wake_rx.recv() => match event {
                WakeLockEvent::Resolved(result) => engine.reminders_mut().wake_lock_resolved(result),
                WakeLockEvent::Lost(handle) => engine.reminders_mut().wake_lock_lost(handle),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    engine.pause();
    if engine.reminders().is_enabled() {
        engine.toggle_reminders();
    }
    println!();
    debug!("Timer session closed");
    Ok(())
}

fn handle(engine: &mut LiveEngine, command: Command) {
    let event = match command {
        Command::Toggle => engine.toggle(),
        Command::Start => engine.start(),
        Command::Pause => engine.pause(),
        Command::Reset => engine.reset(),
        Command::Mode(mode) => engine.switch_mode(mode),
        Command::Minutes(raw) => match parse_minutes_input(&raw) {
            Ok(minutes) => engine.set_countdown_minutes(minutes),
            Err(e) => {
                warn!("{e}");
                None
            }
        },
        Command::Preset(preset) => engine.apply_preset(preset),
        Command::Reminders => {
            let enabled = engine.toggle_reminders();
            info!(enabled, "Reminders toggled");
            None
        }
        Command::Visible(visible) => {
            engine.reminders_mut().visibility_changed(visible);
            None
        }
        Command::Status => Some(engine.snapshot()),
        Command::Help => {
            println!("\n{HELP}");
            None
        }
        Command::Quit => None,
    };
    if let Some(event) = event {
        report(&event);
    }
}

fn report(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("\n{json}"),
        Err(e) => warn!("Could not encode event: {e}"),
    }
}

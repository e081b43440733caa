//! Interactive driver: parses commands, applies them to the view model and
//! redraws the dashboard while the counters animate.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use mva_core::{FiscalYear, PhaseInSchedule, ViewModel, view_model::InputError};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::logging;
use crate::utils::{ParsePriceError, parse_price};
use crate::views::{self, status_bar};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs a value")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a year between 2025 and 2028")]
    InvalidYear(String),

    #[error(transparent)]
    InvalidPrice(#[from] ParsePriceError),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Price(Decimal),
    Preset(Decimal),
    Year(FiscalYear),
    Nudge(i64),
    Show,
    LogLevel(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let command = match word.to_lowercase().as_str() {
            "price" | "p" => Self::Price(parse_price(argument("price")?)?),
            "preset" => Self::Preset(parse_price(argument("preset")?)?),
            "year" | "y" => {
                let raw = argument("year")?;
                Self::Year(
                    FiscalYear::parse(raw).ok_or_else(|| CommandError::InvalidYear(raw.into()))?,
                )
            }
            "+" => Self::Nudge(1),
            "-" => Self::Nudge(-1),
            "show" | "s" => Self::Show,
            "log" => Self::LogLevel(argument("log")?.to_string()),
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => {
                // A bare year or price is accepted as shorthand.
                if let Some(year) = FiscalYear::parse(other) {
                    Self::Year(year)
                } else if let Ok(price) = parse_price(line) {
                    Self::Price(price)
                } else {
                    return Err(CommandError::Unknown(other.to_string()));
                }
            }
        };
        Ok(Some(command))
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; redraw once the counters settle.
    Updated,
    /// Print this text and carry on.
    Message(String),
    Quit,
}

pub struct App {
    vm: ViewModel,
    schedule: PhaseInSchedule,
    frame: Duration,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let vm = ViewModel::new(settings.view_model_options())
            .context("invalid start-up settings")?;

        Ok(Self {
            vm,
            schedule: PhaseInSchedule::statutory(),
            frame: settings.frame_interval(),
        })
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.vm
    }

    pub fn render(&self) -> String {
        views::render_dashboard(&self.vm, &self.schedule)
    }

    pub fn help() -> String {
        status_bar::build_status_bar(&status_bar::hints::ALL)
    }

    /// Applies one command. Input errors are reported, never fatal.
    pub fn apply(
        &mut self,
        command: Command,
    ) -> Outcome {
        debug!(?command, "applying command");

        let result: Result<(), InputError> = match command {
            Command::Price(value) => self.vm.set_base_price(value).map(|_| ()),
            Command::Preset(value) => self.vm.apply_preset(value).map(|_| ()),
            Command::Nudge(steps) => self.vm.nudge(steps).map(|_| ()),
            Command::Year(year) => {
                self.vm.select_year(year);
                Ok(())
            }
            Command::Show => return Outcome::Message(self.render()),
            Command::LogLevel(level) => {
                return match logging::set_log_level(&level) {
                    Ok(()) => Outcome::Message(format!("log level set to '{level}'")),
                    Err(e) => Outcome::Message(e.to_string()),
                };
            }
            Command::Help => return Outcome::Message(Self::help()),
            Command::Quit => return Outcome::Quit,
        };

        match result {
            Ok(()) => Outcome::Updated,
            Err(e) => {
                warn!(error = %e, "input rejected");
                Outcome::Message(e.to_string())
            }
        }
    }

    /// Runs the interactive loop until `quit` or end of input.
    ///
    /// Input lines and animation frames are interleaved on one task: while
    /// any counter is moving, each frame redraws the counter line in place,
    /// and the full dashboard is printed once everything has settled.
    pub async fn run<R, W>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut frames = tokio::time::interval(self.frame);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        writeln!(out, "{}", self.render())?;
        writeln!(out, "{}", Self::help())?;
        out.flush()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    let was_settled = self.vm.is_settled();
                    let outcome = match Command::parse(&line) {
                        Ok(Some(command)) => self.apply(command),
                        Ok(None) => continue,
                        Err(e) => Outcome::Message(e.to_string()),
                    };
                    match outcome {
                        Outcome::Quit => break,
                        Outcome::Message(text) => writeln!(out, "{text}")?,
                        Outcome::Updated if self.vm.is_settled() => {
                            writeln!(out, "{}", self.render())?;
                        }
                        Outcome::Updated if was_settled => {
                            // The interval sat idle; restart it from now.
                            frames.reset();
                            last_frame = Instant::now();
                        }
                        Outcome::Updated => {}
                    }
                    out.flush()?;
                }
                _ = frames.tick(), if !self.vm.is_settled() => {
                    let now = Instant::now();
                    self.vm.tick(now.saturating_duration_since(last_frame));
                    last_frame = now;

                    write!(out, "\r{}", views::render_counters(&self.vm))?;
                    if self.vm.is_settled() {
                        writeln!(out)?;
                        writeln!(out, "{}", self.render())?;
                    }
                    out.flush()?;
                }
            }
        }

        info!(revision = self.vm.revision(), "calculator closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;

    fn app() -> App {
        App::new(&Settings {
            animation_ms: 0,
            ..Settings::default()
        })
        .unwrap()
    }

    // =========================================================================
    // Command::parse tests
    // =========================================================================

    #[test]
    fn parse_recognises_every_command() {
        assert_eq!(
            Command::parse("price 750 000").unwrap(),
            Some(Command::Price(dec!(750000)))
        );
        assert_eq!(
            Command::parse("preset 1.5M").unwrap(),
            Some(Command::Preset(dec!(1500000)))
        );
        assert_eq!(
            Command::parse("year 2027").unwrap(),
            Some(Command::Year(FiscalYear::Y2027))
        );
        assert_eq!(Command::parse("+").unwrap(), Some(Command::Nudge(1)));
        assert_eq!(Command::parse("-").unwrap(), Some(Command::Nudge(-1)));
        assert_eq!(Command::parse("show").unwrap(), Some(Command::Show));
        assert_eq!(
            Command::parse("log debug").unwrap(),
            Some(Command::LogLevel("debug".into()))
        );
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn parse_accepts_bare_year_and_price() {
        assert_eq!(
            Command::parse("2028").unwrap(),
            Some(Command::Year(FiscalYear::Y2028))
        );
        assert_eq!(
            Command::parse("1M").unwrap(),
            Some(Command::Price(dec!(1000000)))
        );
    }

    #[test]
    fn parse_ignores_blank_lines() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn parse_reports_bad_input() {
        assert!(matches!(
            Command::parse("price"),
            Err(CommandError::MissingArgument("price"))
        ));
        assert!(matches!(
            Command::parse("year 2030"),
            Err(CommandError::InvalidYear(_))
        ));
        assert!(matches!(
            Command::parse("price lots"),
            Err(CommandError::InvalidPrice(_))
        ));
        assert!(matches!(
            Command::parse("price 79228162514264337593543950335m"),
            Err(CommandError::InvalidPrice(ParsePriceError::TooLarge(_)))
        ));
        assert!(matches!(
            Command::parse("fly away"),
            Err(CommandError::Unknown(_))
        ));
    }

    // =========================================================================
    // App::apply tests
    // =========================================================================

    #[test]
    fn apply_price_updates_view_model() {
        let mut app = app();

        let outcome = app.apply(Command::Price(dec!(300000)));

        assert_eq!(outcome, Outcome::Updated);
        assert_eq!(app.view_model().projection().total_increase, dec!(75000));
    }

    #[test]
    fn apply_reports_rejected_input() {
        let mut app = app();

        let outcome = app.apply(Command::Price(dec!(-10)));

        assert_eq!(
            outcome,
            Outcome::Message("price cannot be negative (got -10)".into())
        );
        assert_eq!(app.view_model().revision(), 0);
    }

    #[test]
    fn apply_unknown_preset_is_reported() {
        let mut app = app();

        let outcome = app.apply(Command::Preset(dec!(750000)));

        assert!(matches!(outcome, Outcome::Message(m) if m.contains("preset")));
    }

    #[test]
    fn apply_year_changes_selection_only() {
        let mut app = app();

        app.apply(Command::Year(FiscalYear::Y2025));

        assert_eq!(app.view_model().selection(), FiscalYear::Y2025);
        assert_eq!(app.view_model().revision(), 0);
    }

    #[test]
    fn apply_quit_stops() {
        assert_eq!(app().apply(Command::Quit), Outcome::Quit);
    }

    // =========================================================================
    // App::run tests
    // =========================================================================

    #[tokio::test]
    async fn run_processes_commands_until_quit() {
        let mut app = app();
        let input: &[u8] = b"price 300000\nyear 2028\nbogus\nquit\nprice 900000\n";
        let mut out = Vec::new();

        app.run(input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PRISOVERSIKT 2028"));
        assert!(text.contains("unknown command 'bogus'"));
        assert_eq!(app.view_model().base_price().value(), dec!(300000));
    }

    #[tokio::test]
    async fn run_stops_at_end_of_input() {
        let mut app = app();
        let input: &[u8] = b"preset 2M\n";
        let mut out = Vec::new();

        app.run(input, &mut out).await.unwrap();

        assert_eq!(app.view_model().base_price().value(), dec!(2000000));
    }

    #[tokio::test]
    async fn run_animates_until_settled() {
        let mut app = App::new(&Settings {
            animation_ms: 30,
            frame_ms: 5,
            ..Settings::default()
        })
        .unwrap();
        let (mut writer, reader) = tokio::io::duplex(256);
        writer.write_all(b"price 1M\n").await.unwrap();
        let quitter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            writer.write_all(b"quit\n").await.unwrap();
        });
        let mut out = Vec::new();

        app.run(BufReader::new(reader), &mut out).await.unwrap();
        quitter.await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(app.view_model().is_settled());
        assert!(text.contains("\r2025: 1\u{a0}000\u{a0}000 kr"));
    }

    #[tokio::test]
    async fn run_eases_in_steps_after_idle_period() {
        let mut app = App::new(&Settings {
            animation_ms: 300,
            frame_ms: 10,
            ..Settings::default()
        })
        .unwrap();
        let (mut writer, reader) = tokio::io::duplex(256);
        let typist = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(400)).await;
            writer.write_all(b"price 2M\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(600)).await;
            writer.write_all(b"quit\n").await.unwrap();
        });
        let mut out = Vec::new();

        app.run(BufReader::new(reader), &mut out).await.unwrap();
        typist.await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let frames = text.matches("\r2025: ").count();
        assert!(frames >= 10, "only {frames} frames drawn");
        assert!(app.view_model().is_settled());
        assert!(text.contains("\r2025: 2\u{a0}000\u{a0}000 kr"));
    }
}

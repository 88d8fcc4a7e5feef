//! # Console
//!
//! Reads one command per line and runs it against the [`Kiosk`], then
//! prints the current screen.
//!
//! ```text
//!   stdin line ──► Command::parse ──► Kiosk method ──► render()
//!                      │
//!                      └── unknown ──► help text
//! ```
//!
//! On the home screen a bare line that is not a command is taken as a
//! product code, the same as typing into the entry field and pressing
//! search. While a scan waits on a reader device, any typed line stops it.

use std::str::FromStr;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::kiosk::Kiosk;
use crate::state::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Camera,
    Scan,
    Rescan,
    Close,
    Search(Option<String>),
    Add,
    Remove(usize),
    Clear,
    Purchase,
    Ok,
    Logout,
    Go(Route),
    Show,
    Help,
    Quit,
    Code(String),
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Show,
            "start" => Command::Start,
            "camera" => Command::Camera,
            "scan" => Command::Scan,
            "rescan" => Command::Rescan,
            "close" => Command::Close,
            "search" if rest.is_empty() => Command::Search(None),
            "search" => Command::Search(Some(rest.to_string())),
            "add" => Command::Add,
            "remove" => {
                let position = rest
                    .parse()
                    .map_err(|_| format!("remove needs a line number, got {rest:?}"))?;
                Command::Remove(position)
            }
            "clear" => Command::Clear,
            "purchase" | "buy" => Command::Purchase,
            "ok" => Command::Ok,
            "logout" | "finish" => Command::Logout,
            "go" => Command::Go(rest.parse()?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ if rest.is_empty() => Command::Code(word.to_string()),
            _ => return Err(format!("unknown command: {word}")),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  start            start shopping (welcome screen)
  camera           open the barcode reader
  scan             read the next barcode
  rescan           discard the scanned code and scan again
  close            close the barcode reader
  search [code]    look up a product (or type the code on its own)
  add              add the shown product to the list
  remove <n>       remove line n from the list
  clear            empty the list
  purchase         buy everything on the list
  ok               dismiss the purchase confirmation
  logout           finish shopping
  go <path>        open /, /welcome or /home
  show             redraw the screen
  quit             leave the kiosk";

/// What the console loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runs one command. Failures have already been reported by the kiosk.
pub async fn execute(kiosk: &mut Kiosk, command: Command) -> Flow {
    debug!(?command, "Console command");
    let outcome = match command {
        Command::Start => kiosk.start_shopping().await.map(drop),
        Command::Camera => kiosk.open_camera(),
        Command::Scan => kiosk.scan().await.map(drop),
        Command::Rescan => kiosk.rescan(),
        Command::Close => {
            kiosk.close_camera();
            Ok(())
        }
        Command::Search(Some(code)) | Command::Code(code) => {
            kiosk.set_search_code(&code);
            kiosk.search().await.map(drop)
        }
        Command::Search(None) => kiosk.search().await.map(drop),
        Command::Add => {
            if !kiosk.add_to_cart() {
                println!("Search for a product first.");
            }
            Ok(())
        }
        Command::Remove(position) => kiosk.remove_line(position).map(drop),
        Command::Clear => {
            kiosk.clear_list();
            Ok(())
        }
        Command::Purchase => kiosk.purchase().await.map(drop),
        Command::Ok => {
            kiosk.close_modal();
            Ok(())
        }
        Command::Logout => {
            kiosk.logout();
            Ok(())
        }
        Command::Go(route) => kiosk.navigate(route).await,
        Command::Show => Ok(()),
        Command::Help => {
            println!("{HELP}");
            return Flow::Continue;
        }
        Command::Quit => return Flow::Exit,
    };

    if let Err(e) = outcome {
        debug!(error = %e, "Command did not complete");
    }
    Flow::Continue
}

type ConsoleRead = JoinHandle<std::io::Result<(usize, String)>>;

fn read_console() -> ConsoleRead {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|n| (n, line))
    })
}

/// Standard input, one line at a time.
///
/// A read can stay in flight across commands: while a scan is pending the
/// console keeps listening, and a line typed meanwhile stops the scan and
/// is then run as the next command.
#[derive(Default)]
struct Console {
    inflight: Option<ConsoleRead>,
    typed: Option<String>,
}

impl Console {
    /// Next line, or `None` at end of input.
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        if let Some(line) = self.typed.take() {
            return Ok(Some(line));
        }
        let read = self.inflight.take().unwrap_or_else(read_console);
        let (n, line) = read.await??;
        Ok((n > 0).then_some(line))
    }

    /// Completes once a line is typed; the line is kept for `next_line`.
    async fn interrupted(&mut self) {
        let read = self.inflight.get_or_insert_with(read_console);
        let result = read.await;
        self.inflight = None;
        match result {
            Ok(Ok((n, line))) if n > 0 => self.typed = Some(line),
            _ => std::future::pending::<()>().await,
        }
    }
}

/// Console loop over standard input.
pub async fn run(kiosk: &mut Kiosk) -> anyhow::Result<()> {
    kiosk.launch().await.ok();
    println!("{}", kiosk.render());
    println!("Type \"help\" for commands.");

    let mut console = Console::default();
    while let Some(line) = console.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Bad console input");
                println!("{e}\n\n{HELP}");
                continue;
            }
        };

        // A reader on stdin gets the next line itself.
        let shares_console = kiosk.scanner().is_some_and(|s| s.shares_console());
        if command == Command::Scan && !shares_console {
            println!("Scanning... type any command to stop.");
            if let Err(e) = kiosk.scan_until(console.interrupted()).await {
                debug!(error = %e, "Scan did not complete");
            }
        } else if execute(kiosk, command).await == Flow::Exit {
            break;
        }
        println!("{}", kiosk.render());
    }

    debug!("Console input closed");
    kiosk.close_camera();
    Ok(())
}

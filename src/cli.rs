//! Command-line arguments and the forge session shared by both binaries

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::data::TableSet;
use crate::pipeline::{forge_enhanced, forge_local, Services};
use crate::render::style::to_ansi;
use crate::render::{banner, clear_screen, farewell, interrupted, print_lines, prompt, BannerKind};

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Forge random D&D magic items in the terminal")]
pub struct Args {
    /// Keep forging: Enter forges another item, `q` quits
    #[arg(short, long)]
    pub interactive: bool,

    /// Seed for reproducible items
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of items to forge in one-shot mode
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Which pipeline a session runs
#[derive(Clone, Copy)]
pub enum Forge<'a> {
    Local,
    Enhanced(Services<'a>),
}

impl Forge<'_> {
    fn banner_kind(&self) -> BannerKind {
        match self {
            Forge::Local => BannerKind::Local,
            Forge::Enhanced(_) => BannerKind::Enhanced,
        }
    }
}

/// What the user chose at the forge prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Forge,
    Quit,
    Interrupted,
}

/// Where the interactive loop reads its next action from
pub trait PromptInput {
    fn next_action(&mut self) -> io::Result<PromptAction>;
}

/// Line input: Enter forges, a line starting with `q` or EOF quits
pub struct LineInput<R>(pub R);

impl<R: BufRead> PromptInput for LineInput<R> {
    fn next_action(&mut self) -> io::Result<PromptAction> {
        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(PromptAction::Quit);
        }
        if line.trim().to_lowercase().starts_with('q') {
            Ok(PromptAction::Quit)
        } else {
            Ok(PromptAction::Forge)
        }
    }
}

/// Single key presses from the terminal, read in raw mode so Ctrl-C
/// arrives as a key instead of killing the process
pub struct KeyInput;

impl KeyInput {
    fn read_action() -> io::Result<PromptAction> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Only handle key press events, not releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('c') if ctrl => return Ok(PromptAction::Interrupted),
                KeyCode::Char('d') if ctrl => return Ok(PromptAction::Quit),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(PromptAction::Quit),
                KeyCode::Enter => return Ok(PromptAction::Forge),
                _ => {}
            }
        }
    }
}

impl PromptInput for KeyInput {
    fn next_action(&mut self) -> io::Result<PromptAction> {
        enable_raw_mode()?;
        let action = Self::read_action();
        disable_raw_mode()?;
        action
    }
}

/// Source of randomness for a session
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

struct Session<'a> {
    config: &'a Config,
    tables: &'a TableSet,
    forge: Forge<'a>,
    rng: StdRng,
}

impl Session<'_> {
    fn forge_one(&mut self, out: &mut impl Write) -> io::Result<()> {
        match self.forge {
            Forge::Local => forge_local(self.config, self.tables, &mut self.rng, out).map(|_| ()),
            Forge::Enhanced(services) => {
                forge_enhanced(self.config, self.tables, services, &mut self.rng, out).map(|_| ())
            }
        }
    }
}

/// Run a one-shot or interactive session
pub fn run_session(
    args: &Args,
    config: &Config,
    tables: &TableSet,
    forge: Forge<'_>,
    input: &mut impl PromptInput,
    out: &mut impl Write,
) -> io::Result<()> {
    let kind = forge.banner_kind();
    let mut session = Session {
        config,
        tables,
        forge,
        rng: session_rng(args.seed),
    };

    if !args.interactive {
        print_lines(out, &banner(kind))?;
        for _ in 0..args.count.max(1) {
            session.forge_one(out)?;
        }
        return Ok(());
    }

    clear_screen(out)?;
    print_lines(out, &banner(kind))?;

    let closing = loop {
        write!(out, "{}", to_ansi(&prompt(kind)))?;
        out.flush()?;

        match input.next_action()? {
            PromptAction::Forge => {
                clear_screen(out)?;
                print_lines(out, &banner(kind))?;
                session.forge_one(out)?;
            }
            PromptAction::Quit => break farewell(kind),
            PromptAction::Interrupted => {
                log::info!("Session interrupted");
                break interrupted();
            }
        }
    };

    writeln!(out)?;
    print_lines(out, &[closing])
}

/// Run a session on the process's stdin and stdout. A terminal gets key
/// input; piped stdin is read line by line.
pub fn run_on_terminal(args: &Args, config: &Config, tables: &TableSet, forge: Forge<'_>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if args.interactive && stdin.is_terminal() {
        run_session(args, config, tables, forge, &mut KeyInput, &mut stdout)
    } else {
        run_session(args, config, tables, forge, &mut LineInput(stdin.lock()), &mut stdout)
    }
}

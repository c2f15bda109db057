use clap::{Parser, Subcommand};
use podwheel::config;
use podwheel::sys::server::Command;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "podwheel-ctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running podwheel (defaults to the configured one)
    #[arg(short, long)]
    socket: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the window
    Show,
    /// Hide the window
    Hide,
    /// Turn the wheel clockwise
    Cw {
        #[arg(default_value_t = 1)]
        steps: usize,
    },
    /// Turn the wheel counter-clockwise
    Ccw {
        #[arg(default_value_t = 1)]
        steps: usize,
    },
    /// Press the centre button
    Select,
    /// Press the menu button
    Menu,
    /// Press play/pause
    Play,
}

impl Commands {
    fn lines(&self) -> Vec<Command> {
        match self {
            Self::Show => vec![Command::Show],
            Self::Hide => vec![Command::Hide],
            Self::Cw { steps } => vec![Command::Clockwise; *steps],
            Self::Ccw { steps } => vec![Command::CounterClockwise; *steps],
            Self::Select => vec![Command::Select],
            Self::Menu => vec![Command::Menu],
            Self::Play => vec![Command::PlayPause],
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let socket = cli
        .socket
        .unwrap_or_else(|| config::load_or_default().socket_path);
    send_commands(&socket, &cli.command.lines())
}

fn send_commands(socket: &Path, commands: &[Command]) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to podwheel at {}: {}. Is podwheel running?",
            socket.display(),
            e
        )
    })?;

    for command in commands {
        writeln!(stream, "{}", command)?;
    }
    Ok(())
}

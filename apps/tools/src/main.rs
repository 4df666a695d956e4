use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::protocol::{Ack, PositionReply};
use url::Url;

/// Command-line client for a running captor server.
#[derive(Parser, Debug)]
#[command(name = "captorctl", version)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:5005")]
    server: Url,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Health,
    Pos,
    Capture {
        /// Seconds to wait before sampling, 0-30.
        #[arg(long)]
        delay: Option<u32>,
    },
    Move {
        #[arg(allow_hyphen_values = true)]
        dx: i64,
        #[arg(allow_hyphen_values = true)]
        dy: i64,
    },
    Click {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        y: i64,
        #[arg(long, default_value = "left")]
        button: String,
        #[arg(long)]
        double: bool,
        #[arg(long)]
        move_only: bool,
    },
    Down {
        #[arg(long, default_value = "left")]
        button: String,
    },
    Up {
        #[arg(long, default_value = "left")]
        button: String,
    },
    Drag {
        #[arg(allow_hyphen_values = true)]
        x1: i64,
        #[arg(allow_hyphen_values = true)]
        y1: i64,
        #[arg(allow_hyphen_values = true)]
        x2: i64,
        #[arg(allow_hyphen_values = true)]
        y2: i64,
        /// Total drag time in milliseconds.
        #[arg(long, default_value_t = 0)]
        duration: i64,
        #[arg(long, default_value_t = 30)]
        steps: i64,
        #[arg(long, default_value = "left")]
        button: String,
    },
    Type {
        text: String,
    },
    Key {
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let url = request_url(&cli.server, &cli.command)?;

    let body = reqwest::get(url.clone())
        .await
        .with_context(|| format!("request to {url} failed"))?
        .text()
        .await
        .context("failed to read response body")?;
    println!("{}", body.trim_end());

    if !reply_ok(&cli.command, &body)? {
        bail!("server reported failure");
    }
    Ok(())
}

fn request_url(base: &Url, command: &Command) -> Result<Url> {
    let (path, query): (&str, Vec<(&str, String)>) = match command {
        Command::Health => ("health", Vec::new()),
        Command::Pos => ("pos", Vec::new()),
        Command::Capture { delay } => (
            "capture",
            delay
                .map(|d| vec![("delay", d.to_string())])
                .unwrap_or_default(),
        ),
        Command::Move { dx, dy } => (
            "move",
            vec![("dx", dx.to_string()), ("dy", dy.to_string())],
        ),
        Command::Click {
            x,
            y,
            button,
            double,
            move_only,
        } => {
            let mut query = vec![
                ("x", x.to_string()),
                ("y", y.to_string()),
                ("button", button.clone()),
            ];
            if *double {
                query.push(("double", "1".into()));
            }
            if *move_only {
                query.push(("move_only", "1".into()));
            }
            ("click", query)
        }
        Command::Down { button } => ("down", vec![("button", button.clone())]),
        Command::Up { button } => ("up", vec![("button", button.clone())]),
        Command::Drag {
            x1,
            y1,
            x2,
            y2,
            duration,
            steps,
            button,
        } => (
            "drag",
            vec![
                ("x1", x1.to_string()),
                ("y1", y1.to_string()),
                ("x2", x2.to_string()),
                ("y2", y2.to_string()),
                ("duration", duration.to_string()),
                ("steps", steps.to_string()),
                ("button", button.clone()),
            ],
        ),
        Command::Type { text } => ("type", vec![("text", text.clone())]),
        Command::Key { code } => (
            "key",
            code.iter().map(|code| ("code", code.clone())).collect(),
        ),
    };

    let mut url = base
        .join(path)
        .with_context(|| format!("cannot build /{path} url from {base}"))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

fn reply_ok(command: &Command, body: &str) -> Result<bool> {
    match command {
        Command::Pos | Command::Capture { .. } => {
            let reply: PositionReply =
                serde_json::from_str(body).context("unexpected position reply")?;
            Ok(reply.is_ok())
        }
        _ => {
            let ack: Ack = serde_json::from_str(body).context("unexpected reply")?;
            Ok(ack.ok)
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

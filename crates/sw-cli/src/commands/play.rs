use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use sw_core::record::SessionRecord;
use sw_engine::{Controller, EngineConfig, Narrator, Reply, messages};
use sw_narrator::{OllamaNarrator, ScriptedNarrator};

pub async fn run(
    chapters: u32,
    url: &str,
    model: &str,
    timeout: u64,
    offline: bool,
    archive: Option<&Path>,
) -> Result<(), String> {
    let config = EngineConfig {
        total_chapters: chapters,
        ..EngineConfig::default()
    };

    if offline {
        return play(Controller::new(ScriptedNarrator::new(), config), archive).await;
    }

    let narrator =
        OllamaNarrator::with_endpoint(url, model, timeout).map_err(|e| e.to_string())?;
    if !narrator.is_available().await {
        return Err(format!(
            "no narrator service at {url}; run 'sw check' or play with --offline"
        ));
    }
    play(Controller::new(narrator, config), archive).await
}

async fn play<N: Narrator>(
    controller: Controller<N>,
    archive: Option<&Path>,
) -> Result<(), String> {
    let mut session = controller.new_session();

    println!("{}\n", messages::WELCOME.bold());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                controller.abandon(&mut session);
                break;
            }
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = controller
            .handle(&mut session, input)
            .await
            .map_err(|e| e.to_string())?;
        print_reply(&reply);

        if session.phase() == sw_core::Phase::Ended {
            break;
        }
    }

    if let Some(path) = archive {
        write_archive(path, &SessionRecord::from_session(&session))?;
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Chapter(text) | Reply::Analysis { text, .. } => println!("{text}\n"),
        Reply::SetupPrompt(text) | Reply::Corrective(text) => {
            println!("{}\n", text.yellow());
        }
        Reply::Farewell(text) | Reply::Concluded(text) => {
            println!("{}\n", text.dimmed());
        }
        Reply::GenerationFailed(text) => println!("{}\n", text.red()),
    }
}

/// Append one session record as a JSON line.
fn write_archive(path: &Path, record: &SessionRecord) -> Result<(), String> {
    let json = serde_json::to_string(record).map_err(|e| e.to_string())?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open archive {}: {e}", path.display()))?;
    writeln!(file, "{json}").map_err(|e| e.to_string())?;
    tracing::info!(id = %record.id, path = %path.display(), "session archived");
    Ok(())
}

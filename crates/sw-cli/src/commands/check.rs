use colored::Colorize;

use sw_narrator::{DEFAULT_MODEL, OllamaNarrator};

pub async fn run(url: &str) -> Result<(), String> {
    let narrator =
        OllamaNarrator::with_endpoint(url, DEFAULT_MODEL, 5).map_err(|e| e.to_string())?;

    if narrator.is_available().await {
        println!("  {} narrator service reachable at {url}", "ok".green());
        Ok(())
    } else {
        Err(format!("narrator service not reachable at {url}"))
    }
}

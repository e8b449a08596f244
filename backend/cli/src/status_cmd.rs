//! CLI Status Command
//!
//! Asks a running service for its health report.

use anyhow::Result;

pub async fn run(port: u16) -> Result<()> {
    println!("platescan status: checking...");
    let client = reqwest::Client::new();
    match client.get(health_url(port)).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("platescan is not running on port {}", port);
        }
    }
    Ok(())
}

fn health_url(port: u16) -> String {
    format!("http://localhost:{}/api/health", port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_local_health_endpoint() {
        assert_eq!(health_url(5000), "http://localhost:5000/api/health");
    }
}

pub mod analyze;
pub mod update;
pub mod version;

use anyhow::Context;
use zbxtrim_api::{ApiConfig, ZabbixClient};

/// Load configuration and open an authenticated session.
///
/// Both steps are fatal: a missing token stops the run before any request.
async fn connect() -> anyhow::Result<ZabbixClient> {
    let config = ApiConfig::from_env()?;
    println!("URL: {}", config.url);

    let client = ZabbixClient::connect(&config)
        .await
        .context("Could not connect to Zabbix")?;
    println!(
        "Connected to {} (Zabbix API {})",
        client.endpoint(),
        client.api_version()
    );
    Ok(client)
}

/// Cut `name` to at most `width` characters for table output
fn clip(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_counts_chars() {
        assert_eq!(clip("Linux by Zabbix agent", 5), "Linux");
        assert_eq!(clip("Ñandú", 3), "Ñan");
        assert_eq!(clip("short", 50), "short");
    }
}

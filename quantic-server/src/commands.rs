use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use quantic_core::proxy::{LocalFileIndex, RoutePolicy};
use quantic_types::{AssetPrecedence, GatewayConfig, RouteDecision};

use crate::cli::ConfigCommands;

pub fn handle_config_command(config: &GatewayConfig, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => show_config(config, json),
    }
}

pub fn show_config(config: &GatewayConfig, json: bool) -> Result<()> {
    let config = masked(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Key", "Value"]);

    let token_cell = match &config.upstream.platform_token {
        Some(token) => Cell::new(token),
        None => Cell::new("not set (SSO disabled)").fg(Color::Yellow),
    };
    let frame_ancestors =
        config.rewrite.frame_ancestors.as_ref().map_or_else(|| "-".to_string(), |f| f.join(" "));

    table.add_row(vec![Cell::new("listen"), Cell::new(config.get_socket_addr())]);
    table.add_row(vec![Cell::new("static_dir"), Cell::new(&config.static_dir)]);
    table.add_row(vec![Cell::new("upstream.base_url"), Cell::new(&config.upstream.base_url)]);
    table.add_row(vec![Cell::new("upstream.platform_token"), token_cell]);
    table.add_row(vec![Cell::new("upstream.user_id"), Cell::new(config.upstream.user_id)]);
    table.add_row(vec![
        Cell::new("upstream.request_timeout_secs"),
        Cell::new(config.upstream.request_timeout_secs),
    ]);
    table.add_row(vec![
        Cell::new("routing.reserved_prefix"),
        Cell::new(&config.routing.reserved_prefix),
    ]);
    table.add_row(vec![
        Cell::new("routing.local_assets"),
        Cell::new(config.routing.local_assets.len()),
    ]);
    table.add_row(vec![
        Cell::new("routing.static_extensions"),
        Cell::new(config.routing.static_extensions.join(" ")),
    ]);
    table.add_row(vec![Cell::new("routing.precedence"), Cell::new(config.routing.precedence)]);
    table.add_row(vec![
        Cell::new("rewrite.strip_cookie_attributes"),
        Cell::new(config.rewrite.strip_cookie_attributes),
    ]);
    table.add_row(vec![Cell::new("rewrite.frame_ancestors"), Cell::new(frame_ancestors)]);
    table.add_row(vec![
        Cell::new("rewrite.rewrite_location"),
        Cell::new(config.rewrite.rewrite_location),
    ]);
    table.add_row(vec![
        Cell::new("cors.allowed_origins"),
        Cell::new(config.cors.allowed_origins.join(", ")),
    ]);
    table.add_row(vec![Cell::new("database.url"), Cell::new(&config.database.url)]);
    table.add_row(vec![Cell::new("database.anon_key"), Cell::new(&config.database.anon_key)]);

    println!("{}", "Gateway Configuration:".cyan().bold());
    println!("{table}");
    Ok(())
}

pub fn show_routes(config: &GatewayConfig, paths: &[String]) -> Result<()> {
    let policy = build_policy(config)?;

    for (path, decision) in decide_all(&policy, paths) {
        let label = match decision {
            RouteDecision::Local => "local".green(),
            RouteDecision::Proxied => "proxied".blue(),
        };
        println!("{:>8}  {}", label, path);
    }
    println!("\n{} {}", "precedence:".dimmed(), policy.precedence());
    Ok(())
}

fn build_policy(config: &GatewayConfig) -> Result<RoutePolicy> {
    let index = match config.routing.precedence {
        AssetPrecedence::ExistingFile => LocalFileIndex::scan(Path::new(&config.static_dir))
            .with_context(|| format!("Failed to index {}", config.static_dir))?,
        AssetPrecedence::LocalExtension => LocalFileIndex::default(),
    };
    Ok(RoutePolicy::new(&config.routing, index))
}

fn decide_all(policy: &RoutePolicy, paths: &[String]) -> Vec<(String, RouteDecision)> {
    paths.iter().map(|p| (p.clone(), policy.decide(p))).collect()
}

/// Copy of `config` safe to print.
fn masked(config: &GatewayConfig) -> GatewayConfig {
    let mut out = config.clone();
    out.upstream.platform_token = out.upstream.platform_token.as_deref().map(mask_key);
    out.database.anon_key = mask_key(&out.database.anon_key);
    out
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("abcdefghijkl"), "abcd...ijkl");
    }

    #[test]
    fn test_masked_config_hides_secrets() {
        let mut config = GatewayConfig::default();
        config.upstream.platform_token = Some("tok-0123456789".to_string());
        let rendered = serde_json::to_string(&masked(&config)).unwrap();
        assert!(!rendered.contains("tok-0123456789"));
        assert!(!rendered.contains(&config.database.anon_key));
        assert!(rendered.contains(&config.upstream.base_url));
    }

    #[test]
    fn test_decide_all() {
        let policy = build_policy(&GatewayConfig::default()).unwrap();
        let paths = vec!["/crm.html".to_string(), "/app/login".to_string()];
        assert_eq!(
            decide_all(&policy, &paths),
            vec![
                ("/crm.html".to_string(), RouteDecision::Local),
                ("/app/login".to_string(), RouteDecision::Proxied),
            ]
        );
    }
}

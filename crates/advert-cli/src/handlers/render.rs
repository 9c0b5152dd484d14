//! Render command handler.

use advert_core::{AdvertConfig, StaticContext, render};
use advert_runtime::read_config;
use anyhow::Result;
use chrono::Local;

use crate::commands::RenderArgs;
use crate::error::CliError;
use crate::presentation::escape_control;

/// Execute the render command.
pub fn execute(args: &RenderArgs) -> Result<()> {
    println!("{}", preview(args)?);
    Ok(())
}

/// Render `args.message` against a static context built from the arguments.
pub fn preview(args: &RenderArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => read_config(path).map_err(CliError::from)?,
        None => AdvertConfig::default(),
    };

    let ctx = StaticContext {
        server_ip: args.ip.clone(),
        host_port: args.port,
        now: Local::now().naive_local(),
        player_count: args.players,
        map_name: args.map.clone(),
        server_name: args.hostname.clone(),
    };

    let rendered = render(&args.message, &config, &ctx);
    Ok(if args.raw {
        rendered.into_owned()
    } else {
        escape_control(&rendered)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(message: &str) -> RenderArgs {
        RenderArgs {
            message: message.to_string(),
            config: None,
            map: "de_dust2".to_string(),
            players: 7,
            hostname: None,
            ip: "10.0.0.1".to_string(),
            port: 27016,
            raw: false,
        }
    }

    #[test]
    fn test_preview_with_default_aliases() {
        let out = preview(&args("{GREEN}{MAP}{DEFAULT} {PL} on {IP}:{PORT}")).unwrap();
        assert_eq!(out, "\\x04Dust II\\x01 7 on 10.0.0.1:27016");
    }

    #[test]
    fn test_preview_unknown_server_name() {
        assert_eq!(preview(&args("{SERVERNAME}")).unwrap(), "Unknown");
    }

    #[test]
    fn test_preview_uses_config_aliases() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        fs::write(&path, r#"{ "MapsName": { "de_dust2": "Dusty" } }"#).unwrap();

        let mut args = args("{MAP}");
        args.config = Some(path);
        assert_eq!(preview(&args).unwrap(), "Dusty");
    }

    #[test]
    fn test_preview_raw_keeps_control_codes() {
        let mut args = args("{RED}x");
        args.raw = true;
        assert_eq!(preview(&args).unwrap(), "\x07x");
    }
}

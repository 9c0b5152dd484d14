//! Run command handler.
//!
//! Loads the plugin against the console host and keeps it running until
//! Ctrl-C. Optionally simulates round ends so panel adverts show up.

use std::time::Duration;

use advert_core::{PluginPaths, RoundEnd, Team};
use advert_runtime::{AdvertPlugin, PluginOptions, PluginState};
use anyhow::Result;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::handlers::check::print_overview;
use crate::host::{ConsolePlayers, ConsoleServer, console_ports};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let install_dir = args.install_dir.as_ref().unwrap_or(&args.data_dir);
    let paths = PluginPaths::new(&args.data_dir, install_dir);

    let ports = console_ports(
        ConsolePlayers::new(args.players, args.bots),
        ConsoleServer::new(&args.map, &args.hostname),
    );

    let mut options = PluginOptions::new(paths);
    if args.no_watch {
        options = options.without_file_watch();
    }

    let mut plugin = AdvertPlugin::load(ports, options);
    if let PluginState::Disabled { reason } = plugin.state() {
        return Err(CliError::Disabled(reason.clone()).into());
    }
    if let Some(broadcaster) = plugin.broadcaster() {
        print_overview(&broadcaster.config());
    }

    info!("Broadcasting; press Ctrl-C to stop");
    let result = wait_for_shutdown(&plugin, args.round_every).await;
    plugin.shutdown().await;
    result
}

async fn wait_for_shutdown(plugin: &AdvertPlugin, round_every: Option<u64>) -> Result<()> {
    let Some(secs) = round_every.filter(|secs| *secs > 0) else {
        tokio::signal::ctrl_c().await.map_err(CliError::from)?;
        return Ok(());
    };

    let period = Duration::from_secs(secs);
    let mut rounds = interval(period);
    rounds.set_missed_tick_behavior(MissedTickBehavior::Skip);
    rounds.tick().await;

    let mut round: u64 = 0;
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(CliError::from)?;
                return Ok(());
            }
            _ = rounds.tick() => {
                round += 1;
                let winner = simulated_winner(round);
                info!(round, winner = winner.code(), "Simulated round end");
                plugin.on_round_end(RoundEnd::new(winner.code()));
            }
        }
    }
}

/// Alternate T, CT and the odd draw.
const fn simulated_winner(round: u64) -> Team {
    match round % 5 {
        0 => Team::None,
        n if n % 2 == 1 => Team::Terrorist,
        _ => Team::CounterTerrorist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_winners_cycle() {
        let winners: Vec<Team> = (1..=5).map(simulated_winner).collect();
        assert_eq!(
            winners,
            vec![
                Team::Terrorist,
                Team::CounterTerrorist,
                Team::Terrorist,
                Team::CounterTerrorist,
                Team::None,
            ]
        );
    }
}

//! End-to-end plugin tests against the recording host.

use std::fs;
use std::time::Duration;

use advert_core::testing::TestHost;
use advert_core::{AdvertLocation, PluginPaths, RoundEnd, RoundOutcome, Team};
use advert_runtime::{AdvertPlugin, PluginOptions, PluginState};
use tempfile::tempdir;
use tokio::time::{Instant, sleep};
use tokio_test::assert_ok;

const SCENARIO: &str = r#"
// two groups: a chat line, then a deferred panel
{
    "ConfigModel": {
        "Interval": 15,
        "HtmlDuration": 2,
        "MapsName": { "de_dust2": "Dust II" },
        "AdvertList": [
            { "g1": { "Chat": "hi" } },
            { "g2": { "Panel": "bye on {MAP}" } },
        ],
    },
}
"#;

#[tokio::test(start_paused = true)]
async fn chat_then_panel_then_round_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.jsonc"), SCENARIO).unwrap();
    let host = TestHost::new(2);

    let mut plugin = AdvertPlugin::load(
        host.ports(),
        PluginOptions::new(PluginPaths::new(dir.path(), dir.path())).without_file_watch(),
    );
    assert_eq!(plugin.state(), &PluginState::Running);

    // Nothing before the first full interval.
    sleep(Duration::from_secs(14)).await;
    assert!(host.players.sent().is_empty());

    sleep(Duration::from_secs(2)).await;
    let sent = host.players.take_sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.message == "hi"));

    sleep(Duration::from_secs(15)).await;
    assert!(host.players.sent().is_empty());

    let fired = plugin
        .on_round_end(RoundEnd::new(Team::CounterTerrorist.code()))
        .unwrap();
    assert_eq!(fired.final_event, RoundOutcome::CtsWin.code());
    assert_eq!(fired.funfact_token, "bye on Dust II");

    // The panel stays armed for later rounds.
    let again = plugin.on_round_end(RoundEnd::new(9)).unwrap();
    assert_eq!(again.final_event, RoundOutcome::RoundDraw.code());
    assert_eq!(host.events.fired().len(), 2);

    plugin.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn sound_advert_falls_back_to_install_dir() {
    let data = tempdir().unwrap();
    let install = tempdir().unwrap();
    fs::create_dir(install.path().join("sounds")).unwrap();
    fs::write(install.path().join("sounds").join("ding.mp3"), b"ID3").unwrap();
    fs::write(
        data.path().join("config.jsonc"),
        r#"{ "Interval": 1, "Volume": 0.25, "AdvertList": [ { "s": { "Sound": "sounds/ding.mp3" } } ] }"#,
    )
    .unwrap();
    let host = TestHost::new(3);

    let mut plugin = AdvertPlugin::load(
        host.ports(),
        PluginOptions::new(PluginPaths::new(data.path(), install.path())).without_file_watch(),
    );

    sleep(Duration::from_millis(2_500)).await;

    let decodes = host.audio.decodes();
    assert_eq!(decodes, vec![install.path().join("sounds").join("ding.mp3")]);
    let channels = host.audio.channels();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].id, "advert.1");
    assert_eq!(channels[1].id, "advert.2");
    assert_eq!(channels[0].played().len(), 3);

    plugin.shutdown().await;
    assert!(plugin.broadcaster().is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_audio_subsystem_keeps_other_sinks() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ding.mp3"), b"ID3").unwrap();
    fs::write(
        dir.path().join("config.jsonc"),
        r#"{ "Interval": 1, "AdvertList": [ { "s": { "Sound": "ding.mp3", "Alert": "listen" } } ] }"#,
    )
    .unwrap();
    let host = TestHost::new(1);

    let _plugin = AdvertPlugin::load(
        host.ports_without_audio(),
        PluginOptions::new(PluginPaths::new(dir.path(), dir.path())).without_file_watch(),
    );

    sleep(Duration::from_millis(1_500)).await;
    assert!(host.audio.decodes().is_empty());
    assert_eq!(host.players.sent()[0].message, "listen");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn config_file_edits_are_hot_reloaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.jsonc");
    fs::write(&path, SCENARIO).unwrap();
    let host = TestHost::new(1);

    let plugin = AdvertPlugin::load(
        host.ports(),
        PluginOptions::new(PluginPaths::new(dir.path(), dir.path())),
    );
    let broadcaster = plugin.broadcaster().unwrap().clone();
    assert_eq!(broadcaster.config().advert_list.len(), 2);

    fs::write(
        &path,
        r#"{ "Interval": 3600, "AdvertList": [ { "only": { "Center": "new" } } ] }"#,
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while broadcaster.config().advert_list.len() != 1 && Instant::now() < deadline {
        sleep(Duration::from_millis(50)).await;
    }
    let config = broadcaster.config();
    assert_eq!(config.advert_list.len(), 1);
    assert!(config.advert_list[0]["only"].contains_key(&AdvertLocation::Center));
    assert_eq!(broadcaster.rotation_index(), 0);

    // A broken edit is rejected and the previous snapshot stays.
    fs::write(&path, "{ \"Interval\": ").unwrap();
    sleep(Duration::from_millis(800)).await;
    assert_eq!(broadcaster.config().advert_list.len(), 1);

    // Manual reloads see the same file the watcher does.
    fs::write(&path, r#"{ "Interval": 3600, "AdvertList": [] }"#).unwrap();
    assert_ok!(plugin.reload_config());
    let deadline = Instant::now() + Duration::from_secs(5);
    while !broadcaster.config().advert_list.is_empty() && Instant::now() < deadline {
        sleep(Duration::from_millis(20)).await;
    }
    assert!(broadcaster.config().advert_list.is_empty());
}

//! # Menu Session Tests
//!
//! Whole menu sessions through `MenuLoop`: startup dialogs, the help screen
//! lifecycle on the navigation stack, extraction signalled from another
//! thread, and the memory regions brought up alongside.
//!
//! Run with: cargo test -p lumen --test menu_session

use std::thread;

use lumen::core::{Region, RegionError};
use lumen::ui::{
    AchievementDescriptions, ConfigFlag, DialogKind, DisplayListKind, InputBind, JoypadInput,
    MenuAction, MenuSettings, SharedSettings, TextBuffer,
};
use lumen::{LumenError, MenuLoop, MenuLoopConfig};

const FRAME_US: u64 = 16_666;

fn first_launch() -> SharedSettings {
    SharedSettings::new(MenuSettings {
        menu_show_start_screen: true,
        ..MenuSettings::default()
    })
}

fn started(settings: SharedSettings) -> MenuLoop {
    let mut menu = MenuLoop::new(MenuLoopConfig::default(), settings);
    menu.startup().unwrap();
    menu
}

/// Runs frames until a dialog finishes. Returns the finishing frame.
fn run_until_finished(menu: &mut MenuLoop, limit: u64) -> Option<u64> {
    for _ in 0..limit {
        let report = menu.tick(menu.frame_count() * FRAME_US);
        if report.finished {
            return Some(report.frame);
        }
    }
    None
}

struct Trophies;

impl AchievementDescriptions for Trophies {
    fn write_description(&self, index: u32, out: &mut TextBuffer) {
        out.set(&format!("Trophy {index}: beat the first level"));
    }
}

// ============================================================================
// STARTUP
// ============================================================================

#[test]
fn welcome_screen_lifecycle() {
    let mut menu = started(first_launch());

    let first = menu.tick(0);
    assert!(first.pushed);
    assert_eq!(first.kind, DialogKind::Welcome);
    assert!(menu.navigation().is_showing(0, DisplayListKind::Help));
    assert!(!menu.dialogs().is_push_pending());
    assert!(menu.text().starts_with("Welcome"));

    // First frame at or past 3 s on a 16.666 ms clock
    let finished_at = run_until_finished(&mut menu, 400).unwrap();
    assert_eq!(finished_at, 181);
    assert_eq!(menu.navigation().depth(0), 0);
    assert_eq!(menu.dialogs().current_kind(), DialogKind::None);

    let idle = menu.tick(menu.frame_count() * FRAME_US);
    assert!(!idle.pushed);
    assert!(!idle.finished);
    assert_eq!(idle.kind, DialogKind::None);
}

#[test]
fn no_startup_dialog_by_default() {
    let mut menu = started(SharedSettings::default());

    let report = menu.tick(0);
    assert!(!report.pushed);
    assert_eq!(report.kind, DialogKind::None);
    assert_eq!(menu.navigation().depth(0), 0);
}

#[test]
fn extraction_finishes_from_worker_thread() {
    let settings = SharedSettings::new(MenuSettings {
        bundle_assets_extract_enable: true,
        ..MenuSettings::default()
    });
    let mut menu = started(settings.clone());

    for frame in 0..30 {
        let report = menu.tick(frame * FRAME_US);
        assert!(!report.finished);
        assert_eq!(report.kind, DialogKind::HelpExtract);
    }
    assert!(menu.text().starts_with("Extracting"));

    let worker = settings.clone();
    thread::spawn(move || worker.set(ConfigFlag::BundleFinished, true))
        .join()
        .unwrap();

    let report = menu.tick(30 * FRAME_US);
    assert!(report.finished);
    assert!(!settings.get(ConfigFlag::BundleFinished));
    assert!(!menu.navigation().is_showing(0, DisplayListKind::Help));
}

#[test]
fn rearm_rule_keeps_extraction_inside_startup() {
    let mut config = MenuSettings {
        menu_show_start_screen: true,
        bundle_assets_extract_enable: true,
        ..MenuSettings::default()
    };
    config.dialog.requires_rearm_for_extraction_push = true;
    let mut menu = started(SharedSettings::new(config));

    // Armed on top of the pending welcome push
    assert_eq!(menu.dialogs().current_kind(), DialogKind::HelpExtract);

    // Outside startup nothing is pending, so a new request is refused
    let _ = menu.tick(0);
    menu.dismiss();
    assert!(!menu.open(DialogKind::HelpExtract));
    assert_eq!(menu.dialogs().current_kind(), DialogKind::None);
}

// ============================================================================
// USER DIALOGS
// ============================================================================

#[test]
fn dismiss_closes_help_screen() {
    let mut menu = started(SharedSettings::default());
    assert!(menu.open(DialogKind::HelpWhatIsACore));

    for frame in 0..10 {
        assert!(!menu.tick(frame * FRAME_US).finished);
    }
    assert_eq!(menu.navigation().depth(0), 1);

    menu.dismiss();
    assert_eq!(menu.navigation().depth(0), 0);
    assert_eq!(menu.dialogs().current_kind(), DialogKind::None);
}

#[test]
fn switching_dialogs_reuses_help_screen() {
    let mut menu = started(SharedSettings::default());

    assert!(menu.open(DialogKind::HelpControls));
    assert!(menu.tick(0).pushed);
    assert!(menu.open(DialogKind::HelpWhatIsACore));
    let report = menu.tick(FRAME_US);
    assert!(!report.pushed);
    assert_eq!(report.kind, DialogKind::HelpWhatIsACore);
    assert_eq!(menu.navigation().depth(0), 1);

    menu.dismiss();
    assert_eq!(menu.navigation().depth(0), 0);
    assert_eq!(menu.dialogs().current_kind(), DialogKind::None);
}

#[test]
fn controls_screen_follows_rebinding() {
    let mut menu = started(SharedSettings::default());
    assert!(menu.open(DialogKind::HelpControls));
    let _ = menu.tick(0);
    assert!(menu.text().contains("[Confirm]: (Key: X)"));

    menu.bindings_mut().set_bind(
        0,
        MenuAction::Accept,
        InputBind::joypad(JoypadInput::Button(1)).with_label("Circle"),
    );
    let _ = menu.tick(FRAME_US);
    assert!(menu.text().contains("[Confirm]: Circle"));
}

#[test]
fn achievement_description_shown() {
    let mut menu = started(SharedSettings::default());
    menu.set_achievements(Box::new(Trophies));

    assert!(menu.show_achievement(42));
    let _ = menu.tick(0);
    assert_eq!(menu.text(), "Trophy 42: beat the first level");
}

#[test]
fn achievement_screen_without_provider_is_blank() {
    let mut menu = started(SharedSettings::default());
    assert!(menu.open(DialogKind::HelpControls));
    let _ = menu.tick(0);
    assert!(!menu.text().is_empty());

    assert!(menu.show_achievement(3));
    let _ = menu.tick(FRAME_US);
    assert_eq!(menu.text(), "");
}

// ============================================================================
// REGIONS
// ============================================================================

#[test]
fn regions_follow_session() {
    let mut menu = started(SharedSettings::default());

    let regions = menu.regions_mut();
    let block = regions.allocate(Region::Mem1, 1000, 1).unwrap();
    assert!(block.is_aligned_to(4));
    let bucket = regions.allocate(Region::Bucket, 64, 64).unwrap();
    assert!(bucket.is_aligned_to(64));
    regions.free(Region::Mem1, Some(block));
    regions.free(Region::Bucket, Some(bucket));

    menu.shutdown();
    assert!(menu.regions_mut().allocate(Region::Mem1, 16, 4).is_none());

    // Regions come back after a restart
    menu.startup().unwrap();
    assert!(menu.regions_mut().allocate(Region::Mem1, 16, 4).is_some());
}

#[test]
fn failed_startup_can_be_retried() {
    let mut config = MenuLoopConfig::default();
    config.pools.foreground_size = 0;
    let mut menu = MenuLoop::new(config, first_launch());

    for _ in 0..2 {
        assert!(matches!(
            menu.startup(),
            Err(LumenError::Region(RegionError::PoolExhausted(Region::Bucket)))
        ));
        assert!(!menu.regions_mut().is_initialized(Region::Mem1));
        assert_eq!(menu.dialogs().current_kind(), DialogKind::None);
    }
}

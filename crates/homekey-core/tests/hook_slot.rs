use homekey_core::hook;
use homekey_core::inject::{spawn_delivery_thread, ChannelSink};
use homekey_core::matcher::DeviceTable;
use homekey_core::types::{KeyAction, KeyEvent, Outcome};
use std::fs;

// The slot is process-wide, so everything runs inside one test.
#[test]
fn install_dispatch_uninstall() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let touch_up = KeyEvent::new(5, 7, 3, KeyAction::Up);

    assert!(!hook::is_installed());
    assert_eq!(hook::handle_key_event(&touch_up), Outcome::PassThrough);

    let dir = tempfile::tempdir().unwrap();
    let keypad = dir.path().join("keypad");
    fs::create_dir(&keypad).unwrap();
    fs::write(keypad.join("home_press"), "42\n").unwrap();
    fs::write(keypad.join("home_touch"), "7\n").unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(
        &settings_path,
        format!(r#"{{ "keypad_root": {:?} }}"#, keypad.to_str().unwrap()),
    )
    .unwrap();

    let devices: DeviceTable = [(3, "gpio-keys".to_string()), (5, "gf3208".to_string())]
        .into_iter()
        .collect();
    let (sink, rx) = ChannelSink::unbounded();
    let (done_tx, done_rx) = crossbeam_channel::unbounded();
    let delivery = spawn_delivery_thread(rx, move |e| {
        let _ = done_tx.send(e);
    })
    .unwrap();

    hook::install_handler(&settings_path, devices, sink).unwrap();
    assert!(hook::is_installed());

    // Press release just happened, so the touch release right after is eaten.
    let press_up = KeyEvent::new(3, 42, 3, KeyAction::Up);
    assert_eq!(hook::handle_key_event(&press_up), Outcome::PassThrough);
    assert_eq!(hook::handle_key_event(&touch_up), Outcome::Consume);

    hook::uninstall_handler();
    assert!(!hook::is_installed());
    assert_eq!(hook::handle_key_event(&touch_up), Outcome::PassThrough);

    // Dropping the handler closed the channel.
    delivery.join().unwrap();
    assert_eq!(done_rx.try_iter().count(), 0);
}

#[test]
fn malformed_settings_fail_install() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();

    let (sink, _rx) = ChannelSink::unbounded();
    let err = hook::install_handler(&path, DeviceTable::new(), sink).unwrap_err();
    assert!(format!("{:#}", err).contains("cannot install handler"));
}

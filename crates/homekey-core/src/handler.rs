use crate::clock::Clock;
use crate::debounce::{DebounceGate, TouchDecision};
use crate::inject::{EventInjector, EventSink};
use crate::matcher::DeviceDirectory;
use crate::profile::ProfileRegistry;
use crate::types::{KeyEvent, Outcome};

/// Hook the input pipeline calls for every raw key event.
pub trait DeviceKeyHandler {
    fn handle_key_event(&mut self, event: &KeyEvent) -> Outcome;
}

/// Filters the home key sources into one debounced signal.
///
/// The handler is not synchronized. The host must deliver events one at a
/// time and never re-enter `handle`; profile bindings, captured key codes
/// and the press-release timestamp are all plain fields.
pub struct KeyHandler {
    registry: ProfileRegistry,
    gate: DebounceGate,
    devices: Box<dyn DeviceDirectory + Send>,
    clock: Box<dyn Clock + Send>,
    injector: EventInjector,
}

impl KeyHandler {
    pub fn new(
        registry: ProfileRegistry,
        devices: impl DeviceDirectory + Send + 'static,
        clock: impl Clock + Send + 'static,
        sink: impl EventSink + Send + 'static,
    ) -> Self {
        Self {
            registry,
            gate: DebounceGate::new(),
            devices: Box::new(devices),
            clock: Box::new(clock),
            injector: EventInjector::new(sink),
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    /// Runs the touch path and then the press path over `event`.
    pub fn handle(&mut self, event: &KeyEvent) -> Outcome {
        let now = self.clock.now_ms();
        let devices = &*self.devices;

        let touch = self
            .gate
            .on_touch(&mut self.registry, event, devices, now);
        if let TouchDecision::Inject { key_code, .. } = touch {
            self.injector.inject_tap(key_code, now);
        }

        let press = self
            .gate
            .on_press(&mut self.registry, event, devices, now);

        if touch.is_handled() || press {
            Outcome::Consume
        } else {
            Outcome::PassThrough
        }
    }
}

impl DeviceKeyHandler for KeyHandler {
    fn handle_key_event(&mut self, event: &KeyEvent) -> Outcome {
        self.handle(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::inject::ChannelSink;
    use crate::matcher::DeviceTable;
    use crate::profile::{Binding, ProfileId};
    use crate::types::{DeviceId, InjectedEvent, KeyAction};
    use crossbeam_channel::Receiver;

    fn handler() -> (KeyHandler, ManualClock, Receiver<InjectedEvent>) {
        let mut devices = DeviceTable::new();
        devices.insert(3, "gpio-keys");
        devices.insert(5, "gf3208");
        let clock = ManualClock::new(0);
        let (sink, rx) = ChannelSink::unbounded();
        let h = KeyHandler::new(
            ProfileRegistry::with_scan_codes(42, 7, 7),
            devices,
            clock.clone(),
            sink,
        );
        (h, clock, rx)
    }

    #[test]
    fn press_events_pass_through() {
        let (mut h, clock, rx) = handler();
        clock.set(1000);

        for action in [KeyAction::Down, KeyAction::Up] {
            let ev = KeyEvent::new(3, 42, 3, action);
            assert_eq!(h.handle(&ev), Outcome::PassThrough);
        }
        assert_eq!(h.gate().last_press_release_at(), 1000);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn touch_down_passes_through_but_release_is_consumed() {
        let (mut h, clock, rx) = handler();
        clock.set(5000);

        assert_eq!(
            h.handle(&KeyEvent::new(5, 7, 3, KeyAction::Down)),
            Outcome::PassThrough
        );
        assert_eq!(
            h.handle(&KeyEvent::new(5, 7, 3, KeyAction::Up)),
            Outcome::Consume
        );
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn suppressed_touch_injects_nothing() {
        let (mut h, clock, rx) = handler();
        clock.set(1000);
        h.handle(&KeyEvent::new(3, 42, 3, KeyAction::Up));
        clock.advance(199);

        assert!(h.handle(&KeyEvent::new(5, 7, 3, KeyAction::Up)).is_consumed());
        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(
            h.registry().get(ProfileId::HomeTouchGf3208).binding(),
            Binding::Bound(DeviceId(5))
        );
    }

    #[test]
    fn works_through_trait_object() {
        let (h, clock, rx) = handler();
        clock.set(10_000);
        let mut hook: Box<dyn DeviceKeyHandler> = Box::new(h);

        let ev = KeyEvent::new(5, 7, 3, KeyAction::Up);
        assert_eq!(hook.handle_key_event(&ev), Outcome::Consume);
        let keys: Vec<_> = rx.try_iter().map(|e| (e.key_code, e.action)).collect();
        assert_eq!(keys, vec![(3, KeyAction::Down), (3, KeyAction::Up)]);
    }
}

use crate::types::{EventOrigin, EventSource, InjectedEvent, KeyAction};
use crossbeam_channel::{Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, trace};

/// Accepts synthesized events for asynchronous delivery into the input pipeline.
///
/// Delivery is fire-and-forget: implementations must not block the caller
/// and have no way to report failure back.
pub trait EventSink {
    fn deliver(&self, event: InjectedEvent);
}

/// Synthesizes key taps and pushes them into an [`EventSink`].
pub struct EventInjector {
    sink: Box<dyn EventSink + Send>,
}

impl EventInjector {
    pub fn new(sink: impl EventSink + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Emits a down/up pair for `key_code`.
    pub fn inject_tap(&self, key_code: i32, now_ms: u64) {
        self.inject(key_code, KeyAction::Down, 0, now_ms);
        self.inject(key_code, KeyAction::Up, 0, now_ms);
    }

    fn inject(&self, key_code: i32, action: KeyAction, flags: u32, now_ms: u64) {
        trace!("Injecting key_code={} {:?}", key_code, action);
        self.sink.deliver(InjectedEvent {
            key_code,
            action,
            flags,
            origin: EventOrigin::VirtualKeyboard,
            source: EventSource::Keyboard,
            t: now_ms,
        });
    }
}

/// Sink that queues events on a channel for a delivery thread.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<InjectedEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<InjectedEvent>) -> Self {
        Self { tx }
    }

    /// Creates an unbounded sink together with its receiving end.
    pub fn unbounded() -> (Self, Receiver<InjectedEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, event: InjectedEvent) {
        if self.tx.send(event).is_err() {
            trace!("Delivery channel closed, dropping {:?}", event);
        }
    }
}

/// Drains `rx` into `deliver` on a dedicated thread until every sender is dropped.
pub fn spawn_delivery_thread<F>(
    rx: Receiver<InjectedEvent>,
    mut deliver: F,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnMut(InjectedEvent) + Send + 'static,
{
    std::thread::Builder::new()
        .name("homekey-delivery".into())
        .spawn(move || {
            debug!("Delivery thread started");
            for event in rx.iter() {
                deliver(event);
            }
            debug!("Delivery thread exited");
        })
}

pub mod clock;
pub mod debounce;
pub mod handler;
pub mod hook;
pub mod inject;
pub mod keypad;
pub mod matcher;
pub mod profile;
pub mod settings;
pub mod types;

pub use debounce::PRESS_TOUCH_THROTTLE_MS;
pub use handler::{DeviceKeyHandler, KeyHandler};
pub use types::{DeviceId, InjectedEvent, KeyAction, KeyEvent, Outcome};

//! Keypad decoding
//!
//! The board reports its four buttons as bits 0-3 of the first keypad byte
//! (1 = pressed). [`decode`] compares two successive readings and reports the
//! button that changed; [`Keypad`] keeps the last reading and calls the
//! callback registered for that button.
//!
//! When more than one button changes between two readings the default
//! [`TransitionPolicy::DropSimultaneous`] reports nothing. The board is read
//! several times per cycle, so this is rare in practice.
//! [`TransitionPolicy::ReportAll`] reports every edge instead.
//!
//! ## Example
//!
//! ```
//! use projecta::{Button, ButtonEvent, buttons};
//!
//! assert_eq!(
//!     buttons::decode(0b0000, 0b0001),
//!     Some(ButtonEvent { button: Button::ChargeRate, pressed: true })
//! );
//! assert_eq!(buttons::decode(0b0000, 0b0011), None);
//! ```

use crate::protocol::{
    BUTTON_BATTERY_TYPE, BUTTON_CHARGE_RATE, BUTTON_MASK, BUTTON_RECONDITION, BUTTON_VOLT_AMP,
};

/// Callback invoked with `true` on press and `false` on release
pub type ButtonCallback = fn(bool);

/// A keypad button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Charge rate
    ChargeRate,
    /// Volt/amp readout toggle
    VoltAmp,
    /// Battery type selection
    BatteryType,
    /// Recondition mode
    Recondition,
}

impl Button {
    /// Every button, in bit order
    pub const ALL: [Self; 4] = [
        Self::ChargeRate,
        Self::VoltAmp,
        Self::BatteryType,
        Self::Recondition,
    ];

    /// Bit of the keypad byte carrying this button
    pub fn mask(self) -> u8 {
        match self {
            Self::ChargeRate => BUTTON_CHARGE_RATE,
            Self::VoltAmp => BUTTON_VOLT_AMP,
            Self::BatteryType => BUTTON_BATTERY_TYPE,
            Self::Recondition => BUTTON_RECONDITION,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::ChargeRate => 0,
            Self::VoltAmp => 1,
            Self::BatteryType => 2,
            Self::Recondition => 3,
        }
    }
}

/// A press or release of one button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Button that changed
    pub button: Button,
    /// New state: `true` if now pressed
    pub pressed: bool,
}

impl ButtonEvent {
    fn from_reading(button: Button, current: u8) -> Self {
        Self {
            button,
            pressed: current & button.mask() != 0,
        }
    }
}

/// What to do when several buttons change between two readings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Report only single-button changes; simultaneous changes are dropped
    #[default]
    DropSimultaneous,
    /// Report one event per changed button, in bit order
    ReportAll,
}

/// Decode the single button that changed between two readings
///
/// Returns `None` when nothing changed, when more than one button changed, or
/// when only bits 4-7 changed.
pub fn decode(previous: u8, current: u8) -> Option<ButtonEvent> {
    let changed = previous ^ current;
    Button::ALL
        .into_iter()
        .find(|button| changed == button.mask())
        .map(|button| ButtonEvent::from_reading(button, current))
}

/// Decode every button that changed between two readings
///
/// Bits 4-7 are ignored.
pub fn decode_all(previous: u8, current: u8) -> impl Iterator<Item = ButtonEvent> {
    let changed = previous ^ current;
    Button::ALL
        .into_iter()
        .filter(move |button| changed & button.mask() != 0)
        .map(move |button| ButtonEvent::from_reading(button, current))
}

/// One callback slot per button
#[derive(Clone, Copy, Debug, Default)]
pub struct Callbacks {
    slots: [Option<ButtonCallback>; 4],
}

impl Callbacks {
    /// Create an empty set of callbacks
    pub const fn new() -> Self {
        Self { slots: [None; 4] }
    }

    /// Register `callback` for `button`, replacing any previous one
    pub fn set(&mut self, button: Button, callback: ButtonCallback) {
        self.slots[button.index()] = Some(callback);
    }

    /// Remove the callback for `button`
    pub fn remove(&mut self, button: Button) {
        self.slots[button.index()] = None;
    }

    /// Remove every callback
    pub fn clear(&mut self) {
        self.slots = [None; 4];
    }

    /// Callback registered for `button`
    pub fn get(&self, button: Button) -> Option<ButtonCallback> {
        self.slots[button.index()]
    }

    /// Call the callback for `event`, if one is registered
    pub fn dispatch(&self, event: ButtonEvent) {
        if let Some(callback) = self.get(event.button) {
            callback(event.pressed);
        }
    }
}

/// Button state tracker
///
/// Holds the last keypad reading and the registered callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keypad {
    state: u8,
    policy: TransitionPolicy,
    callbacks: Callbacks,
}

impl Keypad {
    /// Create a tracker with all buttons released
    pub const fn new(policy: TransitionPolicy) -> Self {
        Self {
            state: 0,
            policy,
            callbacks: Callbacks::new(),
        }
    }

    /// Last keypad reading
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Registered callbacks
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Registered callbacks, mutably
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Process a keypad reading
    ///
    /// Fires callbacks for the detected transitions and stores `current` as the
    /// last reading whether or not anything fired. Returns the number of
    /// events detected.
    pub fn feed(&mut self, current: u8) -> usize {
        let previous = self.state;
        let mut events = 0;

        match self.policy {
            TransitionPolicy::DropSimultaneous => {
                if let Some(event) = decode(previous, current) {
                    self.fire(event);
                    events += 1;
                } else if (previous ^ current) & BUTTON_MASK != 0 {
                    log::trace!(
                        "Dropped simultaneous button change {previous:#04x} -> {current:#04x}"
                    );
                }
            }
            TransitionPolicy::ReportAll => {
                for event in decode_all(previous, current) {
                    self.fire(event);
                    events += 1;
                }
            }
        }

        self.state = current;
        events
    }

    fn fire(&self, event: ButtonEvent) {
        log::trace!("{:?} {}", event.button, if event.pressed { "pressed" } else { "released" });
        self.callbacks.dispatch(event);
    }
}

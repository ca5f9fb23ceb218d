//! Core display operations

use crate::buttons::{Button, ButtonCallback, Keypad};
use crate::config::Config;
use crate::error::{Error, FrameError};
use crate::frame::Frame;
use crate::indicator::{BatteryType, Led, Unit};
use crate::interface::BusInterface;
use crate::protocol::{IN_FRAME_LEN, PERIPHERAL_ADDRESS};
use crate::registry::InstanceId;

type DisplayResult<I> = core::result::Result<(), Error<I>>;
type SetResult = core::result::Result<(), FrameError>;

/// Bus error counters
///
/// [`Display::cycle`] never returns transport errors; the next cycle simply
/// tries again. These counters make the failures visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Completed cycles
    pub cycles: u32,
    /// Failed keypad reads
    pub read_errors: u32,
    /// Failed frame writes
    pub write_errors: u32,
}

/// Core driver for the charger display board
///
/// Owns the outgoing frame, the keypad buffer and the button state for one
/// board. Setters only change the frame; nothing is sent until
/// [`cycle`](Self::cycle) runs, which should happen on every iteration of the
/// application's main loop.
pub struct Display<I>
where
    I: BusInterface,
{
    /// Hardware interface
    interface: I,
    /// Driver configuration
    config: Config,
    /// Ordinal from the registry
    id: InstanceId,
    /// Frame written every cycle
    frame: Frame,
    /// Last keypad frame received
    incoming: [u8; IN_FRAME_LEN],
    /// Button state and callbacks
    keypad: Keypad,
    /// Bus error counters
    stats: CycleStats,
}

impl<I> Display<I>
where
    I: BusInterface,
{
    /// Create a new Display instance
    ///
    /// No bus traffic happens until [`begin`](Self::begin).
    pub fn new(interface: I, config: Config, id: InstanceId) -> Self {
        Self {
            interface,
            config,
            id,
            frame: Frame::new(),
            incoming: [0; IN_FRAME_LEN],
            keypad: Keypad::new(config.transition_policy),
            stats: CycleStats::default(),
        }
    }

    /// Clear the display and check that the board answers
    ///
    /// # Errors
    ///
    /// - [`Error::InstanceLimitExceeded`] if this instance's id is past the
    ///   port limit. The bus is not touched.
    /// - [`Error::Connectivity`] if the board does not acknowledge the probe.
    pub fn begin(&mut self) -> DisplayResult<I> {
        if !self.id.is_within_limit() {
            log::warn!("Instance {} exceeds the board limit", self.id);
            return Err(Error::InstanceLimitExceeded { id: self.id.get() });
        }

        self.frame.clear();
        self.interface
            .probe(PERIPHERAL_ADDRESS)
            .map_err(Error::Connectivity)?;

        log::debug!("Instance {} connected at {PERIPHERAL_ADDRESS:#04x}", self.id);
        Ok(())
    }

    /// Poll the keypad and send the frame
    ///
    /// Reads the keypad `poll_reads` times, firing button callbacks as
    /// transitions are seen, then writes the whole frame once. Bus errors are
    /// counted in [`stats`](Self::stats) and otherwise ignored. Does nothing
    /// for an instance past the port limit.
    pub fn cycle(&mut self) {
        if !self.id.is_within_limit() {
            return;
        }

        for _ in 0..self.config.poll_reads {
            match self
                .interface
                .read_frame(PERIPHERAL_ADDRESS, &mut self.incoming)
            {
                Ok(()) => {
                    self.keypad.feed(self.incoming[0]);
                }
                Err(e) => {
                    self.stats.read_errors = self.stats.read_errors.wrapping_add(1);
                    log::debug!("Keypad read failed: {e:?}");
                }
            }
        }

        if let Err(e) = self
            .interface
            .write_frame(PERIPHERAL_ADDRESS, self.frame.as_bytes())
        {
            self.stats.write_errors = self.stats.write_errors.wrapping_add(1);
            log::warn!("Frame write failed: {e:?}");
        }

        self.stats.cycles = self.stats.cycles.wrapping_add(1);
        log::trace!("Cycle sent {:02x?}", self.frame.as_bytes());
    }

    /// Blank the display
    pub fn clear(&mut self) {
        self.frame.clear();
        log::debug!("Instance {} cleared", self.id);
    }

    fn checked(operation: &str, result: SetResult) -> SetResult {
        if let Err(e) = &result {
            log::warn!("{operation}: {e}");
        }
        result
    }

    fn set_quantity(&mut self, unit: Unit, value: f32) -> SetResult {
        Self::checked("Quantity", self.frame.set_quantity(unit, value))
    }

    /// Show a voltage with the V icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_voltage(&mut self, volts: f32) -> SetResult {
        self.set_quantity(Unit::Volts, volts)
    }

    /// Show a current with the A icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_current(&mut self, amps: f32) -> SetResult {
        self.set_quantity(Unit::Amps, amps)
    }

    /// Show a power with the W or kW icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_watts(&mut self, watts: f32) -> SetResult {
        self.set_quantity(Unit::Watts, watts)
    }

    /// Show a temperature with the degrees Celsius icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_temperature(&mut self, celsius: f32) -> SetResult {
        self.set_quantity(Unit::Celsius, celsius)
    }

    /// Show a percentage with the % icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_percent(&mut self, percent: f32) -> SetResult {
        self.set_quantity(Unit::Percent, percent)
    }

    /// Show a charge with the Ah icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_amp_hours(&mut self, amp_hours: f32) -> SetResult {
        self.set_quantity(Unit::AmpHours, amp_hours)
    }

    /// Show an energy with the Wh or kWh icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_watt_hours(&mut self, watt_hours: f32) -> SetResult {
        self.set_quantity(Unit::WattHours, watt_hours)
    }

    /// Show a duration with the h icon
    ///
    /// # Errors
    ///
    /// See [`Frame::set_quantity`].
    pub fn set_hours(&mut self, hours: f32) -> SetResult {
        self.set_quantity(Unit::Hours, hours)
    }

    /// Show a three letter label
    ///
    /// # Errors
    ///
    /// See [`Frame::set_letters`].
    pub fn set_letters(&mut self, text: &str) -> SetResult {
        Self::checked("Letters", self.frame.set_letters(text))
    }

    /// Show a battery chemistry icon
    pub fn set_battery_type(&mut self, battery: BatteryType) {
        self.frame.set_battery_type(battery);
    }

    /// Show a battery chemistry icon from its raw number
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidBatteryType`] for values above 5 and leaves
    /// the display unchanged.
    pub fn set_battery_type_raw(&mut self, value: u8) -> SetResult {
        match BatteryType::try_from(value) {
            Ok(battery) => {
                self.frame.set_battery_type(battery);
                Ok(())
            }
            Err(e) => Self::checked("Battery type", Err(e)),
        }
    }

    /// Show `bars` battery bars (0 to 4)
    ///
    /// # Errors
    ///
    /// See [`Frame::set_battery_bar`].
    pub fn set_battery_bar(&mut self, bars: u8) -> SetResult {
        Self::checked("Battery bar", self.frame.set_battery_bar(bars))
    }

    /// Turn the buzzer on or off
    pub fn set_buzzer(&mut self, on: bool) {
        self.frame.set_buzzer(on);
    }

    /// Select an LED pattern
    pub fn set_led(&mut self, led: Led, on: bool) {
        self.frame.set_led(led, on);
    }

    /// Select an LED pattern from its raw number
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidLed`] for values above 4 and leaves the
    /// display unchanged.
    pub fn set_led_raw(&mut self, value: u8, on: bool) -> SetResult {
        match Led::try_from(value) {
            Ok(led) => {
                self.frame.set_led(led, on);
                Ok(())
            }
            Err(e) => Self::checked("Led", Err(e)),
        }
    }

    /// Register the charge rate button callback
    pub fn on_charge_rate(&mut self, callback: ButtonCallback) -> &mut Self {
        self.on_button(Button::ChargeRate, callback)
    }

    /// Register the volt/amp button callback
    pub fn on_volt_amp(&mut self, callback: ButtonCallback) -> &mut Self {
        self.on_button(Button::VoltAmp, callback)
    }

    /// Register the battery type button callback
    pub fn on_battery_type(&mut self, callback: ButtonCallback) -> &mut Self {
        self.on_button(Button::BatteryType, callback)
    }

    /// Register the recondition button callback
    pub fn on_recondition(&mut self, callback: ButtonCallback) -> &mut Self {
        self.on_button(Button::Recondition, callback)
    }

    /// Register a callback for `button`, replacing any previous one
    pub fn on_button(&mut self, button: Button, callback: ButtonCallback) -> &mut Self {
        self.keypad.callbacks_mut().set(button, callback);
        self
    }

    /// Remove every button callback
    pub fn clear_callbacks(&mut self) -> &mut Self {
        self.keypad.callbacks_mut().clear();
        self
    }

    /// Ordinal assigned at construction
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Driver configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Frame that the next cycle will send
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Last raw keypad byte
    pub fn button_state(&self) -> u8 {
        self.keypad.state()
    }

    /// Bus error counters
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Reset the bus error counters
    pub fn reset_stats(&mut self) {
        self.stats = CycleStats::default();
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::TransitionPolicy;
    use crate::config::Builder;
    use crate::protocol::{
        CHECKSUM, DECIMAL_POINT, DIGIT_LEFT, DIGIT_MIDDLE, DIGIT_RIGHT, ICON, ICON_VOLTS,
        LED_BUZZER, LED_MASK, OUT_FRAME_LEN,
    };
    use crate::registry::Registry;
    use crate::segment::NUMERALS;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicU8, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Probe(u8),
        Write(u8, Vec<u8>),
        Read(u8, usize),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    #[derive(Debug, Default)]
    struct MockInterface {
        ops: Vec<Op>,
        probe_acked: bool,
        /// Keypad bytes returned by successive reads; `None` fails the read
        replies: VecDeque<Option<u8>>,
        fail_writes: bool,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                probe_acked: true,
                ..Self::default()
            }
        }

        fn with_replies(replies: &[Option<u8>]) -> Self {
            Self {
                replies: replies.iter().copied().collect(),
                ..Self::new()
            }
        }

        fn reads(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Read(..))).count()
        }

        fn writes(&self) -> Vec<&Vec<u8>> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Write(_, bytes) => Some(bytes),
                    _ => None,
                })
                .collect()
        }
    }

    impl BusInterface for MockInterface {
        type Error = MockError;

        fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
            self.ops.push(Op::Probe(address));
            if self.probe_acked { Ok(()) } else { Err(MockError) }
        }

        fn write_frame(&mut self, address: u8, frame: &[u8]) -> Result<(), Self::Error> {
            self.ops.push(Op::Write(address, frame.to_vec()));
            if self.fail_writes { Err(MockError) } else { Ok(()) }
        }

        fn read_frame(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
            self.ops.push(Op::Read(address, buffer.len()));
            // Once scripted replies run out the keypad reports nothing pressed
            match self.replies.pop_front().unwrap_or(Some(0)) {
                Some(byte) => {
                    buffer.fill(0);
                    buffer[0] = byte;
                    Ok(())
                }
                None => Err(MockError),
            }
        }
    }

    fn test_display(interface: MockInterface) -> Display<MockInterface> {
        let mut registry = Registry::new();
        Display::new(interface, Config::default(), registry.next_id())
    }

    #[test]
    fn test_begin_probes_board() {
        let mut display = test_display(MockInterface::new());
        assert!(display.begin().is_ok());
        assert_eq!(display.interface.ops, [Op::Probe(PERIPHERAL_ADDRESS)]);
    }

    #[test]
    fn test_begin_clears_frame() {
        let mut display = test_display(MockInterface::new());
        display.set_voltage(12.0).unwrap();
        display.begin().unwrap();
        assert_eq!(display.frame(), &Frame::new());
    }

    #[test]
    fn test_begin_reports_connectivity_error() {
        let interface = MockInterface {
            probe_acked: false,
            ..MockInterface::default()
        };
        let mut display = test_display(interface);
        let result = display.begin();
        assert!(matches!(result, Err(Error::Connectivity(MockError))));
    }

    #[test]
    fn test_third_instance_fails_without_bus_traffic() {
        let mut registry = Registry::new();
        let _first = registry.next_id();
        let _second = registry.next_id();
        let mut third = Display::new(MockInterface::new(), Config::default(), registry.next_id());

        let result = third.begin();
        assert!(matches!(
            result,
            Err(Error::InstanceLimitExceeded { id: 3 })
        ));
        third.cycle();
        assert!(third.interface.ops.is_empty());
        assert_eq!(third.stats().cycles, 0);
    }

    #[test]
    fn test_second_instance_is_allowed() {
        let mut registry = Registry::new();
        let _first = registry.next_id();
        let mut second = Display::new(MockInterface::new(), Config::default(), registry.next_id());
        assert!(second.begin().is_ok());
        assert_eq!(second.id().get(), 2);
    }

    #[test]
    fn test_end_to_end_voltage() {
        let mut display = test_display(MockInterface::new());
        display.begin().unwrap();

        display.set_voltage(1.234).unwrap();
        let bytes = *display.frame().as_bytes();
        assert_eq!(bytes[ICON], ICON_VOLTS);
        assert_eq!(bytes[DIGIT_LEFT], NUMERALS[1] | DECIMAL_POINT);
        assert_eq!(bytes[DIGIT_MIDDLE], NUMERALS[2]);
        assert_eq!(bytes[DIGIT_RIGHT], NUMERALS[3]);
        let sum = bytes[..CHECKSUM].iter().fold(0u8, |s, &b| s.wrapping_add(b));
        assert_eq!(bytes[CHECKSUM], sum);

        display.interface.ops.clear();
        display.cycle();

        let keypad_reads = display
            .interface
            .ops
            .iter()
            .filter(|op| **op == Op::Read(PERIPHERAL_ADDRESS, IN_FRAME_LEN))
            .count();
        assert_eq!(keypad_reads, 5);
        assert_eq!(display.interface.reads(), 5);
        assert_eq!(
            display.interface.ops.last(),
            Some(&Op::Write(PERIPHERAL_ADDRESS, bytes.to_vec()))
        );
        assert_eq!(display.interface.writes().len(), 1);
        assert_eq!(display.interface.writes()[0].len(), OUT_FRAME_LEN);
    }

    #[test]
    fn test_end_to_end_two_digit_voltage() {
        let mut display = test_display(MockInterface::new());
        display.begin().unwrap();
        display.set_voltage(12.34).unwrap();
        let bytes = display.frame().as_bytes();
        assert_eq!(bytes[DIGIT_LEFT], NUMERALS[1]);
        assert_eq!(bytes[DIGIT_MIDDLE], NUMERALS[2] | DECIMAL_POINT);
        assert_eq!(bytes[DIGIT_RIGHT], NUMERALS[3]);
    }

    #[test]
    fn test_cycle_writes_unchanged_frame_every_time() {
        let mut display = test_display(MockInterface::new());
        display.cycle();
        display.cycle();
        let writes = display.interface.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], writes[1]);
        assert_eq!(display.stats().cycles, 2);
    }

    #[test]
    fn test_cycle_uses_configured_poll_reads() {
        let config = Builder::new().poll_reads(2).build().unwrap();
        let mut registry = Registry::new();
        let mut display = Display::new(MockInterface::new(), config, registry.next_id());
        display.cycle();
        assert_eq!(display.interface.reads(), 2);
    }

    #[test]
    fn test_cycle_fires_press_and_release() {
        static PRESSES: AtomicU8 = AtomicU8::new(0);
        static RELEASES: AtomicU8 = AtomicU8::new(0);
        fn on_volt_amp(pressed: bool) {
            if pressed {
                PRESSES.fetch_add(1, Ordering::SeqCst);
            } else {
                RELEASES.fetch_add(1, Ordering::SeqCst);
            }
        }

        let interface =
            MockInterface::with_replies(&[Some(0), Some(0x02), Some(0x02), Some(0x02), Some(0)]);
        let mut display = test_display(interface);
        display.on_volt_amp(on_volt_amp);
        display.cycle();

        assert_eq!(PRESSES.load(Ordering::SeqCst), 1);
        assert_eq!(RELEASES.load(Ordering::SeqCst), 1);
        assert_eq!(display.button_state(), 0);
    }

    #[test]
    fn test_cycle_keeps_state_across_cycles() {
        static PRESSES: AtomicU8 = AtomicU8::new(0);
        fn on_charge_rate(pressed: bool) {
            if pressed {
                PRESSES.fetch_add(1, Ordering::SeqCst);
            }
        }

        let interface = MockInterface::with_replies(&[Some(0x01); 6]);
        let mut display = test_display(interface);
        display.on_charge_rate(on_charge_rate);
        display.cycle();
        assert_eq!(display.button_state(), 0x01);

        // Sixth read still shows the button held; later reads release it
        display.cycle();
        assert_eq!(PRESSES.load(Ordering::SeqCst), 1);
        assert_eq!(display.button_state(), 0x00);
    }

    #[test]
    fn test_cycle_drops_simultaneous_presses() {
        static CALLS: AtomicU8 = AtomicU8::new(0);
        fn on_any(_: bool) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let interface = MockInterface::with_replies(&[Some(0x03); 5]);
        let mut display = test_display(interface);
        display
            .on_charge_rate(on_any)
            .on_volt_amp(on_any)
            .on_battery_type(on_any)
            .on_recondition(on_any);

        display.cycle();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        assert_eq!(display.button_state(), 0x03);
    }

    #[test]
    fn test_cycle_report_all_policy() {
        static CALLS: AtomicU8 = AtomicU8::new(0);
        fn on_any(_: bool) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let config = Builder::new()
            .transition_policy(TransitionPolicy::ReportAll)
            .build()
            .unwrap();
        let interface = MockInterface::with_replies(&[Some(0x0C); 5]);
        let mut registry = Registry::new();
        let mut display = Display::new(interface, config, registry.next_id());
        display.on_battery_type(on_any).on_recondition(on_any);
        display.cycle();
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cycle_swallows_bus_errors() {
        let mut interface =
            MockInterface::with_replies(&[None, Some(0), None, Some(0), Some(0)]);
        interface.fail_writes = true;
        let mut display = test_display(interface);

        display.cycle();

        let stats = display.stats();
        assert_eq!(stats.read_errors, 2);
        assert_eq!(stats.write_errors, 1);
        assert_eq!(stats.cycles, 1);
        assert_eq!(display.interface.reads(), 5);

        display.reset_stats();
        assert_eq!(display.stats(), CycleStats::default());
    }

    #[test]
    fn test_failed_read_does_not_decode() {
        static CALLS: AtomicU8 = AtomicU8::new(0);
        fn on_any(_: bool) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let interface =
            MockInterface::with_replies(&[Some(0x08), None, None, Some(0x08), Some(0x08)]);
        let mut display = test_display(interface);
        display.on_recondition(on_any);
        display.cycle();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(display.button_state(), 0x08);
    }

    #[test]
    fn test_setter_errors_leave_frame() {
        let mut display = test_display(MockInterface::new());
        display.set_battery_bar(2).unwrap();
        display.set_led(Led::SolidGreen, true);
        let before = *display.frame();

        assert_eq!(
            display.set_battery_bar(9),
            Err(FrameError::InvalidBatteryBar { bars: 9 })
        );
        assert_eq!(
            display.set_battery_type_raw(6),
            Err(FrameError::InvalidBatteryType { value: 6 })
        );
        assert_eq!(
            display.set_led_raw(7, true),
            Err(FrameError::InvalidLed { value: 7 })
        );
        assert!(matches!(
            display.set_letters("v1"),
            Err(FrameError::InvalidLength { .. })
        ));
        assert_eq!(display.frame(), &before);
    }

    #[test]
    fn test_raw_setters() {
        let mut display = test_display(MockInterface::new());
        display.set_led_raw(2, true).unwrap();
        assert_eq!(
            display.frame().as_bytes()[LED_BUZZER] & LED_MASK,
            Led::SolidRed.bit()
        );
        display.set_battery_type_raw(1).unwrap();
        let mut expected = Frame::new();
        expected.set_led(Led::SolidRed, true);
        expected.set_battery_type(BatteryType::PowerSupply);
        assert_eq!(display.frame(), &expected);
    }

    #[test]
    fn test_quantity_setters_set_icons() {
        let mut display = test_display(MockInterface::new());
        let setters: [(fn(&mut Display<MockInterface>, f32) -> SetResult, Unit); 8] = [
            (Display::set_voltage, Unit::Volts),
            (Display::set_current, Unit::Amps),
            (Display::set_watts, Unit::Watts),
            (Display::set_temperature, Unit::Celsius),
            (Display::set_percent, Unit::Percent),
            (Display::set_amp_hours, Unit::AmpHours),
            (Display::set_watt_hours, Unit::WattHours),
            (Display::set_hours, Unit::Hours),
        ];
        for (setter, unit) in setters {
            setter(&mut display, 42.0).unwrap();
            assert_eq!(display.frame().as_bytes()[ICON], unit.icon());
            assert!(display.frame().checksum_valid());
        }
    }

    #[test]
    fn test_too_large_still_sends_dashes() {
        let mut display = test_display(MockInterface::new());
        assert_eq!(
            display.set_temperature(1200.0),
            Err(FrameError::NumberTooLarge)
        );
        display.cycle();
        let writes = display.interface.writes();
        assert_eq!(writes[0][DIGIT_LEFT], crate::protocol::OVERFLOW_GLYPH);
    }

    #[test]
    fn test_clear_callbacks() {
        static CALLS: AtomicU8 = AtomicU8::new(0);
        fn on_any(_: bool) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let interface = MockInterface::with_replies(&[Some(0x01)]);
        let mut display = test_display(interface);
        display.on_charge_rate(on_any).clear_callbacks();
        display.cycle();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_release_returns_interface() {
        let mut display = test_display(MockInterface::new());
        display.cycle();
        let interface = display.release();
        assert_eq!(interface.reads(), 5);
    }
}

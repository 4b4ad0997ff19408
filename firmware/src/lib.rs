//! Firmware library: factory definitions, console collaborators and mock
//! hardware for the host simulator and the test crate

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;

pub use talk_core::*;

pub use crate::console::Console;
pub use crate::defs::FACTORY_DEFINITIONS;
pub use crate::mock_hardware::MockSwitchPin;

pub mod defs {
    //! Factory code-definition stream, normally streamed from the code
    //! definition card at boot

    /// Full morse alphabet and digits, starter short codes, factory
    /// timing parameters
    pub const FACTORY_DEFINITIONS: &str = "\
mcode,12,A>>\
mcode,2111,B>>\
mcode,2121,C>>\
mcode,211,D>>\
mcode,1,E>>\
mcode,1121,F>>\
mcode,221,G>>\
mcode,1111,H>>\
mcode,11,I>>\
mcode,1222,J>>\
mcode,212,K>>\
mcode,1211,L>>\
mcode,22,M>>\
mcode,21,N>>\
mcode,222,O>>\
mcode,1221,P>>\
mcode,2212,Q>>\
mcode,121,R>>\
mcode,111,S>>\
mcode,2,T>>\
mcode,112,U>>\
mcode,1112,V>>\
mcode,122,W>>\
mcode,2112,X>>\
mcode,2122,Y>>\
mcode,2211,Z>>\
mcode,12222,1>>\
mcode,11222,2>>\
mcode,11122,3>>\
mcode,11112,4>>\
mcode,11111,5>>\
mcode,21111,6>>\
mcode,22111,7>>\
mcode,22211,8>>\
mcode,22221,9>>\
mcode,22222,0>>\
mcode,222111,:>>\
scode,:ih,I am hungry>>\
scode,:it,I am thirsty>>\
scode,:ib,I need a bathroom break>>\
scode,:ty,Thank you>>\
scode,:hl,Hello how are you>>\
pcode,:du,200>>\
pcode,:da,3>>\
pcode,:ig,200>>\
pcode,:cg,1000>>\
pcode,:wg,2000>>\
pcode,:lp,500";
}

pub mod console {
    //! Console-backed collaborators for the host simulator

    use talk_core::hal::{Diagnostics, SpeechTrigger, TextDisplay};
    use talk_core::params::ParamError;
    use talk_core::records::RecordError;

    /// Prints what the display, speech and diagnostics collaborators
    /// would receive on the device
    #[derive(Default)]
    pub struct Console;

    impl Console {
        pub fn new() -> Self {
            Self
        }
    }

    impl TextDisplay for Console {
        fn char_decoded(&mut self, c: char) {
            println!("[display] + {c}");
        }

        fn text_updated(&mut self, text: &str) {
            println!("[display] {text}");
        }

        fn status_line(&mut self, line: &str) {
            println!("[status] {line}");
        }
    }

    impl SpeechTrigger for Console {
        fn speak(&mut self, text: &str) {
            println!("[speech] {text}");
        }
    }

    impl Diagnostics for Console {
        fn code_miss(&mut self, key: u32) {
            println!("[diag] code not found: {key}");
        }

        fn shortcode_miss(&mut self, token: &str) {
            println!("[diag] short code not found: {token}");
        }

        fn param_rejected(&mut self, err: &ParamError) {
            println!("[diag] parameter rejected: {err}");
        }

        fn record_rejected(&mut self, err: &RecordError) {
            println!("[diag] bad definition record: {err}");
        }

        fn capacity_exceeded(&mut self, what: &'static str) {
            println!("[diag] {what} full, input rejected");
        }

        fn truncated(&mut self, what: &'static str) {
            println!("[diag] {what} truncated");
        }
    }
}

pub mod mock_hardware {
    //! Mock switch pin for wiring tests without GPIO

    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType, InputPin};

    /// Pin double, active low like the real switch wiring
    #[derive(Default)]
    pub struct MockSwitchPin {
        low: Cell<bool>,
    }

    impl MockSwitchPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&self, pressed: bool) {
            self.low.set(pressed);
        }
    }

    impl ErrorType for MockSwitchPin {
        type Error = Infallible;
    }

    impl InputPin for MockSwitchPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }
}

/// Poll one debounced switch seam into the shared input state
pub fn scan_switch<S: talk_core::hal::InputSwitch>(
    switch: &mut S,
    id: SwitchId,
    input: &SwitchInput,
    now_ms: u32,
    debounce_ms: u32,
) {
    if let Ok(pressed) = switch.is_pressed() {
        input.update(id, pressed, now_ms, debounce_ms);
    }
}

//! Recording pins for the unit tests.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::v2::OutputPin;

use crate::backend::PinBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Output(u8),
    High(u8),
    Low(u8),
}

/// Bank that logs every call. Clones share the log, so it can be read after the display that
/// owns the bank is dropped.
#[derive(Debug, Clone, Default)]
pub struct MockPins {
    log: Rc<RefCell<Vec<Event>>>,
}

impl MockPins {
    pub fn new() -> MockPins {
        MockPins::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Levels written to `pin`, in order.
    pub fn levels(&self, pin: u8) -> Vec<bool> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::High(p) if p == pin => Some(true),
                Event::Low(p) if p == pin => Some(false),
                _ => None,
            })
            .collect()
    }
}

impl PinBank for MockPins {
    type Error = Infallible;

    fn configure_output(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Output(pin));
        Ok(())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::High(pin));
        Ok(())
    }

    fn set_low(&mut self, pin: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Low(pin));
        Ok(())
    }
}

/// Single `embedded_hal` pin whose level can be watched from outside.
#[derive(Debug)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new() -> (MockPin, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(false));
        (MockPin { level: level.clone() }, level)
    }
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(true);
        Ok(())
    }
}

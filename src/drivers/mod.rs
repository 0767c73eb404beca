//! Terminal seams: where raw crossterm events come from and where frames go.

pub mod console;
pub mod keyboard;

use std::io;
use std::time::Duration;

use ::crossterm::event::Event;
use ratatui::backend::Backend;

use crate::ui::UiFrame;

pub use console::{ConsoleInputDriver, ConsoleOutputDriver};
pub use keyboard::KeyboardNormalizer;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

pub trait OutputDriver {
    type Backend: Backend;

    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;
    fn size(&self) -> io::Result<(u16, u16)>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn drain(mut driver: impl InputDriver) -> usize {
        let mut n = 0;
        while driver.poll(Duration::ZERO).unwrap() {
            driver.read().unwrap();
            n += 1;
        }
        n
    }

    #[test]
    fn blanket_impl_for_mut_ref_forwards() {
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        let mut d = Scripted(VecDeque::from([key.clone(), key]));
        assert_eq!(drain(&mut d), 2);
        assert!(d.read().is_err());
        assert!(d.set_mouse_capture(true).is_ok());
    }
}

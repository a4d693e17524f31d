//! Accessors for the single external string a [`crate::TitleEffect`] drives.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

use parking_lot::{Mutex, const_mutex};

use crate::TitleError;

/// Get/set access to one external title. Failures are returned as-is to the
/// caller of `activate`, `update` or `deactivate`.
pub trait TitleTarget {
    fn get(&self) -> Result<String, TitleError>;
    fn set(&self, title: &str) -> Result<(), TitleError>;
}

impl<T: TitleTarget + ?Sized> TitleTarget for Rc<T> {
    fn get(&self) -> Result<String, TitleError> {
        (**self).get()
    }
    fn set(&self, title: &str) -> Result<(), TitleError> {
        (**self).set(title)
    }
}

impl<T: TitleTarget + ?Sized> TitleTarget for &T {
    fn get(&self) -> Result<String, TitleError> {
        (**self).get()
    }
    fn set(&self, title: &str) -> Result<(), TitleError> {
        (**self).set(title)
    }
}

/// In-memory title. Clones share the value; `writes` counts calls to `set`.
#[derive(Clone, Debug, Default)]
pub struct MemoryTitle {
    value: Rc<RefCell<String>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryTitle {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial.into())),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl TitleTarget for MemoryTitle {
    fn get(&self) -> Result<String, TitleError> {
        Ok(self.value.borrow().clone())
    }

    fn set(&self, title: &str) -> Result<(), TitleError> {
        self.writes.set(self.writes.get() + 1);
        *self.value.borrow_mut() = title.to_owned();
        Ok(())
    }
}

static PROCESS_TITLE: Mutex<String> = const_mutex(String::new());

/// The process-wide title. Shared by every thread; last write wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessTitle;

impl ProcessTitle {
    pub fn current() -> String {
        PROCESS_TITLE.lock().clone()
    }
}

impl TitleTarget for ProcessTitle {
    fn get(&self) -> Result<String, TitleError> {
        Ok(PROCESS_TITLE.lock().clone())
    }

    fn set(&self, title: &str) -> Result<(), TitleError> {
        let mut t = PROCESS_TITLE.lock();
        t.clear();
        t.push_str(title);
        Ok(())
    }
}

/// Terminal window title via the xterm `OSC 2` sequence.
///
/// Terminals cannot be queried portably, so `get` reports the last title
/// written through this target (initially the one given to `new`).
pub struct TerminalTitle<W: Write> {
    out: RefCell<W>,
    last: RefCell<String>,
}

impl<W: Write> TerminalTitle<W> {
    pub fn new(out: W, initial: impl Into<String>) -> Self {
        Self {
            out: RefCell::new(out),
            last: RefCell::new(initial.into()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> TitleTarget for TerminalTitle<W> {
    fn get(&self) -> Result<String, TitleError> {
        Ok(self.last.borrow().clone())
    }

    fn set(&self, title: &str) -> Result<(), TitleError> {
        if title.chars().any(|c| c == '\x07' || c == '\x1b') {
            return Err(TitleError::Rejected(format!(
                "control characters in terminal title {title:?}"
            )));
        }
        let mut out = self.out.borrow_mut();
        write!(out, "\x1b]2;{title}\x07")?;
        out.flush()?;
        *self.last.borrow_mut() = title.to_owned();
        Ok(())
    }
}

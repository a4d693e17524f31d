//! Scoped ownership of an external title.
//!
//! Activating captures the title that was there before, then writes the
//! desired (optionally templated) one. While the [`TitleGuard`] lives it may
//! retitle any number of times; the captured original never changes. When it
//! goes away (explicit [`TitleGuard::deactivate`], scope disposal, drop
//! during unwinding) the original is written back exactly once, if the
//! restore flag is set *at that moment*.

use crate::{TitleError, TitleTarget};

/// Replaces every `%s` in `template` with `title`. A missing or empty
/// template leaves `title` as is.
///
/// ```rust
/// use tether_hooks::format_title;
///
/// assert_eq!(format_title("Inbox", Some("%s - Mail")), "Inbox - Mail");
/// assert_eq!(format_title("a", Some("%s/%s")), "a/a");
/// assert_eq!(format_title("Inbox", Some("")), "Inbox");
/// ```
pub fn format_title(title: &str, template: Option<&str>) -> String {
    match template {
        Some(t) if !t.is_empty() => t.replace("%s", title),
        _ => title.to_owned(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TitleOptions {
    /// `%s` placeholders are replaced by the title.
    pub template: Option<String>,
    /// Skip the write when the target already shows the formatted title.
    pub skip_if_same: bool,
    /// Write the captured original back on release. The value in effect
    /// when the guard is released is the one that counts.
    pub restore_on_unmount: bool,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            template: None,
            skip_if_same: true,
            restore_on_unmount: true,
        }
    }
}

impl TitleOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
    pub fn skip_if_same(mut self, skip: bool) -> Self {
        self.skip_if_same = skip;
        self
    }
    pub fn restore_on_unmount(mut self, restore: bool) -> Self {
        self.restore_on_unmount = restore;
        self
    }
}

/// Live activation. Releasing it (explicitly or by drop) happens once.
pub struct TitleGuard<T: TitleTarget> {
    target: T,
    captured_original: String,
    template: Option<String>,
    skip_if_same: bool,
    restore_on_unmount: bool,
    released: bool,
}

impl<T: TitleTarget> std::fmt::Debug for TitleGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleGuard")
            .field("captured_original", &self.captured_original)
            .field("template", &self.template)
            .field("skip_if_same", &self.skip_if_same)
            .field("restore_on_unmount", &self.restore_on_unmount)
            .field("released", &self.released)
            .finish()
    }
}

impl<T: TitleTarget> TitleGuard<T> {
    /// Captures the current title, then applies `title`.
    pub fn activate(target: T, title: &str, options: TitleOptions) -> Result<Self, TitleError> {
        let captured_original = target.get()?;
        let TitleOptions {
            template,
            skip_if_same,
            restore_on_unmount,
        } = options;
        let mut guard = Self {
            target,
            captured_original,
            template,
            skip_if_same,
            restore_on_unmount,
            released: false,
        };
        log::debug!("title: activated over {:?}", guard.captured_original);

        if let Err(e) = guard.set_title(title) {
            // nothing was written; there is nothing to give back
            guard.released = true;
            return Err(e);
        }
        Ok(guard)
    }

    pub fn captured_original(&self) -> &str {
        &self.captured_original
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Re-applies `title` with new options. The captured original is kept.
    pub fn update(&mut self, title: &str, options: TitleOptions) -> Result<(), TitleError> {
        self.template = options.template;
        self.skip_if_same = options.skip_if_same;
        self.restore_on_unmount = options.restore_on_unmount;
        self.set_title(title)?;
        Ok(())
    }

    /// Applies `title` with the current template and skip rule. Returns
    /// whether the target was written.
    pub fn set_title(&mut self, title: &str) -> Result<bool, TitleError> {
        let formatted = format_title(title, self.template.as_deref());
        if self.skip_if_same && self.target.get()? == formatted {
            return Ok(false);
        }
        self.target.set(&formatted)?;
        Ok(true)
    }

    pub fn set_restore_on_unmount(&mut self, restore: bool) {
        self.restore_on_unmount = restore;
    }

    pub fn restore_on_unmount(&self) -> bool {
        self.restore_on_unmount
    }

    pub fn deactivate(mut self) -> Result<(), TitleError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), TitleError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        if self.restore_on_unmount {
            log::debug!("title: restoring {:?}", self.captured_original);
            self.target.set(&self.captured_original)?;
        }
        Ok(())
    }
}

impl<T: TitleTarget> Drop for TitleGuard<T> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("title: restore on drop failed: {e}");
        }
    }
}

/// Reusable title effect: `Inactive -> Active -> Inactive`, any number of
/// times. Each activation captures afresh.
pub struct TitleEffect<T: TitleTarget + Clone> {
    target: T,
    active: Option<TitleGuard<T>>,
}

impl<T: TitleTarget + Clone> TitleEffect<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn captured_original(&self) -> Option<&str> {
        self.active.as_ref().map(TitleGuard::captured_original)
    }

    /// Starts an activation. While one is already running this behaves like
    /// [`TitleEffect::update`] and does not capture again.
    pub fn activate(&mut self, title: &str, options: TitleOptions) -> Result<(), TitleError> {
        if let Some(guard) = self.active.as_mut() {
            log::debug!("title: already active; updating instead");
            return guard.update(title, options);
        }
        self.active = Some(TitleGuard::activate(self.target.clone(), title, options)?);
        Ok(())
    }

    /// Retitles the running activation. Does nothing while inactive.
    pub fn update(&mut self, title: &str, options: TitleOptions) -> Result<(), TitleError> {
        match self.active.as_mut() {
            Some(guard) => guard.update(title, options),
            None => {
                log::debug!("title: update while inactive ignored");
                Ok(())
            }
        }
    }

    pub fn set_restore_on_unmount(&mut self, restore: bool) {
        if let Some(guard) = self.active.as_mut() {
            guard.set_restore_on_unmount(restore);
        }
    }

    pub fn deactivate(&mut self) -> Result<(), TitleError> {
        match self.active.take() {
            Some(guard) => guard.deactivate(),
            None => Ok(()),
        }
    }
}

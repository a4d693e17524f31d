//! Numeric counter with optional bounds.
//!
//! Every mutator except [`Counter::set_count`] routes its result through
//! [`Bounds::clamp`], so the count stays inside the configured range.
//! `set_count` is the raw escape hatch and may leave the count out of range
//! until the next clamped write.
//!
//! Change callbacks run as post-commit tasks (see [`tether_core::post_commit`]):
//! one call per committed change, in commit order, never merged.

use std::cell::RefCell;
use std::fmt::Debug;
use std::ops::{Add, Sub};
use std::rc::Rc;

use tether_core::{Signal, SubId, post_commit, signal};

use crate::Update;

/// Numbers a [`Counter`] can hold.
///
/// Integer steps saturate at the type's range instead of overflowing; the
/// bounds are applied afterwards.
pub trait CounterValue:
    Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self> + 'static
{
    const ZERO: Self;
    const ONE: Self;

    fn step_up(self, step: Self) -> Self;
    fn step_down(self, step: Self) -> Self;
}

macro_rules! int_counter_value {
    ($($t:ty),*) => {$(
        impl CounterValue for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn step_up(self, step: Self) -> Self {
                self.saturating_add(step)
            }
            fn step_down(self, step: Self) -> Self {
                self.saturating_sub(step)
            }
        }
    )*};
}

macro_rules! float_counter_value {
    ($($t:ty),*) => {$(
        impl CounterValue for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            fn step_up(self, step: Self) -> Self {
                self + step
            }
            fn step_down(self, step: Self) -> Self {
                self - step
            }
        }
    )*};
}

int_counter_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_counter_value!(f32, f64);

/// Optional inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: CounterValue> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Max is applied before min: with `min > max` the result is `min`.
    pub fn clamp(&self, value: T) -> T {
        let mut v = value;
        if let Some(max) = self.max
            && v > max
        {
            v = max;
        }
        if let Some(min) = self.min
            && v < min
        {
            v = min;
        }
        v
    }

    pub fn is_min(&self, value: T) -> bool {
        self.min.is_some_and(|min| value <= min)
    }

    pub fn is_max(&self, value: T) -> bool {
        self.max.is_some_and(|max| value >= max)
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

type OnChange<T> = Rc<dyn Fn(T)>;

/// Construction options for [`Counter`].
///
/// ```rust
/// use tether_hooks::{Counter, CounterOptions};
///
/// let c = Counter::new(CounterOptions::new().initial_value(5).min(0).max(10).step(2));
/// c.increment();
/// assert_eq!(c.count(), 7);
/// ```
#[derive(Clone)]
pub struct CounterOptions<T: CounterValue = i64> {
    pub initial_value: T,
    pub bounds: Bounds<T>,
    pub step: T,
    pub on_change: Option<OnChange<T>>,
}

impl<T: CounterValue> Default for CounterOptions<T> {
    fn default() -> Self {
        Self {
            initial_value: T::ZERO,
            bounds: Bounds {
                min: None,
                max: None,
            },
            step: T::ONE,
            on_change: None,
        }
    }
}

impl<T: CounterValue> Debug for CounterOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterOptions")
            .field("initial_value", &self.initial_value)
            .field("bounds", &self.bounds)
            .field("step", &self.step)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: CounterValue> CounterOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn initial_value(mut self, v: T) -> Self {
        self.initial_value = v;
        self
    }
    pub fn min(mut self, v: T) -> Self {
        self.bounds.min = Some(v);
        self
    }
    pub fn max(mut self, v: T) -> Self {
        self.bounds.max = Some(v);
        self
    }
    pub fn step(mut self, v: T) -> Self {
        self.step = v;
        self
    }
    pub fn on_change(mut self, f: impl Fn(T) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }
}

struct Config<T: CounterValue> {
    bounds: Bounds<T>,
    step: T,
    on_change: Option<OnChange<T>>,
}

/// Bounded counter. Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct Counter<T: CounterValue = i64> {
    count: Signal<T>,
    initial_value: T,
    config: Rc<RefCell<Config<T>>>,
}

impl<T: CounterValue> Debug for Counter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Counter")
            .field("count", &self.count())
            .field("initial_value", &self.initial_value)
            .field("bounds", &self.bounds())
            .finish()
    }
}

impl<T: CounterValue> Default for Counter<T> {
    fn default() -> Self {
        Self::new(CounterOptions::default())
    }
}

impl<T: CounterValue> Counter<T> {
    pub fn new(options: CounterOptions<T>) -> Self {
        let CounterOptions {
            initial_value,
            bounds,
            step,
            on_change,
        } = options;
        if step <= T::ZERO {
            log::warn!("counter: non-positive step {step:?}; increment and decrement swap roles");
        }
        if bounds.is_inverted() {
            log::debug!("counter: min > max in {bounds:?}; clamped values settle at min");
        }

        Self {
            count: signal(bounds.clamp(initial_value)),
            initial_value,
            config: Rc::new(RefCell::new(Config {
                bounds,
                step,
                on_change,
            })),
        }
    }

    pub fn count(&self) -> T {
        self.count.get()
    }

    pub fn initial_value(&self) -> T {
        self.initial_value
    }

    pub fn bounds(&self) -> Bounds<T> {
        self.config.borrow().bounds
    }

    pub fn step(&self) -> T {
        self.config.borrow().step
    }

    pub fn is_min(&self) -> bool {
        self.bounds().is_min(self.count())
    }

    pub fn is_max(&self) -> bool {
        self.bounds().is_max(self.count())
    }

    pub fn increment(&self) {
        let step = self.step();
        self.write_clamped(self.count().step_up(step));
    }

    pub fn decrement(&self) {
        let step = self.step();
        self.write_clamped(self.count().step_down(step));
    }

    /// Back to the construction-time initial value, clamped by the current
    /// bounds.
    pub fn reset(&self) {
        self.write_clamped(self.initial_value);
    }

    pub fn reset_to(&self, value: T) {
        self.write_clamped(value);
    }

    /// Raw write: the bounds are not applied.
    pub fn set_count(&self, next: impl Into<Update<T>>) {
        let next = next.into().apply(self.count());
        self.commit(next);
    }

    pub fn set_count_bounded(&self, next: impl Into<Update<T>>) {
        let next = next.into().apply(self.count());
        self.write_clamped(next);
    }

    /// Applies options from a later render. The count is not re-clamped and
    /// the construction-time initial value is kept.
    pub fn reconfigure(&self, options: CounterOptions<T>) {
        let mut config = self.config.borrow_mut();
        config.bounds = options.bounds;
        config.step = options.step;
        config.on_change = options.on_change;
    }

    pub fn set_on_change(&self, f: impl Fn(T) + 'static) {
        self.config.borrow_mut().on_change = Some(Rc::new(f));
    }

    pub fn clear_on_change(&self) {
        self.config.borrow_mut().on_change = None;
    }

    /// Runs `f` synchronously on every stored change. Unlike `on_change` it
    /// is not deferred; `f` may write to this counter.
    pub fn subscribe(&self, f: impl Fn(T) + 'static) -> SubId {
        self.count.subscribe(move |v| f(*v))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.count.unsubscribe(id)
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.count
    }

    fn write_clamped(&self, value: T) {
        let clamped = self.bounds().clamp(value);
        self.commit(clamped);
    }

    fn commit(&self, value: T) {
        if !self.count.replace_if_changed(value) {
            return;
        }
        let on_change = self.config.borrow().on_change.clone();
        if let Some(f) = on_change {
            post_commit(move || f(value));
        }
    }
}

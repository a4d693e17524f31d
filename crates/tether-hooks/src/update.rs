/// New value for a setter: either a replacement or a function of the
/// previous value.
///
/// ```rust
/// use tether_hooks::Update;
///
/// assert_eq!(Update::from(3).apply(1), 3);
/// assert_eq!(Update::with(|prev: i32| prev + 2).apply(1), 3);
/// ```
pub enum Update<T> {
    Literal(T),
    With(Box<dyn FnOnce(T) -> T>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(T) -> T + 'static) -> Self {
        Update::With(Box::new(f))
    }

    pub fn apply(self, prev: T) -> T {
        match self {
            Update::Literal(v) => v,
            Update::With(f) => f(prev),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(v: T) -> Self {
        Update::Literal(v)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Update::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Update::With(_) => f.write_str("With(..)"),
        }
    }
}

//! Small stateful widgets shared across pages

pub mod clock;

/// A value read from the environment that may not have been read yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deferred<T> {
    #[default]
    Uninitialized,
    Ready(T),
}

impl<T> Deferred<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Deferred::Uninitialized => None,
            Deferred::Ready(value) => Some(value),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Deferred::Ready(_))
    }
}

impl<T: Copy> Deferred<T> {
    /// The stored value, or `fallback` until it has been read
    pub fn or(&self, fallback: T) -> T {
        match self {
            Deferred::Uninitialized => fallback,
            Deferred::Ready(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_falls_back_until_ready() {
        let mut value: Deferred<u8> = Deferred::default();
        assert!(!value.is_ready());
        assert_eq!(value.or(7), 7);
        assert_eq!(value.ready(), None);

        value = Deferred::Ready(3);
        assert_eq!(value.or(7), 3);
        assert_eq!(value.ready(), Some(&3));
    }
}

/// Remembers the last value it let through and admits only values that differ.
#[derive(Debug, Clone, Default)]
pub struct ChangeGuard<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> ChangeGuard<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` the first time and whenever `value` differs from the last admitted one.
    pub fn admit(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

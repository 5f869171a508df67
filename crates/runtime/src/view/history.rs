//! Navigation history of rendered URLs.

/// Browser-style history: pushing after going back discards the forward
/// entries. Pushing the current entry again is ignored.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    /// Records a new location. Returns false if it equals the current one.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.current() == Some(url.as_str()) {
            return false;
        }
        if self.entries.is_empty() {
            self.entries.push(url);
            self.index = 0;
            return true;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
        true
    }

    /// Overwrites the current entry without adding one.
    pub fn replace(&mut self, url: impl Into<String>) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = url.into(),
            None => {
                self.entries.push(url.into());
                self.index = self.entries.len() - 1;
            }
        }
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 || self.entries.is_empty() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered phrases shown one at a time by a rotating text element.
///
/// The cursor starts before the first phrase, so the first call to
/// [`PhraseCycle::advance`] yields phrase 0 and later calls wrap around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCycle {
    phrases: Vec<String>,
    index: Option<usize>,
}

impl PhraseCycle {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases,
            index: None,
        }
    }

    /// Split `text` on `separator` and trim every segment.
    ///
    /// Segments that trim down to nothing are kept as empty phrases. An empty
    /// separator splits into single characters.
    pub fn parse(text: &str, separator: &str) -> Self {
        let phrases = if separator.is_empty() {
            text.chars().map(|c| c.to_string().trim().to_string()).collect()
        } else {
            text.split(separator).map(|s| s.trim().to_string()).collect()
        };
        Self::new(phrases)
    }

    /// Move to the next phrase and return it. `None` only when there are no phrases.
    pub fn advance(&mut self) -> Option<&str> {
        if self.phrases.is_empty() {
            return None;
        }
        let next = match self.index {
            None => 0,
            Some(i) => (i + 1) % self.phrases.len(),
        };
        self.index = Some(next);
        Some(self.phrases[next].as_str())
    }

    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| self.phrases[i].as_str())
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

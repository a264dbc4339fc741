/// Counter state for a length-limited text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharBudget {
    pub remaining: usize,
    pub warning: bool,
}

impl CharBudget {
    /// Characters are Unicode scalar values. `remaining` saturates at zero.
    pub fn measure(text: &str, max_chars: usize, warn_at: usize) -> Self {
        let remaining = max_chars.saturating_sub(text.chars().count());
        Self {
            remaining,
            warning: remaining <= warn_at,
        }
    }

    pub fn label(&self) -> String {
        format!("{} characters remaining", self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_scalar_values() {
        let budget = CharBudget::measure("héllo", 10, 2);
        assert_eq!(budget.remaining, 5);
        assert!(!budget.warning);
        assert_eq!(budget.label(), "5 characters remaining");
    }

    #[test]
    fn test_saturates_at_zero() {
        let budget = CharBudget::measure("too long for the limit", 5, 1);
        assert_eq!(budget.remaining, 0);
        assert!(budget.warning);
    }

    #[test]
    fn test_warning_threshold_is_inclusive() {
        assert!(CharBudget::measure("abcde", 8, 3).warning);
        assert!(!CharBudget::measure("abcd", 8, 3).warning);
    }
}

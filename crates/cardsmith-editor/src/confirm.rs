//! Yes/no confirmation for destructive edits.

/// Asks the user to confirm a destructive action.
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmGate for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

impl<F> ConfirmGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_gate_sees_prompt() {
        let seen = RefCell::new(String::new());
        let gate = |prompt: &str| {
            seen.replace(prompt.to_string());
            true
        };
        assert!(gate.confirm("Reset?"));
        assert_eq!(seen.borrow().as_str(), "Reset?");
    }
}

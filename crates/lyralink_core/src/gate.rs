//! Password gate in front of destructive actions.
//!
//! The secret is a literal compiled into the client. Anyone holding the
//! binary can read it, so the gate only deters accidental deletes; it is
//! not access control.
//!
//! # Invariants
//! - Comparison is exact and case-sensitive.
//! - A [`GatePass`] only exists inside a successful check's continuation.

/// The shared secret.
pub const GATE_SECRET: &str = "y121l";

/// Inline error shown after a mismatch.
pub const ACCESS_DENIED_MESSAGE: &str = "ACCESS_DENIED: Invalid security key";

/// Proof that the gate was passed. Required by every list `remove`.
#[derive(Debug)]
pub struct GatePass {
    _sealed: (),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gate;

impl Gate {
    pub fn check(&self, secret: &str) -> bool {
        secret == GATE_SECRET
    }

    /// Runs `on_success` with a pass when `secret` matches.
    pub fn unlock<T>(&self, secret: &str, on_success: impl FnOnce(&GatePass) -> T) -> Option<T> {
        if !self.check(secret) {
            log::info!("event=gate_check module=gate status=denied");
            return None;
        }
        log::info!("event=gate_check module=gate status=ok");
        Some(on_success(&GatePass { _sealed: () }))
    }
}

/// State of the "Security Check" prompt.
#[derive(Debug, Clone, Default)]
pub struct PasswordPrompt {
    gate: Gate,
    input: String,
    error: Option<&'static str>,
}

impl PasswordPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Replaces the typed text; editing dismisses a previous error.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.error = None;
    }

    /// Checks the typed text.
    ///
    /// On a match the continuation runs and both input and error are
    /// cleared. On a mismatch the error is set and the input is kept so the
    /// user can correct it.
    pub fn submit<T>(&mut self, on_success: impl FnOnce(&GatePass) -> T) -> Option<T> {
        match self.gate.unlock(&self.input, on_success) {
            Some(value) => {
                self.input.clear();
                self.error = None;
                Some(value)
            }
            None => {
                self.error = Some(ACCESS_DENIED_MESSAGE);
                None
            }
        }
    }
}

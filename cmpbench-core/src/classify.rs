use crate::domain::Algorithm;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureClass {
    /// Abort the remaining repetitions of the (dataset, algorithm) pair.
    Fatal,
    /// Retry once with the reduced-switch command.
    RetryWithFallback,
}

/// Exit code of `algorithm` that earns one fallback retry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FallbackRule {
    pub algorithm: Algorithm,
    pub exit_code: i32,
}

/// RAR exit code 7: bad command line / not enough memory for the
/// requested switches.
pub const RAR_USER_ERROR: i32 = 7;

#[derive(Clone, Debug)]
pub struct FailureClassifier {
    rules: Vec<FallbackRule>,
}

impl Default for FailureClassifier {
    fn default() -> Self {
        Self::new(vec![FallbackRule {
            algorithm: Algorithm::Rar,
            exit_code: RAR_USER_ERROR,
        }])
    }
}

impl FailureClassifier {
    pub fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// Never retries; every failure is fatal for its pair.
    pub fn strict() -> Self {
        Self::new(Vec::new())
    }

    pub fn classify(&self, algorithm: Algorithm, exit_code: Option<i32>) -> FailureClass {
        let Some(code) = exit_code else {
            return FailureClass::Fatal;
        };
        if self
            .rules
            .iter()
            .any(|r| r.algorithm == algorithm && r.exit_code == code)
        {
            FailureClass::RetryWithFallback
        } else {
            FailureClass::Fatal
        }
    }
}

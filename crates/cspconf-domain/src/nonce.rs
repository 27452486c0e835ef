//! Nonce sources consumed when a directive lists the `'nonce'` placeholder.

/// Supplies the nonce for one header computation.
///
/// The renderer asks at most once per call and reuses the value for every placeholder, so an
/// implementation may return a fresh random value on every call.
pub trait NonceSource {
    fn nonce(&self) -> String;
}

/// A nonce fixed up front, typically generated once per response by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedNonce(String);

impl FixedNonce {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

impl<F> NonceSource for F
where
    F: Fn() -> String,
{
    fn nonce(&self) -> String {
        self()
    }
}

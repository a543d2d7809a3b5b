//! # Manager configuration.
//!
//! Provides [`ManagerConfig`] centralized settings for the fire pipeline.
//!
//! Config is used in one place: manager construction, either directly via
//! `EventManager::builder().config(..)` or implicitly through the defaults.
//!
//! ## Sentinel values
//! - `max_fire_depth = 0` → unlimited (no depth guard)

/// Configuration for an [`EventManager`](crate::EventManager).
///
/// Defines:
/// - **Recursion guard**: bound on in-flight fire cycles
/// - **Panic policy**: whether listener panics become listener failures
///
/// ## Field semantics
/// - `max_fire_depth`: in-flight fire cycle limit (`0` = unlimited)
/// - `catch_panics`: convert listener panics into interceptable failures
///
/// ## Notes
/// All fields are public for flexibility. Prefer [`ManagerConfig::depth_limit`]
/// over checking the `0` sentinel directly.
#[derive(Clone, Copy, Debug)]
pub struct ManagerConfig {
    /// Maximum number of simultaneously in-flight fire cycles.
    ///
    /// Nested fires count against the limit: a listener firing another event,
    /// and the internal `on_exception` cycle, each add a level. When the
    /// limit is hit the offending cycle fails with
    /// [`FireError::DepthExceeded`](crate::FireError::DepthExceeded) before
    /// running any checkpoint.
    ///
    /// - `0` = unlimited (no guard)
    /// - `n > 0` = at most `n` nested cycles
    pub max_fire_depth: usize,

    /// Convert listener panics into listener failures.
    ///
    /// When set, a panicking listener behaves like one returning an error:
    /// the failure is routable to `on_exception` and the panic does not
    /// unwind through `fire`. Disable to let panics propagate untouched.
    pub catch_panics: bool,
}

impl ManagerConfig {
    /// Returns the fire depth limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` in-flight cycles
    #[inline]
    pub fn depth_limit(&self) -> Option<usize> {
        if self.max_fire_depth == 0 {
            None
        } else {
            Some(self.max_fire_depth)
        }
    }
}

impl Default for ManagerConfig {
    /// Default configuration:
    ///
    /// - `max_fire_depth = 64` (ample for well-formed listener graphs)
    /// - `catch_panics = true` (panics become interceptable failures)
    fn default() -> Self {
        Self {
            max_fire_depth: 64,
            catch_panics: true,
        }
    }
}

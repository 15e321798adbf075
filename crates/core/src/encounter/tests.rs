//! Regression suites for encounter behaviour.

mod admin;

/// Shared imports for encounter regression tests.
mod support {
    pub(super) use super::super::test_support::*;
    pub(super) use super::super::*;
    pub(super) use crate::catalog::keys;
    pub(super) use crate::host::WorldHost;
    pub(super) use crate::sandbox::SandboxWorld;
}

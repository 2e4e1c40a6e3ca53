//! Opt-in process-wide default bundle
//!
//! Nothing is installed implicitly. Applications that want a global call
//! [`install_global`] once during startup; the bundle then lives for the rest
//! of the process.

use crate::bundle::Bundle;
use once_cell::sync::OnceCell;
use tracing::info;

static GLOBAL: OnceCell<Bundle> = OnceCell::new();

/// Install `bundle` as the process-wide default.
///
/// Only the first call succeeds; later calls get their bundle back.
pub fn install_global(bundle: Bundle) -> Result<&'static Bundle, Bundle> {
    match GLOBAL.try_insert(bundle) {
        Ok(installed) => {
            info!(locale = %installed.locale(), "installed global bundle");
            Ok(installed)
        }
        Err((_, rejected)) => Err(rejected),
    }
}

/// The process-wide default bundle, if one was installed.
pub fn global() -> Option<&'static Bundle> {
    GLOBAL.get()
}

//! Keeps the display awake while a match is running.
//!
//! - Native (Windows/macOS/Linux): holds a `keepawake` guard, dropped between matches
//! - WASM: holds a Screen Wake Lock through `js/screen_wake.js`, re-acquired when the tab is shown again

#[cfg(not(target_arch = "wasm32"))]
pub(crate) struct ScreenWake {
    guard: Option<keepawake::KeepAwake>,
    unavailable: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl ScreenWake {
    pub(crate) fn new() -> Self {
        Self {
            guard: None,
            unavailable: false,
        }
    }

    /// Hold the lock while `active`, release it otherwise.
    pub(crate) fn set_active(&mut self, active: bool) {
        if !active {
            self.guard = None;
            return;
        }
        if self.guard.is_some() || self.unavailable {
            return;
        }
        match keepawake::Builder::default()
            .display(true)
            .reason("Trail duel in progress")
            .app_name("Trail Duel")
            .app_reverse_domain("com.trailduel.game")
            .create()
        {
            Ok(guard) => self.guard = Some(guard),
            Err(e) => {
                log::warn!("screen wake lock unavailable: {e:?}");
                self.unavailable = true;
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) struct ScreenWake {
    active: bool,
}

#[cfg(target_arch = "wasm32")]
impl ScreenWake {
    pub(crate) fn new() -> Self {
        Self { active: false }
    }

    /// Hold the lock while `active`, release it otherwise. The page re-acquires
    /// a held lock whenever the tab becomes visible again.
    pub(crate) fn set_active(&mut self, active: bool) {
        unsafe extern "C" {
            fn sapp_request_wake_lock();
            fn sapp_release_wake_lock();
        }

        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            unsafe { sapp_request_wake_lock() };
        } else {
            unsafe { sapp_release_wake_lock() };
        }
    }
}

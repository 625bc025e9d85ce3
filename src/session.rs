use std::sync::Mutex;

use crate::models::Identity;

/// Persistence for the locally cached identity record (the `user` key).
///
/// Implementations bring their own backing store; the client only ever
/// saves on login / identity probe and clears on logout or terminal
/// refresh failure.
pub trait SessionStore: Send + Sync {
    fn load_user(&self) -> Option<Identity>;
    fn save_user(&self, user: &Identity);
    fn clear_user(&self);
}

/// Hook invoked when a session is irrecoverably lost.
pub trait Navigator: Send + Sync {
    /// Whether the user is already on the login screen.
    fn at_login(&self) -> bool;
    /// Perform a full navigation to the login screen.
    fn goto_login(&self);
}

/// Default in-process session store.
#[derive(Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<Identity>>,
}

impl SessionStore for MemorySessionStore {
    fn load_user(&self) -> Option<Identity> {
        self.user.lock().expect("session store poisoned").clone()
    }

    fn save_user(&self, user: &Identity) {
        *self.user.lock().expect("session store poisoned") = Some(user.clone());
    }

    fn clear_user(&self) {
        *self.user.lock().expect("session store poisoned") = None;
    }
}

/// Default navigator: nothing to navigate in a headless process, so it
/// only logs the forced logout.
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn at_login(&self) -> bool {
        false
    }

    fn goto_login(&self) {
        tracing::warn!("session irrecoverable, redirecting to login");
    }
}

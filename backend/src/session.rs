use std::collections::HashMap;
use std::sync::Mutex;
use ring::rand::{SecureRandom, SystemRandom};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rocket::http::{Cookie, CookieJar, SameSite};
use tracing::{debug, error, warn};
use shared::Allocation;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "ballot_session";
const MAX_SESSIONS: usize = 10000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Login {
    Voter(String),
    Viewer,
    Admin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub login: Option<Login>,
    pub allocation: Allocation,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}

struct Slot {
    session: Session,
    last_used: u64,
}

/// Token-keyed sessions with a size cap. Anonymous sessions are evicted
/// first, then the least recently used one.
pub struct SessionTable {
    slots: HashMap<String, Slot>,
    capacity: usize,
    clock: u64,
}

impl SessionTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: HashMap::new(), capacity, clock: 0 }
    }

    pub fn len(&self) -> usize { self.slots.len() }

    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    pub fn contains(&self, token: &str) -> bool {
        self.slots.contains_key(token)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    pub fn insert(&mut self, token: String) {
        self.make_room();
        let last_used = self.tick();
        self.slots.insert(token, Slot { session: Session::default(), last_used });
    }

    pub fn touch(&mut self, token: &str) -> Option<&mut Session> {
        let now = self.tick();
        let slot = self.slots.get_mut(token)?;
        slot.last_used = now;
        Some(&mut slot.session)
    }

    fn make_room(&mut self) {
        if self.slots.len() < self.capacity {
            return;
        }
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.session.login.is_some());
        debug!("Evicted {} anonymous sessions", before - self.slots.len());

        while self.slots.len() >= self.capacity {
            let oldest = self.slots.iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(token) => {
                    warn!("Session table full, evicting least recently used login");
                    self.slots.remove(&token);
                }
                None => break,
            }
        }
    }
}

pub struct SessionRegistry {
    sessions: Mutex<SessionTable>,
    rng: SystemRandom,
}

impl Default for SessionRegistry {
    fn default() -> Self { Self::new() }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(SessionTable::with_capacity(MAX_SESSIONS)),
            rng: SystemRandom::new(),
        }
    }

    fn generate_token(&self) -> Result<String, ApiError> {
        let mut bytes = [0u8; 32];
        self.rng.fill(&mut bytes)
            .map_err(|_| ApiError::Internal("random source unavailable".into()))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Runs `f` against the caller's session, creating one (and its cookie) on first visit.
    pub fn with_session<T>(
        &self,
        cookies: &CookieJar<'_>,
        f: impl FnOnce(&mut Session) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut sessions = self.sessions.lock().map_err(|_| {
            error!("Failed to acquire lock for session storage");
            ApiError::Internal("session lock poisoned".into())
        })?;

        let existing = cookies.get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|token| sessions.contains(token));

        let token = match existing {
            Some(token) => token,
            None => {
                let token = self.generate_token()?;
                sessions.insert(token.clone());
                cookies.add(
                    Cookie::build((SESSION_COOKIE, token.clone()))
                        .http_only(true)
                        .same_site(SameSite::Lax)
                        .path("/"),
                );
                debug!("Started new session");
                token
            }
        };

        let session = sessions.touch(&token)
            .ok_or_else(|| ApiError::Internal("session vanished".into()))?;
        f(session)
    }
}

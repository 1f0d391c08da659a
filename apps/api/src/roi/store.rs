//! Latest-result store. Keeps the most recent ROI calculation per session so
//! the frontend can restore the selected path card. Process-local, not persisted.
//!
//! Records expire after `DEFAULT_SESSION_TTL_HOURS` and the map holds at most
//! `DEFAULT_MAX_SESSIONS` entries; the oldest record is evicted beyond that.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::EducationPath;
use crate::roi::calculator::RoiResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRecord {
    pub session_id: Uuid,
    pub path: EducationPath,
    pub result: RoiResult,
    pub computed_at: DateTime<Utc>,
}

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Cloneable handle; all clones share the same map.
#[derive(Debug, Clone)]
pub struct RoiStore {
    inner: Arc<RwLock<HashMap<Uuid, RoiRecord>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for RoiStore {
    fn default() -> Self {
        Self::with_limits(
            Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            DEFAULT_MAX_SESSIONS,
        )
    }
}

impl RoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Replaces whatever the session held before.
    pub fn record(&self, session_id: Uuid, path: EducationPath, result: RoiResult) -> RoiRecord {
        self.record_at(session_id, path, result, Utc::now())
    }

    /// Inserts a record stamped `now`, first dropping expired records and, when
    /// full, the oldest one.
    fn record_at(
        &self,
        session_id: Uuid,
        path: EducationPath,
        result: RoiResult,
        now: DateTime<Utc>,
    ) -> RoiRecord {
        let record = RoiRecord {
            session_id,
            path,
            result,
            computed_at: now,
        };
        // Poisoning leaves the map intact.
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let cutoff = now - self.ttl;
        map.retain(|_, r| r.computed_at > cutoff);

        if !map.contains_key(&session_id) && map.len() >= self.max_sessions {
            let oldest = map
                .values()
                .min_by_key(|r| r.computed_at)
                .map(|r| r.session_id);
            if let Some(oldest) = oldest {
                map.remove(&oldest);
            }
        }

        map.insert(session_id, record.clone());
        record
    }

    /// Expired records are treated as absent.
    pub fn latest(&self, session_id: Uuid) -> Option<RoiRecord> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let cutoff = Utc::now() - self.ttl;
        map.get(&session_id)
            .filter(|r| r.computed_at > cutoff)
            .cloned()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns true if the session had a record.
    pub fn clear(&self, session_id: Uuid) -> bool {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.remove(&session_id).is_some()
    }
}

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TOAST_LIMIT: usize = 4;
pub const DEFAULT_TOAST_TTL_MILLIS: u64 = 3200;
pub const MAX_TOAST_TTL_MILLIS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Bounded, newest-first notification queue with per-entry expiry.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    limit: usize,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOAST_LIMIT,
            Duration::milliseconds(DEFAULT_TOAST_TTL_MILLIS as i64),
        )
    }
}

impl ToastQueue {
    pub fn new(limit: usize, ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            limit: limit.max(1),
            ttl,
        }
    }

    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.insert(
            0,
            Toast {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                expires_at: now
                    .checked_add_signed(self.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
        self.toasts.truncate(self.limit);
        id
    }

    pub fn success(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastKind::Success, title, message, now)
    }

    pub fn error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastKind::Error, title, message, now)
    }

    pub fn info(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.push(ToastKind::Info, title, message, now)
    }

    /// Drops expired entries; returns whether anything was removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| now < toast.expires_at);
        self.toasts.len() != before
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn dismiss_latest(&mut self) -> bool {
        if self.toasts.is_empty() {
            return false;
        }
        self.toasts.remove(0);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.first()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

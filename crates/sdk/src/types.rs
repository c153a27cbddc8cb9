//! SDK Request Types
//!
//! Parameter bundles for the multi-argument admin operations. Optional
//! fields are sent only when non-empty.

/// Parameters for `domain.add`
#[derive(Debug, Clone)]
pub struct DomainAddRequest {
    pub domain: String,
    pub password: String,
    pub context_id: Option<String>,
    pub create_new_context_id: bool,
    pub memo: Option<String>,
}

/// Parameters for `mail.add`
#[derive(Debug, Clone)]
pub struct MailAddRequest {
    pub mail: String,
    pub password: String,
    pub plan: String,
    pub first_name: String,
    pub last_name: String,
    pub inboxsave: bool,
    pub forwards: Vec<String>,
}

/// Parameters for `mail.register` (token-based self-service registration)
#[derive(Debug, Clone)]
pub struct MailRegisterRequest {
    pub token: String,
    pub mail: String,
    pub password: String,
    pub alternate_mail: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub lang: String,
}

/// Parameters for `mail.backup.import`
#[derive(Debug, Clone)]
pub struct MailBackupImportRequest {
    pub mail: String,
    pub id: String,
    pub time: String,
    pub filter: String,
}

/// Parameters for `mail.spamprotect.set`
#[derive(Debug, Clone)]
pub struct SpamProtectSettings {
    pub greylist: bool,
    pub smtp_plausibility: bool,
    pub rbl: bool,
    pub bypass_banned_checks: bool,
    /// Spam score above which mails are tagged
    pub tag2level: f64,
    /// What to do above the kill threshold (e.g. "reject")
    pub killevel: String,
    pub route_to: String,
}

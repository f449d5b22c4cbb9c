//! Organisation membership checks performed before any list query touches data

crate::using! {
    pub error,
    pub subject,
    pub policy
}

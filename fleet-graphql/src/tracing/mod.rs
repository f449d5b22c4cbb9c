//! Logging setup based on [tracing_subscriber]

crate::using! {
    pub subscriber
}

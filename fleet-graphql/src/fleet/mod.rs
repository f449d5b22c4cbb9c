//! Fleet list queries: depots, vehicles, fuel cards, toll tags, infringements, members and invites of an organisation

crate::using! {
    pub model,
    pub filter,
    pub store,
    pub context,
    pub query
}

//! Shared primitive types used across the entire economy core.

/// Opaque user identity supplied by the platform layer.
pub type UserId = String;

/// Opaque guild (server) identity supplied by the platform layer.
pub type GuildId = String;

/// Wall-clock instant in whole seconds since the Unix epoch.
/// The core never reads the clock itself; callers pass `now` in.
pub type EpochSecs = i64;

/// The in-game currency. Always a whole number; never negative in
/// a persisted account.
pub type Zentrons = i64;

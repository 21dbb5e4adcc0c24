//! ID generator port for drawing candidate identifiers.

/// Draws candidate identifiers.
///
/// A generator makes no uniqueness promise: uniqueness is established by
/// the allocator against the index. Abstracting the draw allows scripted
/// sequences (including deliberate collisions) during tests and cassette
/// playback.
pub trait IdGenerator: Send + Sync {
    /// Draws one candidate identifier.
    fn generate_id(&self) -> String;
}

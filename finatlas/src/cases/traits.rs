use crate::random::seededstream::SeededStream;

/// # CaseGenerator
/// A case that is drawn from a [`SeededStream`]. Each module tags the user
/// seed with its own prefix so the five exercises stay independent under a
/// shared case identifier.
pub trait CaseGenerator: Sized {
    const SEED_PREFIX: &'static str;

    fn from_stream(stream: &mut SeededStream) -> Self;

    fn generate(seed: &str) -> Self {
        let mut stream = SeededStream::new(&format!("{}{}", Self::SEED_PREFIX, seed));
        let case = Self::from_stream(&mut stream);
        tracing::debug!(prefix = Self::SEED_PREFIX, seed, "generated case");
        case
    }
}

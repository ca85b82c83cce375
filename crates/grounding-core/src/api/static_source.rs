//! Built-in affirmation list served with a simulated network delay

use std::time::Duration;

use super::client::{AffirmationDto, AffirmationSource, ApiError};

/// Simulated latency before the list is returned
pub const DEFAULT_STATIC_DELAY: Duration = Duration::from_millis(500);

/// The bundled affirmations. Order is significant: index 0 is id "1".
pub const STATIC_AFFIRMATIONS: [(&str, &str); 37] = [
    ("1", "I am grounded in this moment, fully present and at peace."),
    ("2", "I have many choices"),
    ("3", "I get to decide what happens next"),
    ("4", "I am exactly where I need to be on my journey."),
    ("5", "With each breath, I become more centered and calm."),
    ("6", "I now acknowledge how far I have come and how much I have grown"),
    ("7", "I honor myself"),
    ("8", "I open myself to express love in a way that is safe for me"),
    ("9", "I am committed to loving myself"),
    ("10", "Focusing on myself is not selfish, it is selfless"),
    ("11", "I am worthy of love and respect"),
    ("12", "I can't fill anyone else's cup if mine is empty"),
    ("13", "Life is happening for me and not to me"),
    ("14", "I am open to seeing the situation with new eyes"),
    ("15", "It is safe for me to speak clearly"),
    ("16", "It is safe for me to co-create"),
    ("17", "I allow the unique wildness within me to be free"),
    ("18", "I open myself up to love"),
    ("19", "I am connected to myself"),
    ("20", "I am inspired by the joy around me"),
    ("21", "I am proud of myself"),
    ("22", "I believe in harmony and balance"),
    ("23", "I carry the wisdom of my ancestors before me"),
    ("24", "When the time is right I know it will happen"),
    ("25", "I trust the timing"),
    ("26", "I am becoming the best version that I can be"),
    ("27", "It is safe for me to trust"),
    ("28", "I release my old programming"),
    ("29", "The right connections will always be reciprocated"),
    ("30", "The best day of my life has yet to occur"),
    ("31", "I believe that I can find love and abundance"),
    ("32", "Love exists all around me"),
    ("33", "I can now feel the love within"),
    ("34", "I open myself up to new relationships and collaborations"),
    ("35", "I celebrate all I have accomplished"),
    ("36", "I can enjoy each moment fully and celebrate all I have created"),
    ("37", "I release painful programming and experiences"),
];

/// Source that always succeeds with [`STATIC_AFFIRMATIONS`]
#[derive(Debug, Clone)]
pub struct StaticAffirmationSource {
    delay: Duration,
}

impl StaticAffirmationSource {
    pub const fn new() -> Self {
        Self {
            delay: DEFAULT_STATIC_DELAY,
        }
    }

    /// Override the simulated delay (tests use `Duration::ZERO`)
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for StaticAffirmationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AffirmationSource for StaticAffirmationSource {
    async fn fetch_affirmations(&self) -> Result<Vec<AffirmationDto>, ApiError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(STATIC_AFFIRMATIONS
            .iter()
            .map(|(id, text)| AffirmationDto::new(*id, *text))
            .collect())
    }
}

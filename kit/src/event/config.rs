/// Sizing hints for a registry.
///
/// Neither value is a limit: registries grow past them as needed. They only
/// decide how much is allocated up front, the way a stream is pre-allocated to
/// its expected per-frame volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of topics to reserve room for when the registry is created.
    pub topic_capacity: usize,

    /// Room reserved in a topic's subscriber list when the topic is first used.
    pub subscriber_capacity: usize,
}

impl Config {
    /// Default number of topics reserved up front.
    pub const DEFAULT_TOPIC_CAPACITY: usize = 16;

    /// Default number of subscribers reserved per topic.
    pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 4;

    /// Creates a config with the default capacities.
    #[inline]
    pub const fn new() -> Self {
        Self {
            topic_capacity: Self::DEFAULT_TOPIC_CAPACITY,
            subscriber_capacity: Self::DEFAULT_SUBSCRIBER_CAPACITY,
        }
    }

    /// Sets the number of topics reserved up front.
    #[inline]
    pub const fn with_topic_capacity(mut self, capacity: usize) -> Self {
        self.topic_capacity = capacity;
        self
    }

    /// Sets the number of subscribers reserved per topic.
    #[inline]
    pub const fn with_subscriber_capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = capacity;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = Config::default();

        assert_eq!(config.topic_capacity, Config::DEFAULT_TOPIC_CAPACITY);
        assert_eq!(
            config.subscriber_capacity,
            Config::DEFAULT_SUBSCRIBER_CAPACITY
        );
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::new()
            .with_topic_capacity(128)
            .with_subscriber_capacity(1);

        assert_eq!(
            config,
            Config {
                topic_capacity: 128,
                subscriber_capacity: 1
            }
        );
    }
}

//! Metrics collection and registry.

use crate::cipher::CipherFactory;
use crate::generator::Generator;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of generator state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Whether the generator has been seeded.
    pub is_seeded: bool,
    /// Cipher block size in bytes.
    pub block_size: usize,
    /// Total reseeds performed.
    pub reseeds: u64,
    /// Total self-rekeys performed.
    pub rekeys: u64,
    /// Total cipher blocks produced.
    pub blocks_generated: u64,
    /// Total bytes handed out.
    pub bytes_generated: u64,
}

impl MetricsSnapshot {
    /// Creates a snapshot from the current state of a generator.
    pub fn from_generator<F: CipherFactory>(gen: &Generator<F>) -> Self {
        let stats = gen.stats();
        Self {
            is_seeded: gen.is_seeded(),
            block_size: gen.block_size(),
            reseeds: stats.reseeds,
            rekeys: stats.rekeys,
            blocks_generated: stats.blocks_generated,
            bytes_generated: stats.bytes_generated,
        }
    }
}

/// Prometheus metrics registry for generator monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    seeded: IntGauge,
    block_size: IntGauge,

    reseeds_total: IntCounter,
    rekeys_total: IntCounter,
    blocks_total: IntCounter,
    bytes_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new registry with all generator metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let seeded = IntGauge::new(
            "fortuna_generator_seeded",
            "Whether the generator has been seeded (1=seeded, 0=unseeded)",
        )?;
        let block_size = IntGauge::new(
            "fortuna_generator_block_size_bytes",
            "Block size of the generator cipher in bytes",
        )?;

        let reseeds_total = IntCounter::new(
            "fortuna_generator_reseeds_total",
            "Total number of generator reseeds",
        )?;
        let rekeys_total = IntCounter::new(
            "fortuna_generator_rekeys_total",
            "Total number of keys replaced with generator output",
        )?;
        let blocks_total = IntCounter::new(
            "fortuna_generator_blocks_total",
            "Total cipher blocks produced, including rekey blocks",
        )?;
        let bytes_total = IntCounter::new(
            "fortuna_generator_bytes_total",
            "Total pseudo-random bytes handed out",
        )?;

        registry.register(Box::new(seeded.clone()))?;
        registry.register(Box::new(block_size.clone()))?;
        registry.register(Box::new(reseeds_total.clone()))?;
        registry.register(Box::new(rekeys_total.clone()))?;
        registry.register(Box::new(blocks_total.clone()))?;
        registry.register(Box::new(bytes_total.clone()))?;

        Ok(Self {
            registry,
            seeded,
            block_size,
            reseeds_total,
            rekeys_total,
            blocks_total,
            bytes_total,
        })
    }

    /// Updates all metrics from a snapshot.
    ///
    /// Counters only move forward: each is raised to the snapshot value
    /// if the snapshot is ahead.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.seeded.set(i64::from(snapshot.is_seeded));
        self.block_size.set(snapshot.block_size as i64);

        advance(&self.reseeds_total, snapshot.reseeds);
        advance(&self.rekeys_total, snapshot.rekeys);
        advance(&self.blocks_total, snapshot.blocks_generated);
        advance(&self.bytes_total, snapshot.bytes_generated);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Aes256Factory;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_snapshot_from_generator() {
        let mut gen = Generator::new(Aes256Factory::new()).unwrap();
        let snapshot = MetricsSnapshot::from_generator(&gen);
        assert!(!snapshot.is_seeded);
        assert_eq!(snapshot.block_size, 16);

        gen.seed(1).unwrap();
        gen.pseudo_random_data(20).unwrap();
        let snapshot = MetricsSnapshot::from_generator(&gen);
        assert!(snapshot.is_seeded);
        assert_eq!(snapshot.reseeds, 1);
        assert_eq!(snapshot.rekeys, 1);
        assert_eq!(snapshot.blocks_generated, 4);
        assert_eq!(snapshot.bytes_generated, 20);
    }

    #[test]
    fn test_metrics_update() {
        let registry = MetricsRegistry::new().unwrap();

        let snapshot = MetricsSnapshot {
            is_seeded: true,
            block_size: 16,
            reseeds: 2,
            rekeys: 5,
            blocks_generated: 40,
            bytes_generated: 512,
        };
        registry.update(&snapshot);

        let output = registry.encode().unwrap();
        assert!(output.contains("fortuna_generator_seeded 1"));
        assert!(output.contains("fortuna_generator_block_size_bytes 16"));
        assert!(output.contains("fortuna_generator_reseeds_total 2"));
        assert!(output.contains("fortuna_generator_bytes_total 512"));
    }

    #[test]
    fn test_counters_never_decrease() {
        let registry = MetricsRegistry::new().unwrap();
        registry.update(&MetricsSnapshot {
            rekeys: 10,
            ..Default::default()
        });
        registry.update(&MetricsSnapshot {
            rekeys: 3,
            ..Default::default()
        });

        let output = registry.encode().unwrap();
        assert!(output.contains("fortuna_generator_rekeys_total 10"));
    }
}

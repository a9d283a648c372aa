//! Prometheus metrics for generator monitoring.
//!
//! # Metrics Exposed
//!
//! - `fortuna_generator_seeded` - 1 once the generator has been seeded
//! - `fortuna_generator_block_size_bytes` - Cipher block size
//! - `fortuna_generator_reseeds_total` - Reseeds performed
//! - `fortuna_generator_rekeys_total` - Keys replaced with generator output
//! - `fortuna_generator_blocks_total` - Cipher blocks produced
//! - `fortuna_generator_bytes_total` - Bytes handed out to callers
//!
//! # Example
//!
//! ```
//! use fortuna_generator::{Aes256Factory, Generator};
//! use fortuna_generator::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let mut gen = Generator::new(Aes256Factory::new()).unwrap();
//! gen.seed(42).unwrap();
//! gen.pseudo_random_data(64).unwrap();
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.update(&MetricsSnapshot::from_generator(&gen));
//! assert!(registry.encode().unwrap().contains("fortuna_generator_bytes_total 64"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};

//! Tests for writer configuration

use std::time::Duration;

use super::*;

#[test]
fn test_config_default() {
    let config = WriterConfig::default();

    assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    assert_eq!(config.batch_timeout, DEFAULT_BATCH_TIMEOUT);
    assert_eq!(config.storage_timeout, DEFAULT_STORAGE_TIMEOUT);
}

#[test]
fn test_config_builder() {
    let config = WriterConfig::default()
        .with_buffer_size(10)
        .with_batch_size(5)
        .with_batch_timeout(Duration::from_millis(20))
        .with_storage_timeout(Duration::from_secs(1));

    assert_eq!(config.buffer_size, 10);
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.batch_timeout, Duration::from_millis(20));
    assert_eq!(config.storage_timeout, Duration::from_secs(1));
}

#[test]
fn test_normalized_replaces_zero_values() {
    let config = WriterConfig {
        buffer_size: 0,
        batch_size: 0,
        batch_timeout: Duration::ZERO,
        storage_timeout: Duration::ZERO,
    }
    .normalized();

    assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    assert_eq!(config.batch_timeout, DEFAULT_BATCH_TIMEOUT);
    assert_eq!(config.storage_timeout, DEFAULT_STORAGE_TIMEOUT);
}

#[test]
fn test_normalized_keeps_explicit_values() {
    let config = WriterConfig {
        buffer_size: 1,
        batch_size: 2,
        batch_timeout: Duration::from_millis(3),
        storage_timeout: Duration::from_millis(4),
    }
    .normalized();

    assert_eq!(config.buffer_size, 1);
    assert_eq!(config.batch_size, 2);
    assert_eq!(config.batch_timeout, Duration::from_millis(3));
    assert_eq!(config.storage_timeout, Duration::from_millis(4));
}

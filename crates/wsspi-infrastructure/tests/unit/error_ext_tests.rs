//! Error Extension Tests

use std::error::Error as _;
use std::io;

use wsspi_domain::{Error, Result};
use wsspi_infrastructure::error_ext::ErrorContext;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context_is_configuration_error() {
    let parse_error = "not-a-number".parse::<u32>().unwrap_err();

    let err = Err::<u32, _>(parse_error)
        .config_context("invalid port")
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.source().is_some());
}

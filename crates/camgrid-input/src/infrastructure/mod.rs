//! Infrastructure layer for the input monitor.
//!
//! Contains OS-facing adapters: input device enumeration and reads, and
//! configuration file storage for the binary.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `camgrid_core`, but MUST NOT be imported by the domain layer.

pub mod device_scan;
pub mod storage;

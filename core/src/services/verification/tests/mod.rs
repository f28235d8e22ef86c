//! Tests for the verification service

pub(crate) mod mocks;

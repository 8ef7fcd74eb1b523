//! Integration tests for the variantdb workspace live in `tests/`.

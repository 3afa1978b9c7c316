//! Unit tests for the import domain and services.

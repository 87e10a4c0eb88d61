//! Integration tests driving the full router with a fake provider.

mod fake_provider;
mod gateway;

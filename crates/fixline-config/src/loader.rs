// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fixline.toml` > `~/.config/fixline/fixline.toml`
//! > `/etc/fixline/fixline.toml` with environment variable overrides via the
//! `FIXLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FixlineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fixline/fixline.toml` (system-wide)
/// 3. `~/.config/fixline/fixline.toml` (user XDG config)
/// 4. `./fixline.toml` (local directory)
/// 5. `FIXLINE_*` environment variables
pub fn load_config() -> Result<FixlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(Toml::file("/etc/fixline/fixline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fixline/fixline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fixline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for loading an explicitly chosen config file.
pub fn load_config_from_str(toml_content: &str) -> Result<FixlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FixlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FIXLINE_SERVER_BEARER_TOKEN` must map
/// to `server.bearer_token`, not `server.bearer.token`.
fn env_provider() -> Env {
    Env::prefixed("FIXLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (security headers, panic fallback).

pub mod panic;
pub mod security;

pub use panic::panic_fallback;
pub use security::add_security_headers;

// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmark-only crate; see `benches/collections.rs`.

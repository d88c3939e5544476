// SPDX-License-Identifier: MIT
//
// certmint-store — Durable persistence of certificate metadata and rendered
// artifacts, with a concurrent in-memory lookup cache and on-demand
// regeneration of missing artifacts.

pub mod store;

pub use store::ArtifactStore;
